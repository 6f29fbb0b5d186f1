/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use pin_project::pin_project;
use smithy_http::body::SdkBody;
use smithy_http::operation;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};
use tracing::{debug_span, Instrument};

/// Connects operation-driven middleware to an HTTP implementation.
///
/// Before the request is handed to the inner service, every stage of the request's
/// [`Handlers`](smithy_http::pipeline::Handlers) runs. A failing handler short-circuits the
/// call: the inner service is never invoked and a
/// [`RequestConstructionError`](SendOperationError::RequestConstructionError) is returned.
#[derive(Clone)]
pub struct DispatchService<S> {
    inner: S,
}

#[pin_project(project = DispatchFutureProj)]
pub enum DispatchFuture<F> {
    Inner(#[pin] F),
    Ready(Option<SendOperationError>),
}

impl<F, T, E> Future for DispatchFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, SendOperationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            DispatchFutureProj::Inner(f) => f
                .poll(cx)
                .map_err(|e| SendOperationError::RequestDispatchError(e.into())),
            DispatchFutureProj::Ready(err) => match err.take() {
                Some(err) => Poll::Ready(Err(err)),
                None => panic!("DispatchFuture polled after completion"),
            },
        }
    }
}

impl<S, B> Service<operation::Request> for DispatchService<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<B>>,
    S::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = SendOperationError;
    type Future = tracing::instrument::Instrumented<DispatchFuture<S::Future>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| SendOperationError::RequestDispatchError(e.into()))
    }

    fn call(&mut self, req: operation::Request) -> Self::Future {
        let span = match req.metadata() {
            Some(metadata) => debug_span!(
                "dispatch",
                service = metadata.service(),
                operation = metadata.name()
            ),
            None => debug_span!("dispatch"),
        };
        let handlers = req.handlers().clone();
        let future = span.in_scope(|| match handlers.run(req) {
            Ok(req) => {
                let (http_request, _config) = req.into_parts();
                tracing::debug!(uri = %http_request.uri(), "dispatching request");
                DispatchFuture::Inner(self.inner.call(http_request))
            }
            Err(err) => {
                tracing::debug!(error = %err, "request construction failed");
                DispatchFuture::Ready(Some(SendOperationError::RequestConstructionError(
                    err.into(),
                )))
            }
        });
        future.instrument(span)
    }
}

#[derive(Clone, Default)]
#[non_exhaustive]
pub struct DispatchLayer;

impl DispatchLayer {
    pub fn new() -> Self {
        DispatchLayer
    }
}

impl<S> Layer<S> for DispatchLayer
where
    S: Service<http::Request<SdkBody>>,
{
    type Service = DispatchService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchService { inner }
    }
}
