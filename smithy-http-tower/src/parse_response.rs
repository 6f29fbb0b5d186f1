/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use bytes::Bytes;
use smithy_http::middleware::load_response;
use smithy_http::operation;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
use smithy_http::result::{SdkError, SdkSuccess};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};

/// `ParseResponseService` dispatches [`Operation`](smithy_http::operation::Operation)s and parses them.
///
/// `ParseResponseService` is intended to wrap a `DispatchService` which will handle the interface between
/// services that operate on [`operation::Request`](operation::Request) and services that operate
/// on [`http::Request`](http::Request).
#[derive(Clone)]
pub struct ParseResponseService<S, O> {
    inner: S,
    _output_type: PhantomData<fn() -> O>,
}

pub struct ParseResponseLayer<O> {
    _output_type: PhantomData<fn() -> O>,
}

impl<O> Default for ParseResponseLayer<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// `ParseResponseLayer` dispatches [`Operation`](smithy_http::operation::Operation)s and parses them.
impl<O> ParseResponseLayer<O> {
    pub fn new() -> Self {
        ParseResponseLayer {
            _output_type: PhantomData,
        }
    }
}

impl<S, O> Layer<S> for ParseResponseLayer<O>
where
    S: Service<operation::Request>,
{
    type Service = ParseResponseService<S, O>;

    fn layer(&self, inner: S) -> Self::Service {
        ParseResponseService {
            inner,
            _output_type: PhantomData,
        }
    }
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// ParseResponseService
///
/// Generic Parameter Listing:
/// `S`: The inner service
/// `O`: The type of the response parser whose output type is `Result<T, E>`
/// `T`: The happy path return of the response parser
/// `E`: The error path return of the response parser
/// `B`: The HTTP Body type returned by the inner service
impl<S, O, T, E, B> Service<Operation<O>> for ParseResponseService<S, O>
where
    S: Service<operation::Request, Response = http::Response<B>, Error = SendOperationError>,
    S::Future: Send + 'static,
    B: http_body::Body + Unpin + From<Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
    O: ParseHttpResponse<B, Output = Result<T, E>> + Send + Sync + 'static,
{
    type Response = SdkSuccess<T, B>;
    type Error = SdkError<E, B>;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|err| err.into())
    }

    fn call(&mut self, op: Operation<O>) -> Self::Future {
        let (req, parts) = op.into_request_response();
        let handler = parts.response_handler;
        let resp = self.inner.call(req);
        let fut = async move {
            match resp.await {
                Err(e) => Err(e.into()),
                Ok(resp) => load_response(resp, &handler).await,
            }
        };
        Box::pin(fut)
    }
}

#[cfg(test)]
mod test {
    use crate::dispatch::DispatchLayer;
    use crate::parse_response::ParseResponseLayer;
    use bytes::Bytes;
    use smithy_http::body::SdkBody;
    use smithy_http::operation::{self, Operation};
    use smithy_http::pipeline::{Handler, Stage};
    use smithy_http::response::ParseStrictResponse;
    use smithy_http::result::SdkError;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceBuilder, ServiceExt};

    struct BodyAsString;

    impl ParseStrictResponse for BodyAsString {
        type Output = Result<String, Infallible>;

        fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
            Ok(String::from_utf8_lossy(response.body()).to_string())
        }
    }

    #[tokio::test]
    async fn parse_response() {
        let svc = ServiceBuilder::new()
            .layer(ParseResponseLayer::<BodyAsString>::new())
            .layer(DispatchLayer::new())
            .service(service_fn(|req: http::Request<SdkBody>| async move {
                let body = req.body().bytes().unwrap_or_default().to_vec();
                Ok::<_, Infallible>(http::Response::new(SdkBody::from(body)))
            }));
        let op = Operation::new(
            operation::Request::new(http::Request::new(SdkBody::from("echo"))),
            BodyAsString,
        );
        let success = svc.oneshot(op).await.expect("echo succeeds");
        assert_eq!(success.parsed, "echo");
    }

    #[tokio::test]
    async fn construction_errors_surface_as_construction_failure() {
        let svc = ServiceBuilder::new()
            .layer(ParseResponseLayer::<BodyAsString>::new())
            .layer(DispatchLayer::new())
            .service(service_fn(|_req: http::Request<SdkBody>| async move {
                Ok::<_, Infallible>(http::Response::new(SdkBody::empty()))
            }));
        let mut request = operation::Request::new(http::Request::new(SdkBody::empty()));
        request
            .handlers_mut()
            .stage_mut(Stage::Validate)
            .push_back(Handler::from_fn("validate", |_| Err("missing IdentityPoolId")));
        let err = svc
            .oneshot(Operation::new(request, BodyAsString))
            .await
            .expect_err("validation fails");
        assert!(matches!(err, SdkError::ConstructionFailure(_)));
    }
}
