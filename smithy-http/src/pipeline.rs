/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The per-request handler pipeline.
//!
//! Every [`operation::Request`](crate::operation::Request) owns a [`Handlers`] value: one
//! ordered [`HandlerList`] per request-side [`Stage`]. Service clients install their default
//! handlers while constructing a request, hand the request to an [`InitRequest`] hook, and
//! the dispatcher runs the stages in [`Stage::ORDER`] right before sending. Once dispatched,
//! the request (and with it the pipeline) is consumed, so handlers can only be changed while
//! the request is being built.
//!
//! The response side is not part of this pipeline: parsing is the job of the operation's
//! [`ParseHttpResponse`](crate::response::ParseHttpResponse) handler.

use crate::middleware::MapRequest;
use crate::operation::Request;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

type BoxError = Box<dyn Error + Send + Sync>;

/// A named phase of request processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Check that the request can be built at all
    Validate,
    /// Serialize, resolve endpoints, add protocol headers
    Build,
    /// Add an authentication signature
    Sign,
    /// Last-moment adjustments, run immediately before the request is handed to the connector
    Send,
}

impl Stage {
    /// The order in which [`Handlers::run`] executes stages.
    pub const ORDER: [Stage; 4] = [Stage::Validate, Stage::Build, Stage::Sign, Stage::Send];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Build => "build",
            Stage::Sign => "sign",
            Stage::Send => "send",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type ApplyFn = dyn Fn(Request) -> Result<Request, BoxError> + Send + Sync;

/// A named request handler registered in a single stage.
///
/// Cloning a handler is cheap and the clone compares equal to the original.
#[derive(Clone)]
pub struct Handler {
    name: Cow<'static, str>,
    apply: Arc<ApplyFn>,
}

impl Handler {
    /// Wrap a [`MapRequest`] middleware.
    pub fn new<M>(name: impl Into<Cow<'static, str>>, middleware: M) -> Self
    where
        M: MapRequest + Send + Sync + 'static,
    {
        Handler {
            name: name.into(),
            apply: Arc::new(move |request| middleware.apply(request).map_err(Into::into)),
        }
    }

    pub fn from_fn<F, E>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Request) -> Result<Request, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Handler {
            name: name.into(),
            apply: Arc::new(move |request| f(request).map_err(Into::into)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, request: Request) -> Result<Request, BoxError> {
        (self.apply)(request)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && Arc::as_ptr(&self.apply) as *const () == Arc::as_ptr(&other.apply) as *const ()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name).finish()
    }
}

/// An ordered list of handlers for one stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandlerList {
    handlers: Vec<Handler>,
}

impl HandlerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    pub fn push_front(&mut self, handler: Handler) {
        self.handlers.insert(0, handler);
    }

    /// Remove every handler. Clearing an empty list does nothing.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Remove every handler with the given name, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|handler| handler.name() != name);
        before - self.handlers.len()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.iter().map(Handler::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> + '_ {
        self.handlers.iter()
    }
}

/// Failure of a single handler, tagged with where in the pipeline it happened.
#[derive(Debug, thiserror::Error)]
#[error("handler `{handler}` failed during the {stage} stage")]
pub struct StageError {
    stage: Stage,
    handler: Cow<'static, str>,
    #[source]
    source: BoxError,
}

impl StageError {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}

/// The request-side pipeline owned by a single request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Handlers {
    validate: HandlerList,
    build: HandlerList,
    sign: HandlerList,
    send: HandlerList,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self, stage: Stage) -> &HandlerList {
        match stage {
            Stage::Validate => &self.validate,
            Stage::Build => &self.build,
            Stage::Sign => &self.sign,
            Stage::Send => &self.send,
        }
    }

    pub fn stage_mut(&mut self, stage: Stage) -> &mut HandlerList {
        match stage {
            Stage::Validate => &mut self.validate,
            Stage::Build => &mut self.build,
            Stage::Sign => &mut self.sign,
            Stage::Send => &mut self.send,
        }
    }

    /// Remove all handlers from `stage`. Idempotent.
    pub fn clear_stage(&mut self, stage: Stage) {
        self.stage_mut(stage).clear();
    }

    /// Run every stage, in [`Stage::ORDER`], against `request`.
    ///
    /// Stops at the first handler that fails.
    pub fn run(&self, mut request: Request) -> Result<Request, StageError> {
        for stage in Stage::ORDER {
            for handler in self.stage(stage).iter() {
                tracing::trace!(stage = %stage, handler = handler.name(), "applying handler");
                request = handler.apply(request).map_err(|source| StageError {
                    stage,
                    handler: handler.name.clone(),
                    source,
                })?;
            }
        }
        Ok(request)
    }
}

/// Hook invoked exactly once per request, after the request and its default handlers are
/// constructed and before any stage runs.
///
/// Implementations may mutate the pipeline or the property bag. They must not fail.
pub trait InitRequest: Send + Sync + fmt::Debug {
    fn init_request(&self, request: &mut Request);
}

pub type SharedInitRequest = Arc<dyn InitRequest>;

/// An [`InitRequest`] hook that leaves every request untouched.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct NoopInitRequest;

impl InitRequest for NoopInitRequest {
    fn init_request(&self, _request: &mut Request) {}
}
