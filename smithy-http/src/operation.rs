/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::body::SdkBody;
use crate::pipeline::Handlers;
use crate::property_bag::PropertyBag;
use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifies the operation a request was built for.
///
/// Metadata is assigned when a request is constructed and is read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Metadata {
    operation: Cow<'static, str>,
    service: Cow<'static, str>,
}

impl Metadata {
    pub fn name(&self) -> &str {
        &self.operation
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn new(
        operation: impl Into<Cow<'static, str>>,
        service: impl Into<Cow<'static, str>>,
    ) -> Self {
        Metadata {
            operation: operation.into(),
            service: service.into(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Parts<H> {
    pub response_handler: H,
    pub metadata: Option<Metadata>,
}

/// A request paired with the handler that parses its response.
#[derive(Debug)]
pub struct Operation<H> {
    request: Request,
    parts: Parts<H>,
}

impl<H> Operation<H> {
    pub fn new(request: Request, response_handler: H) -> Self {
        let metadata = request.metadata().cloned();
        Operation {
            request,
            parts: Parts {
                response_handler,
                metadata,
            },
        }
    }

    pub fn into_request_response(self) -> (Request, Parts<H>) {
        (self.request, self.parts)
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.parts.metadata.as_ref()
    }
}

#[derive(Debug)]
pub struct Request {
    /// The underlying HTTP Request
    inner: http::Request<SdkBody>,

    /// Property bag of configuration options
    ///
    /// Middleware can read and write from the property bag and use its
    /// contents to augment the request (see `Request::augment`)
    configuration: Arc<Mutex<PropertyBag>>,

    /// Handlers run against this request, stage by stage, before it is dispatched
    handlers: Handlers,

    metadata: Option<Metadata>,
}

impl Request {
    pub fn new(base: http::Request<SdkBody>) -> Self {
        Request {
            inner: base,
            configuration: Arc::new(Mutex::new(PropertyBag::new())),
            handlers: Handlers::new(),
            metadata: None,
        }
    }

    /// Attach the operation identifier. Only available while constructing the request.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut Handlers {
        &mut self.handlers
    }

    pub fn http(&self) -> &http::Request<SdkBody> {
        &self.inner
    }

    pub fn http_mut(&mut self) -> &mut http::Request<SdkBody> {
        &mut self.inner
    }

    /// Transform the owned HTTP request with access to the property bag.
    pub fn augment<T>(
        self,
        f: impl FnOnce(http::Request<SdkBody>, &mut PropertyBag) -> Result<http::Request<SdkBody>, T>,
    ) -> Result<Request, T> {
        let Request {
            inner,
            configuration,
            handlers,
            metadata,
        } = self;
        let inner = {
            let mut bag = lock(&configuration);
            f(inner, &mut bag)?
        };
        Ok(Request {
            inner,
            configuration,
            handlers,
            metadata,
        })
    }

    pub fn config_mut(&mut self) -> MutexGuard<'_, PropertyBag> {
        lock(&self.configuration)
    }

    pub fn config(&self) -> MutexGuard<'_, PropertyBag> {
        lock(&self.configuration)
    }

    /// Clone the request for a second attempt. The clone shares the property bag.
    ///
    /// Returns `None` if the body cannot be cloned.
    pub fn try_clone(&self) -> Option<Request> {
        let cloned_body = self.inner.body().try_clone()?;
        let mut cloned_request = http::Request::builder()
            .uri(self.inner.uri().clone())
            .method(self.inner.method())
            .version(self.inner.version());
        if let Some(headers) = cloned_request.headers_mut() {
            *headers = self.inner.headers().clone();
        }
        let inner = cloned_request.body(cloned_body).ok()?;
        Some(Request {
            inner,
            configuration: self.configuration.clone(),
            handlers: self.handlers.clone(),
            metadata: self.metadata.clone(),
        })
    }

    pub fn into_parts(self) -> (http::Request<SdkBody>, Arc<Mutex<PropertyBag>>) {
        (self.inner, self.configuration)
    }
}

// Values are inserted whole, so a poisoned bag is still consistent.
fn lock(bag: &Mutex<PropertyBag>) -> MutexGuard<'_, PropertyBag> {
    bag.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::operation::{Metadata, Operation, Request};
    use crate::pipeline::{Handler, Stage};
    use http::header::{AUTHORIZATION, CONTENT_LENGTH};
    use http::Uri;
    use std::convert::Infallible;

    #[test]
    fn try_clone_clones_all_data() {
        let mut request = Request::new(
            http::Request::builder()
                .uri(Uri::from_static("http://www.amazon.com"))
                .method("POST")
                .header(CONTENT_LENGTH, 456)
                .header(AUTHORIZATION, "Token: hello")
                .body(SdkBody::from("hello world!"))
                .expect("valid request"),
        )
        .with_metadata(Metadata::new("GetId", "cognitoidentity"));
        request
            .handlers_mut()
            .stage_mut(Stage::Build)
            .push_back(Handler::from_fn("noop", Ok::<_, Infallible>));
        request.config_mut().insert("hello");
        let cloned = request.try_clone().expect("request is cloneable");

        assert_eq!(cloned.metadata().map(Metadata::name), Some("GetId"));
        assert_eq!(cloned.handlers(), request.handlers());
        let (request, config) = cloned.into_parts();
        assert_eq!(request.uri(), &Uri::from_static("http://www.amazon.com"));
        assert_eq!(request.method(), "POST");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Token: hello"
        );
        assert_eq!(request.headers().get(CONTENT_LENGTH).unwrap(), "456");
        assert_eq!(request.body().bytes().unwrap(), "hello world!".as_bytes());
        assert_eq!(config.lock().unwrap().get::<&str>(), Some(&"hello"));
    }

    #[test]
    fn augment_preserves_handlers_and_metadata() {
        let mut request = Request::new(http::Request::new(SdkBody::empty()))
            .with_metadata(Metadata::new("DescribeIdentityPool", "cognitoidentity"));
        request
            .handlers_mut()
            .stage_mut(Stage::Sign)
            .push_back(Handler::from_fn("sign", Ok::<_, Infallible>));
        let request = request
            .augment(|req, bag| {
                bag.insert(7_u8);
                Ok::<_, Infallible>(req)
            })
            .unwrap();
        assert_eq!(request.handlers().stage(Stage::Sign).len(), 1);
        assert_eq!(request.config().get::<u8>(), Some(&7));
        assert_eq!(
            request.metadata().map(Metadata::name),
            Some("DescribeIdentityPool")
        );
    }

    #[test]
    fn operation_carries_request_metadata() {
        let request = Request::new(http::Request::new(SdkBody::empty()))
            .with_metadata(Metadata::new("GetOpenIdToken", "cognitoidentity"));
        let operation = Operation::new(request, ());
        assert_eq!(operation.metadata().map(Metadata::service), Some("cognitoidentity"));
        let (request, parts) = operation.into_request_response();
        assert_eq!(request.metadata(), parts.metadata.as_ref());
    }
}
