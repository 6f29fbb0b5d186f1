/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Region-based endpoint resolution for AWS services.

use aws_types::{Region, SigningRegion};
use http::uri::{InvalidUri, Uri};
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::pipeline::Handler;
use smithy_http::property_bag::PropertyBag;
use std::error::Error;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

type BoxError = Box<dyn Error + Send + Sync>;

/// A resolved endpoint: where to send the request and which region to sign it for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsEndpoint {
    uri: Uri,
    signing_region: Option<SigningRegion>,
}

impl AwsEndpoint {
    pub fn new(uri: Uri, signing_region: Option<SigningRegion>) -> Self {
        AwsEndpoint {
            uri,
            signing_region,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn signing_region(&self) -> Option<&SigningRegion> {
        self.signing_region.as_ref()
    }

    /// Replace the scheme and authority of `request_uri`, keeping its path and query.
    pub fn set_endpoint(&self, request_uri: &mut Uri) -> Result<(), http::Error> {
        let endpoint = self.uri.clone().into_parts();
        let mut builder = Uri::builder();
        if let Some(scheme) = endpoint.scheme {
            builder = builder.scheme(scheme);
        }
        if let Some(authority) = endpoint.authority {
            builder = builder.authority(authority);
        }
        let path_and_query = request_uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        *request_uri = builder.path_and_query(path_and_query).build()?;
        Ok(())
    }
}

/// Resolve the endpoint for a region.
pub trait ResolveAwsEndpoint: Send + Sync + Debug {
    fn endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError>;
}

pub type SharedEndpointResolver = Arc<dyn ResolveAwsEndpoint>;

/// `https://{service}.{region}.amazonaws.com`, signed for the same region.
#[derive(Clone, Debug)]
pub struct DefaultAwsEndpointResolver {
    service: &'static str,
}

impl DefaultAwsEndpointResolver {
    pub fn for_service(service: &'static str) -> Self {
        DefaultAwsEndpointResolver { service }
    }
}

impl ResolveAwsEndpoint for DefaultAwsEndpointResolver {
    fn endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        let uri = Uri::from_str(&format!(
            "https://{}.{}.amazonaws.com",
            self.service,
            region.as_ref()
        ))?;
        Ok(AwsEndpoint::new(uri, Some(region.clone().into())))
    }
}

/// Always resolve to the same endpoint, eg. a local mock of the service.
#[derive(Clone, Debug)]
pub struct StaticEndpoint(Uri);

impl StaticEndpoint {
    pub fn from_uri(uri: Uri) -> Self {
        StaticEndpoint(uri)
    }
}

impl FromStr for StaticEndpoint {
    type Err = InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StaticEndpoint(Uri::from_str(s)?))
    }
}

impl ResolveAwsEndpoint for StaticEndpoint {
    fn endpoint(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        Ok(AwsEndpoint::new(self.0.clone(), Some(region.clone().into())))
    }
}

pub fn set_endpoint_resolver(config: &mut PropertyBag, provider: SharedEndpointResolver) {
    config.insert(provider);
}

pub const ENDPOINT_HANDLER_NAME: &str = "endpoint";

/// Build stage handler that points the request at the resolved endpoint
///
/// Reads `Region` and the [`SharedEndpointResolver`] from the property bag. On success the
/// request URI is rewritten and a [`SigningRegion`] is inserted into the bag.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct AwsEndpointStage;

impl AwsEndpointStage {
    pub fn handler() -> Handler {
        Handler::new(ENDPOINT_HANDLER_NAME, AwsEndpointStage)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AwsEndpointStageError {
    #[error("no endpoint resolver in the property bag")]
    NoEndpointResolver,
    #[error("no region in the property bag")]
    NoRegion,
    #[error("failed to resolve the endpoint")]
    EndpointResolution(#[source] BoxError),
}

impl MapRequest for AwsEndpointStage {
    type Error = AwsEndpointStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut http_req, config| {
            let provider = config
                .get::<SharedEndpointResolver>()
                .ok_or(AwsEndpointStageError::NoEndpointResolver)?;
            let region = config
                .get::<Region>()
                .ok_or(AwsEndpointStageError::NoRegion)?;
            let endpoint = provider
                .endpoint(region)
                .map_err(AwsEndpointStageError::EndpointResolution)?;
            let signing_region = endpoint
                .signing_region()
                .cloned()
                .unwrap_or_else(|| region.clone().into());
            endpoint
                .set_endpoint(http_req.uri_mut())
                .map_err(|err| AwsEndpointStageError::EndpointResolution(err.into()))?;
            tracing::debug!(uri = %http_req.uri(), "resolved endpoint");
            config.insert(signing_region);
            Ok(http_req)
        })
    }
}
