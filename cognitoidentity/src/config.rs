/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::operation::{signing_policy, SIGNING_SERVICE};
use aws_auth::provider::NoCredentials;
use aws_auth::{CredentialsProvider, ProvideCredentials};
use aws_endpoint::{DefaultAwsEndpointResolver, ResolveAwsEndpoint, SharedEndpointResolver};
use aws_types::region::ProvideRegion;
use aws_types::Region;
use smithy_http::pipeline::{InitRequest, SharedInitRequest};
use std::fmt;
use std::sync::Arc;

/// Service configuration, shared by every request a [`Client`](crate::Client) builds.
///
/// ```rust
/// use cognitoidentity::{Config, Region};
///
/// let config = Config::builder().region(Region::new("us-east-1")).build();
/// assert_eq!(config.region(), Some(&Region::new("us-east-1")));
/// ```
#[derive(Clone)]
pub struct Config {
    pub(crate) region: Option<Region>,
    pub(crate) credentials_provider: CredentialsProvider,
    pub(crate) endpoint_resolver: SharedEndpointResolver,
    pub(crate) init_request: SharedInitRequest,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("endpoint_resolver", &self.endpoint_resolver)
            .field("init_request", &self.init_request)
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Region and credentials from `AWS_REGION`/`AWS_DEFAULT_REGION` and the `AWS_*` key
    /// variables.
    pub fn from_env() -> Self {
        Builder::default()
            .region(aws_types::region::default_provider())
            .credentials_provider(aws_auth::provider::default_provider())
            .build()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn init_request(&self) -> &SharedInitRequest {
        &self.init_request
    }
}

#[derive(Default)]
pub struct Builder {
    region: Option<Region>,
    credentials_provider: Option<CredentialsProvider>,
    endpoint_resolver: Option<SharedEndpointResolver>,
    init_request: Option<SharedInitRequest>,
}

impl Builder {
    pub fn region(mut self, region_provider: impl ProvideRegion) -> Self {
        self.region = region_provider.region();
        self
    }

    pub fn credentials_provider(
        mut self,
        credentials_provider: impl ProvideCredentials + 'static,
    ) -> Self {
        self.credentials_provider = Some(Arc::new(credentials_provider));
        self
    }

    pub fn endpoint_resolver(mut self, endpoint_resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(endpoint_resolver));
        self
    }

    /// Replace the hook run on every request after its default handlers are installed.
    ///
    /// Defaults to [`signing_policy`](crate::operation::signing_policy). A replacement that
    /// doesn't clear the sign stage makes every operation require credentials.
    pub fn init_request(mut self, init_request: impl InitRequest + 'static) -> Self {
        self.init_request = Some(Arc::new(init_request));
        self
    }

    pub fn build(self) -> Config {
        Config {
            region: self.region,
            credentials_provider: self
                .credentials_provider
                .unwrap_or_else(|| Arc::new(NoCredentials::default())),
            endpoint_resolver: self
                .endpoint_resolver
                .unwrap_or_else(|| Arc::new(DefaultAwsEndpointResolver::for_service(SIGNING_SERVICE))),
            init_request: self
                .init_request
                .unwrap_or_else(|| Arc::new(signing_policy())),
        }
    }
}
