/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! awsJson1.1 request construction and response parsing

use crate::config::Config;
use crate::error::{parse_error, BuildError, CognitoIdentityError};
use crate::input::CognitoOperation;
use crate::operation::{SERVICE_NAME, SIGNING_SERVICE};
use aws_endpoint::{set_endpoint_resolver, AwsEndpointStage};
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::{OperationSigningConfig, SigV4Signer};
use aws_types::SigningService;
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use smithy_http::body::SdkBody;
use smithy_http::operation::{self, Metadata, Operation};
use smithy_http::pipeline::Stage;
use smithy_http::response::ParseStrictResponse;
use std::marker::PhantomData;

const CONTENT_TYPE_JSON_1_1: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "AWSCognitoIdentityService";

/// Parses a 2xx body into `O` and anything else into a [`CognitoIdentityError`].
pub struct JsonResponseHandler<O> {
    _output: PhantomData<fn() -> O>,
}

impl<O> JsonResponseHandler<O> {
    pub fn new() -> Self {
        JsonResponseHandler {
            _output: PhantomData,
        }
    }
}

impl<O> Default for JsonResponseHandler<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for JsonResponseHandler<O> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<O> std::fmt::Debug for JsonResponseHandler<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonResponseHandler").finish()
    }
}

impl<O> ParseStrictResponse for JsonResponseHandler<O>
where
    O: DeserializeOwned,
{
    type Output = Result<O, CognitoIdentityError>;

    fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
        if !response.status().is_success() {
            let err = parse_error(response);
            tracing::debug!(status = response.status().as_u16(), error = %err, "service returned an error");
            return Err(err);
        }
        // An empty body is an output with every field unset
        let body: &[u8] = if response.body().is_empty() {
            b"{}"
        } else {
            response.body()
        };
        serde_json::from_slice(body).map_err(CognitoIdentityError::unhandled)
    }
}

/// Build the operation for `input`.
///
/// The request gets the service's default handlers (endpoint resolution in the build stage,
/// SigV4 in the sign stage) and is then passed to the configured
/// [`InitRequest`](smithy_http::pipeline::InitRequest) hook, which by default clears the sign
/// stage for the unsigned operations.
pub fn make_operation<I>(
    config: &Config,
    input: &I,
) -> Result<Operation<JsonResponseHandler<I::Output>>, BuildError>
where
    I: CognitoOperation,
{
    input.validate()?;
    let body = serde_json::to_vec(input)?;
    let http_request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/")
        .header(CONTENT_TYPE, CONTENT_TYPE_JSON_1_1)
        .header(CONTENT_LENGTH, body.len())
        .header("x-amz-target", format!("{}.{}", TARGET_PREFIX, I::NAME))
        .body(SdkBody::from(body))?;

    let mut request = operation::Request::new(http_request)
        .with_metadata(Metadata::new(I::NAME, SERVICE_NAME));
    {
        let mut bag = request.config_mut();
        if let Some(region) = &config.region {
            bag.insert(region.clone());
        }
        bag.insert(SigningService::from_static(SIGNING_SERVICE));
        bag.insert(OperationSigningConfig::default_config());
        aws_auth::provider::set_provider(&mut bag, config.credentials_provider.clone());
        set_endpoint_resolver(&mut bag, config.endpoint_resolver.clone());
    }
    let handlers = request.handlers_mut();
    handlers
        .stage_mut(Stage::Build)
        .push_back(AwsEndpointStage::handler());
    handlers
        .stage_mut(Stage::Sign)
        .push_back(SigV4SigningStage::handler(SigV4Signer::new()));

    config.init_request.init_request(&mut request);
    Ok(Operation::new(request, JsonResponseHandler::new()))
}
