/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::signer::{
    OperationSigningConfig, RequestConfig, SigV4Signer, SigningError, SigningRequirements,
};
use aws_auth::{Credentials, CredentialsError, CredentialsProvider};
use aws_types::{SigningRegion, SigningService};
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::pipeline::Handler;
use smithy_http::property_bag::PropertyBag;
use std::time::SystemTime;
use thiserror::Error;

/// Name under which [`SigV4SigningStage`] is registered in the sign stage.
pub const SIGV4_HANDLER_NAME: &str = "sigv4";

/// Middleware stage to sign requests with SigV4
///
/// SigV4SigningStage will load configuration from the request property bag and add
/// a signature.
///
/// Prior to signing, the following fields MUST be present in the property bag:
/// - [`SigningRegion`](SigningRegion): The region used when signing the request, eg. `us-east-1`
/// - [`SigningService`](SigningService): The name of the service to use when signing the request, eg. `cognito-identity`
/// - [`CredentialsProvider`](CredentialsProvider): A credentials provider to retrieve credentials
/// - [`OperationSigningConfig`](OperationSigningConfig): Operation specific signing configuration, eg.
///   changes to URL encoding behavior, or headers that must be omitted.
///
/// If any of these fields are missing, the middleware will return an error.
///
/// The following fields MAY be present in the property bag:
/// - [`SystemTime`](SystemTime): The timestamp to use when signing the request. If this field is not present
///   [`SystemTime::now`](SystemTime::now) will be used.
///
/// After signing, the computed [`Signature`](crate::signer::Signature) is inserted into the bag.
#[derive(Clone, Debug)]
pub struct SigV4SigningStage {
    signer: SigV4Signer,
}

impl SigV4SigningStage {
    pub fn new(signer: SigV4Signer) -> Self {
        Self { signer }
    }

    /// This stage wrapped as a sign stage [`Handler`].
    pub fn handler(signer: SigV4Signer) -> Handler {
        Handler::new(SIGV4_HANDLER_NAME, Self::new(signer))
    }
}

#[derive(Debug, Error)]
pub enum SigningStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
    #[error("No signing region in the property bag")]
    MissingSigningRegion,
    #[error("No signing service in the property bag")]
    MissingSigningService,
    #[error("No signing configuration in the property bag")]
    MissingSigningConfig,
    #[error("Signing failed")]
    SigningFailure(#[source] SigningError),
    #[error("Failed to load credentials from the credentials provider")]
    CredentialsLoadingError(#[from] CredentialsError),
}

enum SigningDecision {
    Skip,
    Sign(Credentials),
}

/// Decide from the signing requirements whether to sign, loading credentials if so.
fn signing_decision(
    operation_config: &OperationSigningConfig,
    config: &PropertyBag,
) -> Result<SigningDecision, SigningStageError> {
    if operation_config.signing_requirements == SigningRequirements::Disabled {
        return Ok(SigningDecision::Skip);
    }
    let cred_provider = config
        .get::<CredentialsProvider>()
        .ok_or(SigningStageError::MissingCredentialsProvider)?;
    match (
        cred_provider.provide_credentials(),
        operation_config.signing_requirements,
    ) {
        (Ok(creds), _) => Ok(SigningDecision::Sign(creds)),
        (Err(err), SigningRequirements::Optional) => {
            tracing::debug!(error = %err, "no credentials available, sending request unsigned");
            Ok(SigningDecision::Skip)
        }
        (Err(err), _) => Err(err.into()),
    }
}

impl MapRequest for SigV4SigningStage {
    type Error = SigningStageError;

    fn apply(&self, req: Request) -> Result<Request, Self::Error> {
        req.augment(|mut req, config| {
            let operation_config = config
                .get::<OperationSigningConfig>()
                .ok_or(SigningStageError::MissingSigningConfig)?;
            let creds = match signing_decision(operation_config, config)? {
                SigningDecision::Skip => return Ok(req),
                SigningDecision::Sign(creds) => creds,
            };
            let region = config
                .get::<SigningRegion>()
                .ok_or(SigningStageError::MissingSigningRegion)?;
            let service = config
                .get::<SigningService>()
                .ok_or(SigningStageError::MissingSigningService)?;
            let request_config = RequestConfig {
                request_ts: config
                    .get::<SystemTime>()
                    .copied()
                    .unwrap_or_else(SystemTime::now),
                region,
                service,
                payload_override: None,
            };
            let signature = self
                .signer
                .sign(operation_config, &request_config, &creds, &mut req)
                .map_err(SigningStageError::SigningFailure)?;
            tracing::debug!(
                service = service.as_ref(),
                region = region.as_ref(),
                "signed request"
            );
            config.insert(signature);
            Ok(req)
        })
    }
}
