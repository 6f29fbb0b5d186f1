/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod env;

use crate::Credentials;
use smithy_http::property_bag::PropertyBag;
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("no credentials were loaded")]
    CredentialsNotLoaded,
    #[error(transparent)]
    Unhandled(Box<dyn Error + Send + Sync + 'static>),
}

pub type CredentialsResult = Result<Credentials, CredentialsError>;

/// A synchronous credentials provider
///
/// Signing runs inside the request pipeline, which is synchronous, so providers are too.
pub trait ProvideCredentials: Send + Sync {
    fn provide_credentials(&self) -> CredentialsResult;
}

pub type CredentialsProvider = Arc<dyn ProvideCredentials>;

pub fn default_provider() -> impl ProvideCredentials {
    env::EnvironmentVariableCredentialsProvider::new()
}

impl ProvideCredentials for Credentials {
    fn provide_credentials(&self) -> CredentialsResult {
        Ok(self.clone())
    }
}

/// Stub Provider for use when no credentials provider is used
///
/// Operations that must be signed fail at the sign stage. Unsigned operations never ask.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct NoCredentials;

impl ProvideCredentials for NoCredentials {
    fn provide_credentials(&self) -> CredentialsResult {
        Err(CredentialsError::CredentialsNotLoaded)
    }
}

pub fn set_provider(config: &mut PropertyBag, provider: CredentialsProvider) {
    config.insert(provider);
}
