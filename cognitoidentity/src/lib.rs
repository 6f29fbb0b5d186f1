/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Amazon Cognito Identity
//!
//! `GetId`, `GetOpenIdToken` and `GetCredentialsForIdentity` are how an application obtains
//! AWS credentials in the first place, so they are sent without a SigV4 signature. Every other
//! operation is signed. The split is made per request by the [`Config`]'s
//! [`InitRequest`](smithy_http::pipeline::InitRequest) hook, which defaults to
//! [`operation::signing_policy`].

mod client;
mod config;
pub mod error;
pub mod input;
pub mod operation;
pub mod output;
pub mod protocol;

pub use aws_auth::Credentials;
pub use aws_types::Region;
pub use client::Client;
pub use config::{Builder as ConfigBuilder, Config};
pub use error::{BuildError, CognitoIdentityError, ErrorKind};

pub static PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
