/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod dispatch;
pub mod parse_response;

use smithy_http::result::SdkError;
use tower::BoxError;

/// An Error Occurred During the process of sending an Operation
///
/// The variants are split to enable the final [SdkError](`smithy_http::result::SdkError`) to differentiate
/// between two types of errors:
/// 1. [`RequestConstructionError`](SendOperationError::RequestConstructionError): Errors where the
///    SDK never attempted to dispatch the underlying `http::Request`. These represent errors that
///    occurred while running the request's handler stages.
/// 2. [`RequestDispatchError`](SendOperationError::RequestDispatchError): Errors where the http
///    request was dispatched but an http response was not received.
#[derive(Debug, thiserror::Error)]
pub enum SendOperationError {
    /// The request could not be constructed
    #[error("the request could not be constructed")]
    RequestConstructionError(#[source] BoxError),

    /// The request could not be dispatched
    #[error("the request could not be dispatched")]
    RequestDispatchError(#[source] BoxError),
}

/// Convert a `SendOperationError` into an `SdkError`
impl<E, B> From<SendOperationError> for SdkError<E, B> {
    fn from(err: SendOperationError) -> Self {
        match err {
            SendOperationError::RequestDispatchError(e) => SdkError::DispatchFailure(e),
            SendOperationError::RequestConstructionError(e) => SdkError::ConstructionFailure(e),
        }
    }
}
