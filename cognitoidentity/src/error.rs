/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use bytes::Bytes;
use serde::Deserialize;
use std::error::Error;

type BoxError = Box<dyn Error + Send + Sync>;

/// An operation could not be turned into a request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("{operation} is missing required field `{field}`")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
    #[error("failed to serialize the request body")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid HTTP request")]
    InvalidRequest(#[from] http::Error),
}

/// The error code of a [`CognitoIdentityError`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("ExternalServiceException")]
    ExternalServiceException,
    #[error("InternalErrorException")]
    InternalErrorException,
    #[error("InvalidIdentityPoolConfigurationException")]
    InvalidIdentityPoolConfigurationException,
    #[error("InvalidParameterException")]
    InvalidParameterException,
    #[error("LimitExceededException")]
    LimitExceededException,
    #[error("NotAuthorizedException")]
    NotAuthorizedException,
    #[error("ResourceConflictException")]
    ResourceConflictException,
    #[error("ResourceNotFoundException")]
    ResourceNotFoundException,
    #[error("TooManyRequestsException")]
    TooManyRequestsException,
    /// An error code this client doesn't know about
    #[error("{0}")]
    Unmodeled(String),
    /// The response couldn't be parsed at all
    #[error("unhandled error")]
    Unhandled(#[source] BoxError),
}

impl ErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ExternalServiceException" => ErrorKind::ExternalServiceException,
            "InternalErrorException" => ErrorKind::InternalErrorException,
            "InvalidIdentityPoolConfigurationException" => {
                ErrorKind::InvalidIdentityPoolConfigurationException
            }
            "InvalidParameterException" => ErrorKind::InvalidParameterException,
            "LimitExceededException" => ErrorKind::LimitExceededException,
            "NotAuthorizedException" => ErrorKind::NotAuthorizedException,
            "ResourceConflictException" => ErrorKind::ResourceConflictException,
            "ResourceNotFoundException" => ErrorKind::ResourceNotFoundException,
            "TooManyRequestsException" => ErrorKind::TooManyRequestsException,
            other => ErrorKind::Unmodeled(other.to_string()),
        }
    }
}

/// An error returned by Amazon Cognito Identity
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct CognitoIdentityError {
    #[source]
    pub kind: ErrorKind,
    pub message: Option<String>,
    pub request_id: Option<String>,
}

impl CognitoIdentityError {
    pub fn new(kind: ErrorKind, message: Option<String>) -> Self {
        CognitoIdentityError {
            kind,
            message,
            request_id: None,
        }
    }

    pub fn unhandled(err: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Unhandled(err.into()), None)
    }

    pub fn code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Unmodeled(code) => Some(code),
            ErrorKind::Unhandled(_) => None,
            _ => Some(self.kind_name()),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            ErrorKind::ExternalServiceException => "ExternalServiceException",
            ErrorKind::InternalErrorException => "InternalErrorException",
            ErrorKind::InvalidIdentityPoolConfigurationException => {
                "InvalidIdentityPoolConfigurationException"
            }
            ErrorKind::InvalidParameterException => "InvalidParameterException",
            ErrorKind::LimitExceededException => "LimitExceededException",
            ErrorKind::NotAuthorizedException => "NotAuthorizedException",
            ErrorKind::ResourceConflictException => "ResourceConflictException",
            ErrorKind::ResourceNotFoundException => "ResourceNotFoundException",
            ErrorKind::TooManyRequestsException => "TooManyRequestsException",
            ErrorKind::Unmodeled(_) | ErrorKind::Unhandled(_) => "Unknown",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TooManyRequestsException | ErrorKind::InternalErrorException
        )
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(rename = "__type")]
    code: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Strip the namespace and any `:`-suffixed metadata from an awsJson error code.
///
/// `aws.protocoltests.restjson#FooError:http://internal.amazon.com/...` becomes `FooError`.
fn sanitize_error_code(code: &str) -> &str {
    let code = code.split(':').next().unwrap_or(code);
    match code.rfind('#') {
        Some(idx) => &code[idx + 1..],
        None => code,
    }
}

/// Parse an awsJson1.1 error response.
///
/// The code comes from the body's `__type`, falling back to the `x-amzn-errortype` header.
pub(crate) fn parse_error(response: &http::Response<Bytes>) -> CognitoIdentityError {
    let body: ErrorBody = if response.body().is_empty() {
        ErrorBody::default()
    } else {
        match serde_json::from_slice(response.body()) {
            Ok(body) => body,
            Err(err) => return CognitoIdentityError::unhandled(err),
        }
    };
    let header_code = response
        .headers()
        .get("x-amzn-errortype")
        .and_then(|value| value.to_str().ok());
    let code = body.code.as_deref().or(header_code);
    let kind = match code {
        Some(code) => ErrorKind::from_code(sanitize_error_code(code)),
        None => ErrorKind::Unhandled(
            format!("error response without an error code (status {})", response.status()).into(),
        ),
    };
    let request_id = response
        .headers()
        .get("x-amzn-requestid")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    CognitoIdentityError {
        kind,
        message: body.message,
        request_id,
    }
}
