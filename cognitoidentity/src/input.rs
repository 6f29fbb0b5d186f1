/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs
//!
//! Each input is serialized as the awsJson1.1 request body. Required fields are `Option`s so
//! that a missing value is reported as a [`BuildError`] rather than being unrepresentable.

use crate::error::BuildError;
use crate::operation::{
    DESCRIBE_IDENTITY_POOL, GET_CREDENTIALS_FOR_IDENTITY, GET_ID, GET_OPEN_ID_TOKEN,
    LIST_IDENTITY_POOLS,
};
use crate::output::{
    DescribeIdentityPoolOutput, GetCredentialsForIdentityOutput, GetIdOutput,
    GetOpenIdTokenOutput, ListIdentityPoolsOutput,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// An input that can be sent to Cognito Identity.
pub trait CognitoOperation: Serialize {
    /// The operation name, used for `x-amz-target` and the request's metadata.
    const NAME: &'static str;

    type Output: DeserializeOwned;

    /// Check that every required field is set.
    fn validate(&self) -> Result<(), BuildError>;
}

fn required<T>(
    operation: &'static str,
    field: &'static str,
    value: &Option<T>,
) -> Result<(), BuildError> {
    match value {
        Some(_) => Ok(()),
        None => Err(BuildError::MissingField { operation, field }),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub identity_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins: Option<HashMap<String, String>>,
}

impl GetIdInput {
    pub fn builder() -> GetIdInputBuilder {
        GetIdInputBuilder::default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetIdInputBuilder {
    inner: GetIdInput,
}

impl GetIdInputBuilder {
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.inner.account_id = Some(account_id.into());
        self
    }

    pub fn identity_pool_id(mut self, identity_pool_id: impl Into<String>) -> Self {
        self.inner.identity_pool_id = Some(identity_pool_id.into());
        self
    }

    /// Add a provider token, eg. `graph.facebook.com` to an access token.
    pub fn login(mut self, provider: impl Into<String>, token: impl Into<String>) -> Self {
        self.inner
            .logins
            .get_or_insert_with(HashMap::new)
            .insert(provider.into(), token.into());
        self
    }

    pub fn build(self) -> GetIdInput {
        self.inner
    }
}

impl CognitoOperation for GetIdInput {
    const NAME: &'static str = GET_ID;
    type Output = GetIdOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(Self::NAME, "IdentityPoolId", &self.identity_pool_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetOpenIdTokenInput {
    pub identity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins: Option<HashMap<String, String>>,
}

impl GetOpenIdTokenInput {
    pub fn builder() -> GetOpenIdTokenInputBuilder {
        GetOpenIdTokenInputBuilder::default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetOpenIdTokenInputBuilder {
    inner: GetOpenIdTokenInput,
}

impl GetOpenIdTokenInputBuilder {
    pub fn identity_id(mut self, identity_id: impl Into<String>) -> Self {
        self.inner.identity_id = Some(identity_id.into());
        self
    }

    pub fn login(mut self, provider: impl Into<String>, token: impl Into<String>) -> Self {
        self.inner
            .logins
            .get_or_insert_with(HashMap::new)
            .insert(provider.into(), token.into());
        self
    }

    pub fn build(self) -> GetOpenIdTokenInput {
        self.inner
    }
}

impl CognitoOperation for GetOpenIdTokenInput {
    const NAME: &'static str = GET_OPEN_ID_TOKEN;
    type Output = GetOpenIdTokenOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(Self::NAME, "IdentityId", &self.identity_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCredentialsForIdentityInput {
    pub identity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logins: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_role_arn: Option<String>,
}

impl GetCredentialsForIdentityInput {
    pub fn builder() -> GetCredentialsForIdentityInputBuilder {
        GetCredentialsForIdentityInputBuilder::default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GetCredentialsForIdentityInputBuilder {
    inner: GetCredentialsForIdentityInput,
}

impl GetCredentialsForIdentityInputBuilder {
    pub fn identity_id(mut self, identity_id: impl Into<String>) -> Self {
        self.inner.identity_id = Some(identity_id.into());
        self
    }

    pub fn login(mut self, provider: impl Into<String>, token: impl Into<String>) -> Self {
        self.inner
            .logins
            .get_or_insert_with(HashMap::new)
            .insert(provider.into(), token.into());
        self
    }

    pub fn custom_role_arn(mut self, custom_role_arn: impl Into<String>) -> Self {
        self.inner.custom_role_arn = Some(custom_role_arn.into());
        self
    }

    pub fn build(self) -> GetCredentialsForIdentityInput {
        self.inner
    }
}

impl CognitoOperation for GetCredentialsForIdentityInput {
    const NAME: &'static str = GET_CREDENTIALS_FOR_IDENTITY;
    type Output = GetCredentialsForIdentityOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(Self::NAME, "IdentityId", &self.identity_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeIdentityPoolInput {
    pub identity_pool_id: Option<String>,
}

impl DescribeIdentityPoolInput {
    pub fn new(identity_pool_id: impl Into<String>) -> Self {
        DescribeIdentityPoolInput {
            identity_pool_id: Some(identity_pool_id.into()),
        }
    }
}

impl CognitoOperation for DescribeIdentityPoolInput {
    const NAME: &'static str = DESCRIBE_IDENTITY_POOL;
    type Output = DescribeIdentityPoolOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(Self::NAME, "IdentityPoolId", &self.identity_pool_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIdentityPoolsInput {
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListIdentityPoolsInput {
    pub fn new(max_results: i32) -> Self {
        ListIdentityPoolsInput {
            max_results: Some(max_results),
            next_token: None,
        }
    }

    pub fn next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

impl CognitoOperation for ListIdentityPoolsInput {
    const NAME: &'static str = LIST_IDENTITY_POOLS;
    type Output = ListIdentityPoolsOutput;

    fn validate(&self) -> Result<(), BuildError> {
        required(Self::NAME, "MaxResults", &self.max_results)
    }
}

#[cfg(test)]
mod test {
    use crate::error::BuildError;
    use crate::input::{CognitoOperation, GetCredentialsForIdentityInput, GetIdInput, ListIdentityPoolsInput};

    #[test]
    fn serializes_pascal_case_and_skips_unset_fields() {
        let input = GetIdInput::builder()
            .identity_pool_id("us-east-1:pool")
            .build();
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"IdentityPoolId":"us-east-1:pool"}"#
        );

        let input = GetCredentialsForIdentityInput::builder()
            .identity_id("us-east-1:id")
            .login("accounts.google.com", "token")
            .build();
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"IdentityId":"us-east-1:id","Logins":{"accounts.google.com":"token"}}"#
        );

        let input = ListIdentityPoolsInput::new(10).next_token("abc");
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"MaxResults":10,"NextToken":"abc"}"#
        );
    }

    #[test]
    fn missing_required_field() {
        let err = GetIdInput::default().validate().expect_err("pool id is required");
        assert!(matches!(
            err,
            BuildError::MissingField {
                operation: "GetId",
                field: "IdentityPoolId"
            }
        ));
        assert_eq!(err.to_string(), "GetId is missing required field `IdentityPoolId`");
    }
}
