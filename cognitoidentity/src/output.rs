/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetIdOutput {
    pub identity_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetOpenIdTokenOutput {
    pub identity_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetCredentialsForIdentityOutput {
    pub identity_id: Option<String>,
    pub credentials: Option<Credentials>,
}

/// Temporary credentials vended for an identity.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Credentials {
    pub access_key_id: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    /// Epoch seconds
    pub expiration: Option<f64>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl Credentials {
    pub fn expiry(&self) -> Option<SystemTime> {
        self.expiration
            .filter(|secs| secs.is_finite() && *secs >= 0.0 && *secs < u64::MAX as f64)
            .and_then(|secs| UNIX_EPOCH.checked_add(Duration::from_secs_f64(secs)))
    }

    /// Convert into credentials that can sign other requests.
    ///
    /// Returns `None` unless both the access key and the secret key are present.
    pub fn into_aws_credentials(self) -> Option<aws_auth::Credentials> {
        let expiry = self.expiry();
        Some(aws_auth::Credentials::new(
            self.access_key_id?,
            self.secret_key?,
            self.session_token,
            expiry,
            "CognitoIdentity",
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeIdentityPoolOutput {
    pub identity_pool_id: Option<String>,
    pub identity_pool_name: Option<String>,
    pub allow_unauthenticated_identities: Option<bool>,
    pub allow_classic_flow: Option<bool>,
    pub developer_provider_name: Option<String>,
    #[serde(rename = "OpenIdConnectProviderARNs")]
    pub open_id_connect_provider_arns: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListIdentityPoolsOutput {
    pub identity_pools: Option<Vec<IdentityPoolShortDescription>>,
    pub next_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdentityPoolShortDescription {
    pub identity_pool_id: Option<String>,
    pub identity_pool_name: Option<String>,
}

#[cfg(test)]
mod test {
    use crate::output::{DescribeIdentityPoolOutput, GetCredentialsForIdentityOutput};
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn credentials_convert() {
        let output: GetCredentialsForIdentityOutput = serde_json::from_str(
            r#"{
                "IdentityId": "us-east-1:id",
                "Credentials": {
                    "AccessKeyId": "ASIAEXAMPLE",
                    "SecretKey": "secret",
                    "SessionToken": "token",
                    "Expiration": 1614952162.0
                }
            }"#,
        )
        .unwrap();
        let creds = output.credentials.unwrap();
        assert!(!format!("{:?}", creds).contains("secret\""));
        let creds = creds.into_aws_credentials().expect("keys are present");
        assert_eq!(creds.access_key_id(), "ASIAEXAMPLE");
        assert_eq!(creds.session_token(), Some("token"));
        assert_eq!(creds.expiry(), Some(UNIX_EPOCH + Duration::from_secs(1614952162)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let output: DescribeIdentityPoolOutput = serde_json::from_str(
            r#"{"IdentityPoolId":"us-east-1:pool","AllowUnauthenticatedIdentities":true,"SupportedLoginProviders":{}}"#,
        )
        .unwrap();
        assert_eq!(output.identity_pool_id.as_deref(), Some("us-east-1:pool"));
        assert_eq!(output.allow_unauthenticated_identities, Some(true));
    }
}
