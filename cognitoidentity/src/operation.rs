/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation names and which of them are sent unsigned.

use aws_sig_auth::policy::{SigningPolicyResolver, UnsignedOperations};

/// Service name recorded in each request's operation metadata.
pub const SERVICE_NAME: &str = "cognitoidentity";

/// SigV4 signing name, also the endpoint prefix.
pub const SIGNING_SERVICE: &str = "cognito-identity";

pub const GET_ID: &str = "GetId";
pub const GET_OPEN_ID_TOKEN: &str = "GetOpenIdToken";
pub const GET_CREDENTIALS_FOR_IDENTITY: &str = "GetCredentialsForIdentity";
pub const DESCRIBE_IDENTITY_POOL: &str = "DescribeIdentityPool";
pub const LIST_IDENTITY_POOLS: &str = "ListIdentityPools";

/// Operations that bootstrap credentials and therefore can't require them.
pub const UNSIGNED_OPERATIONS: &[&str] = &[
    GET_CREDENTIALS_FOR_IDENTITY,
    GET_ID,
    GET_OPEN_ID_TOKEN,
];

pub fn unsigned_operations() -> UnsignedOperations {
    UnsignedOperations::from_static(UNSIGNED_OPERATIONS)
}

/// The default [`InitRequest`](smithy_http::pipeline::InitRequest) hook for this service.
pub fn signing_policy() -> SigningPolicyResolver {
    SigningPolicyResolver::new(unsigned_operations())
}
