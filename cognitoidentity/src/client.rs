/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::CognitoIdentityError;
use crate::input::{
    CognitoOperation, DescribeIdentityPoolInput, GetCredentialsForIdentityInput, GetIdInput,
    GetOpenIdTokenInput, ListIdentityPoolsInput,
};
use crate::output::{
    DescribeIdentityPoolOutput, GetCredentialsForIdentityOutput, GetIdOutput,
    GetOpenIdTokenOutput, ListIdentityPoolsOutput,
};
use crate::protocol::make_operation;
use bytes::Bytes;
use smithy_http::body::SdkBody;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http_tower::dispatch::DispatchLayer;
use smithy_http_tower::parse_response::ParseResponseLayer;
use tower::{BoxError, Service, ServiceBuilder, ServiceExt};

/// Amazon Cognito Identity client
///
/// `C` is the connector: any `tower::Service` that sends an `http::Request<SdkBody>`.
///
/// ```rust
/// use cognitoidentity::{Client, Config, Region};
/// use smithy_http::body::SdkBody;
/// use std::convert::Infallible;
///
/// let conn = tower::service_fn(|_req: http::Request<SdkBody>| async {
///     Ok::<_, Infallible>(http::Response::new(SdkBody::from(r#"{"IdentityId":"us-east-1:abc"}"#)))
/// });
/// let client = Client::from_conf_conn(
///     Config::builder().region(Region::new("us-east-1")).build(),
///     conn,
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Client<C> {
    connector: C,
    config: Config,
}

impl<C> Client<C> {
    pub fn from_conf_conn(config: Config, connector: C) -> Self {
        Client { connector, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<C, B> Client<C>
where
    C: Service<http::Request<SdkBody>, Response = http::Response<B>> + Clone + Send + 'static,
    C::Error: Into<BoxError>,
    C::Future: Send + 'static,
    B: http_body::Body + Unpin + From<Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    /// Dispatch an already constructed operation.
    pub async fn call<O, T, E>(&self, operation: Operation<O>) -> Result<SdkSuccess<T, B>, SdkError<E, B>>
    where
        O: ParseHttpResponse<B, Output = Result<T, E>> + Send + Sync + 'static,
    {
        let mut svc = ServiceBuilder::new()
            .layer(ParseResponseLayer::<O>::new())
            .layer(DispatchLayer::new())
            .service(self.connector.clone());
        svc.ready().await?.call(operation).await
    }

    /// Build and dispatch `input`, returning the parsed output.
    pub async fn send<I>(&self, input: &I) -> Result<I::Output, SdkError<CognitoIdentityError, B>>
    where
        I: CognitoOperation,
        I::Output: 'static,
    {
        let operation = make_operation(&self.config, input)
            .map_err(|err| SdkError::ConstructionFailure(err.into()))?;
        Ok(self.call(operation).await?.parsed)
    }

    /// Unsigned
    pub async fn get_id(
        &self,
        input: GetIdInput,
    ) -> Result<GetIdOutput, SdkError<CognitoIdentityError, B>> {
        self.send(&input).await
    }

    /// Unsigned
    pub async fn get_open_id_token(
        &self,
        input: GetOpenIdTokenInput,
    ) -> Result<GetOpenIdTokenOutput, SdkError<CognitoIdentityError, B>> {
        self.send(&input).await
    }

    /// Unsigned
    pub async fn get_credentials_for_identity(
        &self,
        input: GetCredentialsForIdentityInput,
    ) -> Result<GetCredentialsForIdentityOutput, SdkError<CognitoIdentityError, B>> {
        self.send(&input).await
    }

    pub async fn describe_identity_pool(
        &self,
        input: DescribeIdentityPoolInput,
    ) -> Result<DescribeIdentityPoolOutput, SdkError<CognitoIdentityError, B>> {
        self.send(&input).await
    }

    pub async fn list_identity_pools(
        &self,
        input: ListIdentityPoolsInput,
    ) -> Result<ListIdentityPoolsOutput, SdkError<CognitoIdentityError, B>> {
        self.send(&input).await
    }
}
