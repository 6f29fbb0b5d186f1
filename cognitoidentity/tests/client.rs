/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use cognitoidentity::input::{DescribeIdentityPoolInput, GetCredentialsForIdentityInput, GetIdInput};
use cognitoidentity::protocol::make_operation;
use cognitoidentity::{Client, CognitoIdentityError, Config, Credentials, ErrorKind, Region};
use http::header::AUTHORIZATION;
use smithy_http::body::SdkBody;
use smithy_http::pipeline::NoopInitRequest;
use smithy_http::result::SdkError;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::{Duration, UNIX_EPOCH};

type Captured = Arc<Mutex<Vec<http::Request<SdkBody>>>>;

/// Connector that records every request and answers with a fixed status and body.
fn test_connection(
    status: u16,
    body: &'static str,
) -> (
    impl tower::Service<
            http::Request<SdkBody>,
            Response = http::Response<SdkBody>,
            Error = Infallible,
            Future = impl Send,
        > + Clone
        + Send
        + 'static,
    Captured,
) {
    let captured: Captured = Default::default();
    let requests = captured.clone();
    let conn = tower::service_fn(move |req: http::Request<SdkBody>| {
        requests.lock().unwrap().push(req);
        async move {
            Ok::<_, Infallible>(
                http::Response::builder()
                    .status(status)
                    .body(SdkBody::from(body))
                    .unwrap(),
            )
        }
    });
    (conn, captured)
}

fn config() -> cognitoidentity::ConfigBuilder {
    Config::builder().region(Region::new("us-east-1"))
}

#[tokio::test]
async fn get_id_is_sent_unsigned_without_credentials() {
    let (conn, requests) = test_connection(200, r#"{"IdentityId":"us-east-1:0000-abcd"}"#);
    let client = Client::from_conf_conn(config().build(), conn);

    let output = client
        .get_id(GetIdInput::builder().identity_pool_id("us-east-1:pool").build())
        .await
        .expect("unsigned operations need no credentials");
    assert_eq!(output.identity_id.as_deref(), Some("us-east-1:0000-abcd"));

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert!(req.headers().get(AUTHORIZATION).is_none());
    assert!(req.headers().get("x-amz-date").is_none());
    assert_eq!(
        req.uri(),
        &http::Uri::from_static("https://cognito-identity.us-east-1.amazonaws.com/")
    );
    assert_eq!(
        req.headers().get("x-amz-target").unwrap(),
        "AWSCognitoIdentityService.GetId"
    );
}

#[tokio::test]
async fn get_credentials_for_identity_ignores_configured_credentials() {
    let (conn, requests) = test_connection(
        200,
        r#"{"IdentityId":"us-east-1:id","Credentials":{"AccessKeyId":"ASIAEXAMPLE","SecretKey":"s","SessionToken":"t","Expiration":1.6149521E9}}"#,
    );
    let client = Client::from_conf_conn(
        config()
            .credentials_provider(Credentials::from_keys("AKIDEXAMPLE", "secret", None))
            .build(),
        conn,
    );
    let output = client
        .get_credentials_for_identity(
            GetCredentialsForIdentityInput::builder()
                .identity_id("us-east-1:id")
                .build(),
        )
        .await
        .expect("success");
    let creds = output
        .credentials
        .and_then(|creds| creds.into_aws_credentials())
        .expect("credentials returned");
    assert_eq!(creds.access_key_id(), "ASIAEXAMPLE");
    assert!(requests.lock().unwrap()[0]
        .headers()
        .get(AUTHORIZATION)
        .is_none());
}

#[tokio::test]
async fn describe_identity_pool_is_signed() {
    let (conn, requests) = test_connection(
        200,
        r#"{"IdentityPoolId":"us-east-1:pool","IdentityPoolName":"pool","AllowUnauthenticatedIdentities":false}"#,
    );
    let config = config()
        .credentials_provider(Credentials::from_keys("AKIDEXAMPLE", "secret", None))
        .build();
    let client = Client::from_conf_conn(config.clone(), conn);

    let mut op = make_operation(&config, &DescribeIdentityPoolInput::new("us-east-1:pool"))
        .expect("valid input");
    op.request_mut()
        .config_mut()
        .insert(UNIX_EPOCH + Duration::from_secs(1614952162));
    let resp = client.call(op).await.expect("success");
    assert_eq!(resp.parsed.identity_pool_name.as_deref(), Some("pool"));

    let requests = requests.lock().unwrap();
    let auth = requests[0]
        .headers()
        .get(AUTHORIZATION)
        .expect("signed")
        .to_str()
        .unwrap();
    assert!(auth.starts_with(
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20210305/us-east-1/cognito-identity/aws4_request"
    ));
    assert!(auth.contains("x-amz-target"));
}

#[tokio::test]
async fn signed_operation_without_credentials_is_never_sent() {
    let (conn, requests) = test_connection(200, "{}");
    let client = Client::from_conf_conn(config().build(), conn);
    let err = client
        .describe_identity_pool(DescribeIdentityPoolInput::new("us-east-1:pool"))
        .await
        .expect_err("credentials are required");
    assert!(matches!(err, SdkError::ConstructionFailure(_)));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_field_is_a_construction_failure() {
    let (conn, requests) = test_connection(200, "{}");
    let client = Client::from_conf_conn(config().build(), conn);
    let err = client
        .get_id(GetIdInput::default())
        .await
        .expect_err("IdentityPoolId is required");
    match err {
        SdkError::ConstructionFailure(err) => {
            assert!(err.to_string().contains("IdentityPoolId"), "{}", err)
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn service_errors_are_parsed() {
    let (conn, _requests) = test_connection(
        400,
        r#"{"__type":"com.amazonaws.cognitoidentity#ResourceNotFoundException","message":"IdentityPool 'us-east-1:missing' not found."}"#,
    );
    let client = Client::from_conf_conn(config().build(), conn);
    let err = client
        .get_id(GetIdInput::builder().identity_pool_id("us-east-1:missing").build())
        .await
        .expect_err("pool does not exist");
    let service_err: &CognitoIdentityError = err.service_error().expect("service error");
    assert!(matches!(service_err.kind, ErrorKind::ResourceNotFoundException));
    assert_eq!(err.raw_response().map(|raw| raw.status().as_u16()), Some(400));
}

#[tokio::test]
async fn replacing_the_hook_makes_every_operation_signed() {
    let (conn, requests) = test_connection(200, "{}");
    let client = Client::from_conf_conn(config().init_request(NoopInitRequest::default()).build(), conn);
    let err = client
        .get_id(GetIdInput::builder().identity_pool_id("us-east-1:pool").build())
        .await
        .expect_err("signing now requires credentials");
    assert!(matches!(err, SdkError::ConstructionFailure(_)));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_region_fails_in_the_build_stage() {
    let (conn, requests) = test_connection(200, "{}");
    let client = Client::from_conf_conn(Config::builder().build(), conn);
    let err = client
        .get_id(GetIdInput::builder().identity_pool_id("us-east-1:pool").build())
        .await
        .expect_err("no region");
    assert!(matches!(err, SdkError::ConstructionFailure(_)));
    assert!(requests.lock().unwrap().is_empty());
}
