/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_sig_auth::middleware::SIGV4_HANDLER_NAME;
use aws_sig_auth::policy::{SigningPolicy, SigningPolicyResolver, UnsignedOperations};
use cognitoidentity::input::{
    DescribeIdentityPoolInput, GetCredentialsForIdentityInput, GetIdInput, GetOpenIdTokenInput,
    ListIdentityPoolsInput,
};
use cognitoidentity::operation::{signing_policy, UNSIGNED_OPERATIONS};
use cognitoidentity::protocol::make_operation;
use cognitoidentity::{Config, Region};
use proptest::prelude::*;
use smithy_http::body::SdkBody;
use smithy_http::operation::{Metadata, Request};
use smithy_http::pipeline::{Handler, Handlers, NoopInitRequest, Stage};
use std::convert::Infallible;

fn config() -> Config {
    Config::builder().region(Region::new("us-east-1")).build()
}

/// Every request's pipeline, keyed by operation name, after initialization.
fn initialized(config: &Config) -> Vec<(&'static str, Handlers)> {
    vec![
        (
            "GetId",
            make_operation(config, &GetIdInput::builder().identity_pool_id("us-east-1:pool").build())
                .unwrap()
                .request()
                .handlers()
                .clone(),
        ),
        (
            "GetOpenIdToken",
            make_operation(config, &GetOpenIdTokenInput::builder().identity_id("us-east-1:id").build())
                .unwrap()
                .request()
                .handlers()
                .clone(),
        ),
        (
            "GetCredentialsForIdentity",
            make_operation(
                config,
                &GetCredentialsForIdentityInput::builder()
                    .identity_id("us-east-1:id")
                    .build(),
            )
            .unwrap()
            .request()
            .handlers()
            .clone(),
        ),
        (
            "DescribeIdentityPool",
            make_operation(config, &DescribeIdentityPoolInput::new("us-east-1:pool"))
                .unwrap()
                .request()
                .handlers()
                .clone(),
        ),
        (
            "ListIdentityPools",
            make_operation(config, &ListIdentityPoolsInput::new(10))
                .unwrap()
                .request()
                .handlers()
                .clone(),
        ),
    ]
}

#[test]
fn exempt_operations_have_no_sign_handlers() {
    for (name, handlers) in initialized(&config()) {
        let sign: Vec<_> = handlers.stage(Stage::Sign).names().collect();
        if UNSIGNED_OPERATIONS.contains(&name) {
            assert!(sign.is_empty(), "{} should be unsigned, got {:?}", name, sign);
        } else {
            assert_eq!(sign, vec![SIGV4_HANDLER_NAME], "{} should be signed", name);
        }
        // the rest of the pipeline is untouched either way
        assert_eq!(handlers.stage(Stage::Build).len(), 1, "{}", name);
    }
}

#[test]
fn get_open_id_token_sign_stage_goes_from_one_to_zero() {
    let uninitialized = Config::builder()
        .region(Region::new("us-east-1"))
        .init_request(NoopInitRequest::default())
        .build();
    let mut op = make_operation(
        &uninitialized,
        &GetOpenIdTokenInput::builder().identity_id("us-east-1:id").build(),
    )
    .unwrap();
    assert_eq!(op.request().handlers().stage(Stage::Sign).len(), 1);

    assert_eq!(signing_policy().apply(op.request_mut()), SigningPolicy::Unsigned);
    assert_eq!(op.request().handlers().stage(Stage::Sign).len(), 0);
}

#[test]
fn describe_identity_pool_keeps_its_signer() {
    let uninitialized = Config::builder().init_request(NoopInitRequest::default()).build();
    let mut op =
        make_operation(&uninitialized, &DescribeIdentityPoolInput::new("us-east-1:pool")).unwrap();
    let before = op.request().handlers().clone();
    assert_eq!(signing_policy().apply(op.request_mut()), SigningPolicy::Signed);
    assert_eq!(op.request().handlers(), &before);
    assert_eq!(op.request().handlers().stage(Stage::Sign).len(), 1);
}

#[test]
fn applying_the_policy_again_changes_nothing() {
    for (name, once) in initialized(&config()) {
        let mut request = Request::new(http::Request::new(SdkBody::empty()))
            .with_metadata(Metadata::new(name, "cognitoidentity"))
            .with_handlers(once.clone());
        signing_policy().apply(&mut request);
        assert_eq!(request.handlers(), &once, "{}", name);
    }
}

#[test]
fn custom_exempt_set_leaves_other_operations_alone() {
    let resolver = SigningPolicyResolver::new(UnsignedOperations::from_static(&["A", "B", "C"]));
    let mut request = Request::new(http::Request::new(SdkBody::from("{}")))
        .with_metadata(Metadata::new("D", "test-service"));
    let handlers = request.handlers_mut();
    handlers
        .stage_mut(Stage::Build)
        .push_back(Handler::from_fn("build", Ok::<_, Infallible>));
    handlers
        .stage_mut(Stage::Sign)
        .push_back(Handler::from_fn("sign", Ok::<_, Infallible>));
    let before = request.handlers().clone();

    assert_eq!(resolver.apply(&mut request), SigningPolicy::Signed);
    assert_eq!(request.handlers(), &before);
}

#[test]
fn empty_exempt_set_signs_cognito_operations() {
    let config = Config::builder()
        .region(Region::new("us-east-1"))
        .init_request(SigningPolicyResolver::new(UnsignedOperations::none()))
        .build();
    for (name, handlers) in initialized(&config) {
        assert_eq!(handlers.stage(Stage::Sign).len(), 1, "{}", name);
    }
}

proptest! {
    #[test]
    fn sign_stage_depends_only_on_the_operation(
        first in "[a-z0-9-]{1,20}:[a-f0-9]{8}",
        second in "[a-z0-9-]{1,20}:[a-f0-9]{8}",
        account in proptest::option::of("[0-9]{12}"),
    ) {
        let config = config();
        let mut builder = GetIdInput::builder().identity_pool_id(first);
        if let Some(account) = account {
            builder = builder.account_id(account);
        }
        let a = make_operation(&config, &builder.build()).unwrap();
        let b = make_operation(&config, &GetIdInput::builder().identity_pool_id(second.clone()).build()).unwrap();
        prop_assert_eq!(
            a.request().handlers().stage(Stage::Sign).len(),
            b.request().handlers().stage(Stage::Sign).len()
        );

        let c = make_operation(&config, &DescribeIdentityPoolInput::new(second)).unwrap();
        prop_assert_eq!(c.request().handlers().stage(Stage::Sign).len(), 1);
    }
}
