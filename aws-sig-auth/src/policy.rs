/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Per-operation signing policy
//!
//! Some operations exist to hand out credentials in the first place (eg. Cognito Identity's
//! `GetId`) and therefore can't be signed with them. A service lists those operations in an
//! [`UnsignedOperations`] set; the [`SigningPolicyResolver`] built from it runs as the service's
//! [`InitRequest`] hook and empties the sign stage of every request for a listed operation.
//!
//! ```rust
//! use aws_sig_auth::policy::{SigningPolicy, SigningPolicyResolver, UnsignedOperations};
//!
//! let resolver = SigningPolicyResolver::new(UnsignedOperations::from_static(&["GetId"]));
//! assert_eq!(resolver.resolve("GetId"), SigningPolicy::Unsigned);
//! assert_eq!(resolver.resolve("DescribeIdentityPool"), SigningPolicy::Signed);
//! ```

use smithy_http::operation::Request;
use smithy_http::pipeline::{InitRequest, Stage};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::sync::Arc;

/// Whether a request's sign stage runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigningPolicy {
    /// The sign stage runs (default)
    Signed,
    /// The sign stage was cleared; the request is sent without a signature
    Unsigned,
}

impl Default for SigningPolicy {
    fn default() -> Self {
        SigningPolicy::Signed
    }
}

/// The fixed set of operations that are exempt from signing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnsignedOperations {
    operations: BTreeSet<Cow<'static, str>>,
}

impl UnsignedOperations {
    /// No exempt operations: every request is signed.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_static(operations: &[&'static str]) -> Self {
        operations.iter().copied().map(Cow::Borrowed).collect()
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.operations.contains(operation)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The exempt operations, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.operations.iter().map(|op| op.as_ref())
    }
}

impl<T> FromIterator<T> for UnsignedOperations
where
    T: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        UnsignedOperations {
            operations: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Clears the sign stage of requests whose operation is in an [`UnsignedOperations`] set.
///
/// The set is frozen when the resolver is built and shared read-only between clones. The
/// decision depends only on the request's operation name.
#[derive(Clone, Debug, Default)]
pub struct SigningPolicyResolver {
    unsigned: Arc<UnsignedOperations>,
}

impl SigningPolicyResolver {
    pub fn new(unsigned: UnsignedOperations) -> Self {
        SigningPolicyResolver {
            unsigned: Arc::new(unsigned),
        }
    }

    pub fn unsigned_operations(&self) -> &UnsignedOperations {
        &self.unsigned
    }

    pub fn resolve(&self, operation: &str) -> SigningPolicy {
        if self.unsigned.contains(operation) {
            SigningPolicy::Unsigned
        } else {
            SigningPolicy::Signed
        }
    }

    /// Resolve the policy for `request` and apply it to the request's pipeline.
    ///
    /// A request without operation metadata is left untouched and resolves to
    /// [`SigningPolicy::Signed`]. The resolved policy is recorded in the property bag.
    pub fn apply(&self, request: &mut Request) -> SigningPolicy {
        let policy = match request.metadata() {
            Some(metadata) => {
                let policy = self.resolve(metadata.name());
                tracing::debug!(
                    service = metadata.service(),
                    operation = metadata.name(),
                    policy = ?policy,
                    "resolved signing policy"
                );
                policy
            }
            None => SigningPolicy::Signed,
        };
        if policy == SigningPolicy::Unsigned {
            request.handlers_mut().clear_stage(Stage::Sign);
        }
        request.config_mut().insert(policy);
        policy
    }
}

impl InitRequest for SigningPolicyResolver {
    fn init_request(&self, request: &mut Request) {
        self.apply(request);
    }
}
