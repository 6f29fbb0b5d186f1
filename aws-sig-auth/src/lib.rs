/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Signature Authentication Package
//!
//! [`middleware`] signs requests with SigV4 during the sign stage. [`policy`] decides, per
//! operation, whether that stage runs at all.

pub mod middleware;
pub mod policy;
pub mod signer;
