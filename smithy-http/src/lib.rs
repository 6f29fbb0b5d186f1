/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Core HTTP primitives shared by every SDK operation: the request body, the per-request
//! property bag, the staged handler pipeline and the result types returned to callers.

pub mod body;
pub mod middleware;
pub mod operation;
pub mod pipeline;
pub mod property_bag;
pub mod response;
pub mod result;
