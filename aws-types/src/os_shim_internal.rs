/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Abstraction over the process environment so that providers can be tested without
//! mutating global state.

use std::collections::HashMap;
use std::env::VarError;
use std::sync::Arc;

/// Environment variable abstraction
///
/// `Env::real()` reads from the process environment. `Env::from_slice` is a fixed
/// set of variables for tests.
#[derive(Clone, Debug)]
pub struct Env(Inner);

#[derive(Clone, Debug)]
enum Inner {
    Real,
    Fake(Arc<HashMap<String, String>>),
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

impl Env {
    pub fn real() -> Self {
        Env(Inner::Real)
    }

    pub fn from_slice<'a>(vars: &[(&'a str, &'a str)]) -> Self {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Env(Inner::Fake(Arc::new(map)))
    }

    pub fn get(&self, k: &str) -> Result<String, VarError> {
        match &self.0 {
            Inner::Real => std::env::var(k),
            Inner::Fake(map) => map.get(k).cloned().ok_or(VarError::NotPresent),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Env;
    use std::env::VarError;

    #[test]
    fn fake_env_only_sees_its_own_vars() {
        let env = Env::from_slice(&[("AWS_REGION", "eu-west-1")]);
        assert_eq!(env.get("AWS_REGION").unwrap(), "eu-west-1");
        assert_eq!(env.get("HOME"), Err(VarError::NotPresent));
    }
}
