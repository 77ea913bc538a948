//! Environment variable harvesting.
//!
//! Production code uses [`Env::real()`], which reads the process
//! environment. Tests and hermetic callers use [`Env::from_pairs`] backed by
//! an explicit map, which keeps the suite free of `set_var` races.

use crate::value::{Mapping, Value};
use std::collections::HashMap;

/// Environment variable reader.
#[derive(Debug, Clone, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the real process environment.
    pub fn real() -> Self {
        Env { overrides: None }
    }

    /// Read from an explicit set of key-value pairs instead of the process
    /// environment. Intended for tests and embedders that need isolation.
    pub fn from_pairs(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Env {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a single variable by name.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    /// The full variable set as a flat NAME -> string mapping, ready for
    /// unprefixed ingestion.
    pub fn harvest(&self) -> Mapping {
        match &self.overrides {
            Some(map) => {
                let mut sorted: Vec<(&String, &String)> = map.iter().collect();
                // HashMap iteration order is arbitrary; sort for determinism.
                sorted.sort();
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect()
            }
            None => std::env::vars()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        }
    }
}
