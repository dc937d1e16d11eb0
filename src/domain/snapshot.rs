//! Raw multi-city weather snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One batch of unprocessed per-city weather observations.
///
/// Keys are city identifiers; values are opaque observation records passed
/// through to the prompt untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot(Map<String, Value>);

impl RawSnapshot {
    /// Parse a snapshot document. The top level must be an object with
    /// non-empty city keys.
    pub fn parse(text: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
        let Value::Object(map) = value else {
            return Err("top-level value must be an object keyed by city".to_string());
        };
        if map.keys().any(|city| city.trim().is_empty()) {
            return Err("city identifiers must not be empty".to_string());
        }
        Ok(Self(map))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// City identifiers in key order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn city_set(&self) -> BTreeSet<String> {
        self.0.keys().cloned().collect()
    }

    pub fn observation(&self, city: &str) -> Option<&Value> {
        self.0.get(city)
    }

    /// Pretty-printed JSON, as embedded in the prompt.
    pub fn to_pretty_json(&self) -> String {
        format!("{:#}", Value::Object(self.0.clone()))
    }

    /// Compact JSON, as stored under the raw prefix.
    pub fn to_compact_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl FromIterator<(String, Value)> for RawSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
