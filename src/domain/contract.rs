//! Contract validation of normalized model output.
//!
//! The contract is a single JSON object mapping city name to an object with
//! exactly two string fields, `mood` and `summary`. Validation is
//! all-or-nothing: one bad entry rejects the whole reply.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use super::enrichment::{EnrichmentEntry, EnrichmentResult};

const MOOD: &str = "mood";
const SUMMARY: &str = "summary";

/// Classification of a candidate reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Reply satisfies the contract. Key-set drift is reported, not rejected.
    Valid { result: EnrichmentResult, diagnostic: Option<KeySetDiagnostic> },
    /// Candidate is not parseable JSON. `text` is the candidate as received.
    Malformed { text: String, reason: String },
    /// Candidate parsed but has the wrong shape.
    SchemaViolation { value: Value, reason: String },
}

/// Cities the reply dropped or invented relative to the expected set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySetDiagnostic {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl KeySetDiagnostic {
    /// Compare reply keys against the expected set. `None` when they match.
    pub fn compare<'a>(
        expected: &BTreeSet<String>,
        actual: impl IntoIterator<Item = &'a String>,
    ) -> Option<Self> {
        let actual: BTreeSet<&String> = actual.into_iter().collect();
        let missing: Vec<String> =
            expected.iter().filter(|city| !actual.contains(city)).cloned().collect();
        let unexpected: Vec<String> =
            actual.into_iter().filter(|city| !expected.contains(*city)).cloned().collect();

        if missing.is_empty() && unexpected.is_empty() {
            None
        } else {
            Some(Self { missing, unexpected })
        }
    }
}

impl fmt::Display for KeySetDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing cities: {}", self.missing.join(", ")));
        }
        if !self.unexpected.is_empty() {
            parts.push(format!("unexpected cities: {}", self.unexpected.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Validate a normalized candidate against the enrichment contract.
pub fn validate(candidate: &str, expected_cities: &BTreeSet<String>) -> ValidationOutcome {
    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(err) => {
            return ValidationOutcome::Malformed {
                text: candidate.to_string(),
                reason: err.to_string(),
            };
        }
    };

    match check_shape(&value) {
        Ok(result) => {
            let diagnostic = KeySetDiagnostic::compare(expected_cities, result.keys());
            ValidationOutcome::Valid { result, diagnostic }
        }
        Err(reason) => ValidationOutcome::SchemaViolation { value, reason },
    }
}

fn check_shape(value: &Value) -> Result<EnrichmentResult, String> {
    let Value::Object(cities) = value else {
        return Err(format!("top-level value must be an object, found {}", json_kind(value)));
    };

    let mut result = EnrichmentResult::new();
    for (city, entry) in cities {
        if city.trim().is_empty() {
            return Err("city name must not be empty".to_string());
        }
        let entry = check_entry(entry).map_err(|reason| format!("city '{}': {}", city, reason))?;
        result.insert(city.clone(), entry);
    }
    Ok(result)
}

fn check_entry(entry: &Value) -> Result<EnrichmentEntry, String> {
    let Value::Object(fields) = entry else {
        return Err(format!("entry must be an object, found {}", json_kind(entry)));
    };

    if let Some(extra) = fields.keys().find(|key| *key != MOOD && *key != SUMMARY) {
        return Err(format!("unexpected field '{}'", extra));
    }

    Ok(EnrichmentEntry {
        mood: string_field(fields, MOOD)?,
        summary: string_field(fields, SUMMARY)?,
    })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String, String> {
    match fields.get(name) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(format!("field '{}' must be a string, found {}", name, json_kind(other))),
        None => Err(format!("missing field '{}'", name)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
