//! Validated enrichment output and the processed artifact wrapping it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mood and summary produced by the model for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentEntry {
    pub mood: String,
    pub summary: String,
}

/// Per-city enrichment, keyed by city identifier.
pub type EnrichmentResult = BTreeMap<String, EnrichmentEntry>;

/// Document written to the processed location on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedArtifact {
    /// Object name of the raw snapshot (or the inline source label).
    pub source_file: String,
    /// RFC 3339 UTC processing time.
    pub processed_at: String,
    /// Model identifier used for the enrichment.
    pub model: String,
    pub result: EnrichmentResult,
}
