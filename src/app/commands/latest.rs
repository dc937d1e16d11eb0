//! Read side: the most recent processed artifact.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{AppError, PipelineConfig, artifact_name};
use crate::ports::ArtifactStore;

/// Latest processed artifact and the object it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestArtifact {
    pub source: String,
    pub data: Value,
}

/// Return the newest `processed-*.json` under the processed prefix.
///
/// Names embed a sortable UTC timestamp, so the greatest name is the newest.
pub fn execute<S: ArtifactStore>(
    store: &S,
    config: &PipelineConfig,
) -> Result<LatestArtifact, AppError> {
    let prefix = &config.storage.processed_prefix;
    let latest = store
        .list(prefix)?
        .into_iter()
        .filter(|object| artifact_name::is_processed_object(prefix, object))
        .max()
        .ok_or_else(|| AppError::NoProcessedArtifacts(prefix.clone()))?;

    let text = store.read_text(&latest)?;
    let data = serde_json::from_str(&text)
        .map_err(|e| AppError::ParseError { what: latest.clone(), details: e.to_string() })?;

    Ok(LatestArtifact { source: latest, data })
}
