//! API Facade for the application.
//!
//! Wires the production adapters (HTTP clients, filesystem store, system
//! clock) into the commands.

use std::fs;
use std::path::Path;

use crate::app::PipelineContext;
use crate::app::commands::{collect, latest, process};
use crate::domain::{AppError, PipelineConfig, RawSnapshot, build_prompt};
use crate::services::{
    FilesystemArtifactStore, HttpGeminiClient, HttpOpenWeatherClient, SystemClock,
};

pub use crate::app::commands::collect::CollectReport;
pub use crate::app::commands::latest::LatestArtifact;
pub use crate::app::commands::process::{QuarantineKind, RunOutcome};

fn artifact_store(config: &PipelineConfig) -> FilesystemArtifactStore {
    FilesystemArtifactStore::new(config.storage.root.clone())
}

// =============================================================================
// Collect Command API
// =============================================================================

/// Fetch configured cities and store a raw snapshot.
pub fn collect(config: &PipelineConfig) -> Result<CollectReport, AppError> {
    let source = HttpOpenWeatherClient::from_env(&config.weather_api)?;
    collect::execute(&source, &artifact_store(config), &SystemClock, config)
}

// =============================================================================
// Process Command API
// =============================================================================

/// Enrich a stored raw snapshot.
///
/// `Ok` covers persisted, quarantined, and ignored runs; `Err` is fatal.
pub fn process(config: &PipelineConfig, object: &str) -> Result<RunOutcome, AppError> {
    let model = HttpGeminiClient::from_env(&config.pipeline.model, &config.model_api)?;
    let store = artifact_store(config);
    let ctx = PipelineContext::new(&model, &store, &SystemClock, config);
    Ok(process::process_object(&ctx, object)?)
}

/// Collect a snapshot, then enrich it.
pub fn run(config: &PipelineConfig) -> Result<(CollectReport, RunOutcome), AppError> {
    let report = collect(config)?;
    let outcome = process(config, &report.object)?;
    Ok((report, outcome))
}

// =============================================================================
// Read-side API
// =============================================================================

/// Most recent processed artifact.
pub fn latest(config: &PipelineConfig) -> Result<LatestArtifact, AppError> {
    latest::execute(&artifact_store(config), config)
}

/// Render the prompt for a local snapshot file without calling the model.
pub fn prompt(config: &PipelineConfig, snapshot_path: &Path) -> Result<String, AppError> {
    let content = fs::read_to_string(snapshot_path)?;
    let snapshot = RawSnapshot::parse(&content).map_err(|details| AppError::ParseError {
        what: snapshot_path.display().to_string(),
        details,
    })?;
    Ok(build_prompt(&snapshot, config.pipeline.strictness()))
}
