//! wxmood: enrich multi-city weather snapshots with validated LLM mood summaries.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::PipelineContext;
pub use app::api::{
    CollectReport, LatestArtifact, QuarantineKind, RunOutcome, collect, latest, process, prompt,
    run,
};
pub use app::commands::process::{process_object, process_snapshot};
pub use domain::configuration::load_config;
pub use domain::{
    AppError, EnrichmentEntry, EnrichmentResult, InvocationError, KeySetDiagnostic,
    PipelineConfig, PipelineError, ProcessedArtifact, RawSnapshot, StoreError, ValidationOutcome,
    build_prompt, normalize, validate,
};
