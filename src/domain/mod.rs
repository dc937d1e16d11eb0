pub mod artifact_name;
pub mod configuration;
pub mod contract;
pub mod enrichment;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod snapshot;

pub use configuration::{
    EnrichmentConfig, ModelApiConfig, PipelineConfig, StorageConfig, WeatherApiConfig,
};
pub use contract::{KeySetDiagnostic, ValidationOutcome, validate};
pub use enrichment::{EnrichmentEntry, EnrichmentResult, ProcessedArtifact};
pub use error::{AppError, ArtifactKind, InvocationError, PipelineError, StoreError};
pub use normalize::{extract_brace_span, normalize};
pub use prompt::{DEFAULT_STRICTNESS, build_prompt};
pub use snapshot::RawSnapshot;
