use std::fmt;
use std::io;

use thiserror::Error;

/// Library-wide error type for wxmood operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file parsed but failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Weather API request failed.
    #[error("Weather API error: {0}")]
    WeatherApi(String),

    /// No city could be fetched during collection.
    #[error("No weather data fetched: {0}")]
    NoDataFetched(String),

    /// Read side found nothing under the processed prefix.
    #[error("No processed weather files found under '{0}'")]
    NoProcessedArtifacts(String),

    /// Storage backend failure outside the pipeline.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Fatal enrichment pipeline failure.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Failure talking to the generative model.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("model request timed out after {0}s")]
    Timeout(u64),

    #[error("model transport failure: {0}")]
    Transport(String),

    #[error("model rejected credentials ({status})")]
    Auth { status: u16 },

    #[error("model quota exhausted (429)")]
    Quota,

    #[error("model service error ({status}): {body}")]
    Service { status: u16, body: String },

    #[error("model returned no text")]
    EmptyResponse,
}

/// Failure reading or writing the artifact store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object '{0}' not found")]
    NotFound(String),

    #[error("object '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid object name '{0}'")]
    InvalidName(String),

    #[error("cannot encode object body: {0}")]
    Encode(String),

    #[error("storage I/O failure on '{object}': {source}")]
    Io {
        object: String,
        #[source]
        source: io::Error,
    },
}

/// Which artifact a sink failure was writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Processed,
    Quarantine,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Processed => write!(f, "processed"),
            ArtifactKind::Quarantine => write!(f, "quarantine"),
        }
    }
}

/// Fatal outcome of a single pipeline run. Nothing usable was persisted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("model invocation failed: {0}")]
    Invocation(#[from] InvocationError),

    #[error("failed to write {kind} artifact '{object}': {source}")]
    Sink {
        kind: ArtifactKind,
        object: String,
        #[source]
        source: StoreError,
    },

    #[error("cannot load raw snapshot '{object}': {reason}")]
    Input { object: String, reason: String },
}
