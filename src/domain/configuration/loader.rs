//! Pipeline configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, PipelineConfig};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "wxmood.toml";

/// Load the pipeline configuration.
///
/// An explicit path must exist. Without one, `wxmood.toml` in the current
/// directory is used when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<PipelineConfig, AppError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::ConfigMissing(path.display().to_string()));
            }
            read_config(path)
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_config(path)
            } else {
                log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(PipelineConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<PipelineConfig, AppError> {
    log::debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<PipelineConfig, AppError> {
    let config: PipelineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
