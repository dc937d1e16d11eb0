pub mod loader;
pub mod pipeline_config;

pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
pub use pipeline_config::{
    EnrichmentConfig, ModelApiConfig, PipelineConfig, StorageConfig, WeatherApiConfig,
};
