//! Pipeline configuration domain models.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::prompt::DEFAULT_STRICTNESS;

/// Configuration loaded from `wxmood.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Enrichment settings.
    #[serde(default)]
    pub pipeline: EnrichmentConfig,
    /// Artifact storage layout.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Generative model API configuration.
    #[serde(default)]
    pub model_api: ModelApiConfig,
    /// Weather API configuration.
    #[serde(default)]
    pub weather_api: WeatherApiConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.pipeline.validate()?;
        self.storage.validate()?;
        self.model_api.validate()?;
        self.weather_api.validate()?;
        Ok(())
    }
}

/// Model identifier, expected cities, and prompt wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentConfig {
    /// Model identifier recorded in every processed artifact.
    #[serde(default = "default_model")]
    pub model: String,
    /// Cities collected and expected in snapshots.
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    /// Strictness wording for the prompt's first requirement.
    #[serde(default)]
    pub strictness: Option<String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { model: default_model(), cities: default_cities(), strictness: None }
    }
}

impl EnrichmentConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("pipeline.model must not be empty".to_string()));
        }
        if self.cities.is_empty() {
            return Err(AppError::InvalidConfig("pipeline.cities must not be empty".to_string()));
        }
        let mut seen = BTreeSet::new();
        for city in &self.cities {
            if city.trim().is_empty() {
                return Err(AppError::InvalidConfig(
                    "pipeline.cities must not contain empty names".to_string(),
                ));
            }
            if !seen.insert(city.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "pipeline.cities lists '{}' more than once",
                    city
                )));
            }
        }
        if self.strictness.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "pipeline.strictness must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn strictness(&self) -> &str {
        self.strictness.as_deref().unwrap_or(DEFAULT_STRICTNESS)
    }

    pub fn city_set(&self) -> BTreeSet<String> {
        self.cities.iter().cloned().collect()
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_cities() -> Vec<String> {
    ["London", "New York", "Tokyo", "Delhi", "Sydney"].iter().map(|c| c.to_string()).collect()
}

/// Bucket-style storage layout rooted at a local directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Root directory of the artifact store.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Prefix for raw snapshots written by the collector.
    #[serde(default = "default_raw_prefix")]
    pub raw_prefix: String,
    /// Prefix for processed artifacts.
    #[serde(default = "default_processed_prefix")]
    pub processed_prefix: String,
    /// Prefix for quarantined model output.
    #[serde(default = "default_debug_prefix")]
    pub debug_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            raw_prefix: default_raw_prefix(),
            processed_prefix: default_processed_prefix(),
            debug_prefix: default_debug_prefix(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let prefixes = [
            ("raw_prefix", &self.raw_prefix),
            ("processed_prefix", &self.processed_prefix),
            ("debug_prefix", &self.debug_prefix),
        ];
        for (name, prefix) in prefixes {
            if prefix.trim_matches('/').trim().is_empty() {
                return Err(AppError::InvalidConfig(format!("storage.{} must not be empty", name)));
            }
        }
        let distinct: BTreeSet<&str> =
            prefixes.iter().map(|(_, prefix)| prefix.trim_matches('/')).collect();
        if distinct.len() != prefixes.len() {
            return Err(AppError::InvalidConfig(
                "storage prefixes must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("bucket")
}

fn default_raw_prefix() -> String {
    "raw_weather_data".to_string()
}

fn default_processed_prefix() -> String {
    "processed_weather_data".to_string()
}

fn default_debug_prefix() -> String {
    "debug_weather_data".to_string()
}

/// Gemini `generateContent` API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelApiConfig {
    /// API base URL; `/models/<model>:generateContent` is appended.
    #[serde(default = "default_model_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelApiConfig {
    fn default() -> Self {
        Self { api_url: default_model_api_url(), timeout_secs: default_model_timeout() }
    }
}

impl ModelApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "model_api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_model_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default model API URL must be valid")
}

fn default_model_timeout() -> u64 {
    60
}

/// OpenWeatherMap current-weather API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherApiConfig {
    /// Current-weather endpoint URL.
    #[serde(default = "default_weather_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self { api_url: default_weather_api_url(), timeout_secs: default_weather_timeout() }
    }
}

impl WeatherApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "weather_api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_weather_api_url() -> Url {
    Url::parse("https://api.openweathermap.org/data/2.5/weather")
        .expect("Default weather API URL must be valid")
}

fn default_weather_timeout() -> u64 {
    10
}
