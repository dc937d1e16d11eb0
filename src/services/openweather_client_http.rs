//! OpenWeatherMap current-weather client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::domain::{AppError, WeatherApiConfig};
use crate::ports::WeatherSource;

const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// HTTP client for the OpenWeatherMap API.
#[derive(Clone)]
pub struct HttpOpenWeatherClient {
    api_key: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpOpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOpenWeatherClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpOpenWeatherClient {
    pub fn new(api_key: String, config: &WeatherApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_key, api_url: config.api_url.clone(), client })
    }

    /// Create from the `OPENWEATHER_API_KEY` environment variable.
    pub fn from_env(config: &WeatherApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::Configuration(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Self::new(api_key, config)
    }
}

impl WeatherSource for HttpOpenWeatherClient {
    fn fetch_city(&self, city: &str) -> Result<Value, AppError> {
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .map_err(|e| AppError::WeatherApi(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::WeatherApi(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response.json().map_err(|e| AppError::ParseError {
            what: format!("weather response for {}", city),
            details: e.to_string(),
        })
    }
}
