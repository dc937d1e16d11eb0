use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::AppError;
use crate::ports::WeatherSource;

/// Weather source answering from a fixed table; unknown cities fail.
#[derive(Clone, Debug, Default)]
pub struct FakeWeatherSource {
    observations: BTreeMap<String, Value>,
}

impl FakeWeatherSource {
    pub fn with_city(mut self, city: &str, observation: Value) -> Self {
        self.observations.insert(city.to_string(), observation);
        self
    }
}

impl WeatherSource for FakeWeatherSource {
    fn fetch_city(&self, city: &str) -> Result<Value, AppError> {
        self.observations
            .get(city)
            .cloned()
            .ok_or_else(|| AppError::WeatherApi(format!("API error (404): {} not found", city)))
    }
}
