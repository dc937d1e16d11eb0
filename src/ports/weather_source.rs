//! Weather observation source port definition.

use serde_json::Value;

use crate::domain::AppError;

/// Port for fetching the current observation for one city.
pub trait WeatherSource {
    /// Fetch the raw observation record for `city`.
    fn fetch_city(&self, city: &str) -> Result<Value, AppError>;
}
