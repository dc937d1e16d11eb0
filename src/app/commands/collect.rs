//! Raw snapshot collection.

use crate::domain::{AppError, PipelineConfig, RawSnapshot, artifact_name};
use crate::ports::{ArtifactStore, Clock, WeatherSource};

/// Result of one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectReport {
    /// Stored raw snapshot object.
    pub object: String,
    pub cities_fetched: Vec<String>,
    /// Per-city failures, `"<city>: <error>"`.
    pub errors: Vec<String>,
}

/// Fetch every configured city and store the snapshot under the raw prefix.
///
/// Individual city failures are collected, not fatal. Nothing is stored if
/// no city could be fetched.
pub fn execute<W, S, C>(
    source: &W,
    store: &S,
    clock: &C,
    config: &PipelineConfig,
) -> Result<CollectReport, AppError>
where
    W: WeatherSource,
    S: ArtifactStore,
    C: Clock,
{
    let mut observations = Vec::new();
    let mut errors = Vec::new();

    for city in &config.pipeline.cities {
        log::info!("Fetching weather data for {}", city);
        match source.fetch_city(city) {
            Ok(observation) => observations.push((city.clone(), observation)),
            Err(err) => {
                log::warn!("Failed to fetch {}: {}", city, err);
                errors.push(format!("{}: {}", city, err));
            }
        }
    }

    if observations.is_empty() {
        return Err(AppError::NoDataFetched(errors.join("; ")));
    }

    let cities_fetched: Vec<String> = observations.iter().map(|(city, _)| city.clone()).collect();
    let snapshot: RawSnapshot = observations.into_iter().collect();
    let body = snapshot.to_compact_json();
    let object =
        artifact_name::raw_object(&config.storage.raw_prefix, clock.now(), body.as_bytes());

    store.write_new(&object, &body)?;
    log::info!("Uploaded {}", object);

    Ok(CollectReport { object, cities_fetched, errors })
}
