mod artifact_store;
mod clock;
mod model_invoker;
mod weather_source;

pub use artifact_store::ArtifactStore;
pub use clock::Clock;
pub use model_invoker::ModelInvoker;
pub use weather_source::WeatherSource;
