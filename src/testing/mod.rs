mod fake_model_invoker;
mod fake_weather_source;
mod memory_artifact_store;
mod stepping_clock;

pub use fake_model_invoker::FakeModelInvoker;
pub use fake_weather_source::FakeWeatherSource;
pub use memory_artifact_store::MemoryArtifactStore;
pub use stepping_clock::SteppingClock;
