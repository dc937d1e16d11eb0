mod filesystem_artifact_store;
mod gemini_client_http;
mod openweather_client_http;
mod system_clock;

pub use filesystem_artifact_store::FilesystemArtifactStore;
pub use gemini_client_http::HttpGeminiClient;
pub use openweather_client_http::HttpOpenWeatherClient;
pub use system_clock::SystemClock;
