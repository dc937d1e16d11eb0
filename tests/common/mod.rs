//! Shared testing utilities for wxmood CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory and bucket.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Working directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Root of the filesystem artifact store.
    pub fn bucket(&self) -> PathBuf {
        self.root.path().join("bucket")
    }

    /// Write `wxmood.toml` pointing both APIs at local mock servers.
    pub fn write_config(&self, model_api_url: &str, weather_api_url: &str, cities: &[&str]) {
        let cities =
            cities.iter().map(|city| format!("\"{}\"", city)).collect::<Vec<_>>().join(", ");
        let content = format!(
            r#"[pipeline]
model = "gemini-test"
cities = [{cities}]

[storage]
root = "bucket"

[model_api]
api_url = "{model_api_url}"
timeout_secs = 5

[weather_api]
api_url = "{weather_api_url}"
timeout_secs = 5
"#
        );
        fs::write(self.root.path().join("wxmood.toml"), content)
            .expect("Failed to write wxmood.toml");
    }

    /// Seed a raw snapshot and return its object name.
    pub fn seed_raw(&self, file: &str, content: &str) -> String {
        let dir = self.bucket().join("raw_weather_data");
        fs::create_dir_all(&dir).expect("Failed to create raw prefix");
        fs::write(dir.join(file), content).expect("Failed to seed raw snapshot");
        format!("raw_weather_data/{}", file)
    }

    /// Files directly under a bucket prefix, sorted.
    pub fn files_under(&self, prefix: &str) -> Vec<PathBuf> {
        let dir = self.bucket().join(prefix);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> =
            entries.filter_map(Result::ok).map(|entry| entry.path()).collect();
        files.sort();
        files
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read artifact")
    }

    /// Build a command for invoking the compiled `wxmood` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("wxmood").expect("Failed to locate wxmood binary");
        cmd.current_dir(self.work_dir())
            .env("GEMINI_API_KEY", "test-gemini-key")
            .env("OPENWEATHER_API_KEY", "test-weather-key")
            .env("RUST_LOG", "warn");
        cmd
    }
}

/// Gemini `generateContent` reply body wrapping `text`.
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}
