//! Gemini `generateContent` client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, InvocationError, ModelApiConfig};
use crate::ports::ModelInvoker;

const X_GOOG_API_KEY: &str = "x-goog-api-key";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// HTTP client for the Gemini API.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    api_url: Url,
    model: String,
    timeout_secs: u64,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, model: &str, config: &ModelApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            model: model.to_string(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(model: &str, config: &ModelApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::Configuration(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Self::new(api_key, model, config)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl ApiResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

impl ModelInvoker for HttpGeminiClient {
    fn invoke(&self, prompt: &str) -> Result<String, InvocationError> {
        let request = ApiRequest {
            contents: vec![Content { role: "user", parts: vec![RequestPart { text: prompt }] }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if status.is_success() {
            let api_response: ApiResponse = response.json().map_err(|e| {
                InvocationError::Transport(format!("Failed to parse response: {}", e))
            })?;
            api_response.into_text().ok_or(InvocationError::EmptyResponse)
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(InvocationError::Auth { status: status.as_u16() })
        } else if status.as_u16() == 429 {
            Err(InvocationError::Quota)
        } else {
            let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(InvocationError::Service { status: status.as_u16(), body })
        }
    }
}

impl HttpGeminiClient {
    fn transport_error(&self, error: reqwest::Error) -> InvocationError {
        if error.is_timeout() {
            InvocationError::Timeout(self.timeout_secs)
        } else {
            InvocationError::Transport(format!("HTTP request failed: {}", error))
        }
    }
}
