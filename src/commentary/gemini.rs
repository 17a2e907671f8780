//! Gemini API integration for page commentary
//!
//! Requires the `ai` feature to be enabled:
//! ```toml
//! sitegauge = { version = "0.4", features = ["ai"] }
//! ```

use crate::AnalysisReport;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
#[cfg(feature = "ai")]
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client for generating commentary
#[allow(dead_code)]
pub struct GeminiClient {
    api_key: String,
    model: String,
}

/// Error from the Gemini API
#[derive(Debug)]
pub enum GeminiError {
    NoApiKey,
    RequestFailed(String),
    InvalidResponse(String),
    RateLimited,
    ApiError(String),
}

impl std::fmt::Display for GeminiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeminiError::NoApiKey => write!(f, "GEMINI_API_KEY environment variable not set"),
            GeminiError::RequestFailed(e) => write!(f, "Request failed: {}", e),
            GeminiError::InvalidResponse(e) => write!(f, "Invalid response: {}", e),
            GeminiError::RateLimited => write!(f, "Rate limited - try again later"),
            GeminiError::ApiError(e) => write!(f, "API error: {}", e),
        }
    }
}

impl std::error::Error for GeminiError {}

impl GeminiClient {
    /// Create a new client using GEMINI_API_KEY from the environment
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::NoApiKey)?;
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Generate commentary for a finished report
    #[cfg(feature = "ai")]
    pub fn commentary(&self, report: &AnalysisReport) -> Result<String, GeminiError> {
        let prompt = super::CommentaryPrompt::new().generate(report);
        self.send_request(&prompt)
    }

    /// Send a prompt and return the response text
    #[cfg(feature = "ai")]
    pub fn send_request(&self, prompt: &str) -> Result<String, GeminiError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::new();
        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| GeminiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(GeminiError::ApiError(format!("{}: {}", status, error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?;

        json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .map(str::to_string)
            .ok_or_else(|| GeminiError::InvalidResponse("No content in response".to_string()))
    }

    /// Stub implementation when the ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn commentary(&self, _report: &AnalysisReport) -> Result<String, GeminiError> {
        Err(GeminiError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }

    #[cfg(not(feature = "ai"))]
    pub fn send_request(&self, _prompt: &str) -> Result<String, GeminiError> {
        Err(GeminiError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}
