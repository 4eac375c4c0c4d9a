//! Configuration for the chat-completions generation backend

use serde::{Deserialize, Serialize};

/// Configuration for the dialogue generation endpoint.
///
/// The endpoint can be the provider itself or a keyless relay that adds the
/// credential server-side; in the latter case leave `api_key_env` pointing at
/// an unset variable.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub api_url: String,

    /// Model identifier sent with every request
    pub api_model: String,

    /// Environment variable holding the API key, if the endpoint needs one
    pub api_key_env: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0+ = creative)
    pub temperature: f32,

    /// Maximum tokens to generate per reply
    pub max_tokens: u32,

    /// Maximum number of past dialogue lines included in a request
    pub history_window: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.deepseek.com".to_string(),
            api_model: "deepseek-chat".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            history_window: 10,
            request_timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Create a new configuration for the given endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Set the base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, api_model: impl Into<String>) -> Self {
        self.api_model = api_model.into();
        self
    }

    /// Set the environment variable the API key is read from
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum tokens per reply
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the request history window
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}
