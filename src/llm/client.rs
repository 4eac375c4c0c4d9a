//! Chat-completions backend for dialogue generation
//!
//! Talks to any server implementing the OpenAI chat completions API, either
//! directly or through a relay endpoint that holds the credential.

use crate::llm::config::LlmConfig;
use crate::llm::context::ConversationMessage;
use crate::{BanterError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// The generation collaborator contract.
///
/// Implementations must report every failure (non-success status, malformed
/// payload, network error) as `None` rather than an error, so the turn loop
/// can treat all of them uniformly.
#[async_trait]
pub trait DialogueModel: Send + Sync {
    /// Request the next dialogue line for the given message window.
    async fn next_line(&self, messages: &[ConversationMessage]) -> Option<String>;
}

/// Dialogue generation over an OpenAI-compatible chat completions endpoint.
pub struct ChatApiClient {
    config: LlmConfig,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ChatApiClient {
    /// Create a new client from configuration.
    ///
    /// The API key is resolved once from the configured environment
    /// variable; a missing variable means keyless operation (e.g. a relay
    /// endpoint that injects the credential itself).
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            debug!(
                "{} is not set; sending unauthenticated requests",
                config.api_key_env
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BanterError::ConfigError(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            config: config.clone(),
            api_key,
            http,
        })
    }

    fn endpoint(&self) -> String {
        chat_completions_url(&self.config.api_url)
    }
}

#[async_trait]
impl DialogueModel for ChatApiClient {
    async fn next_line(&self, messages: &[ConversationMessage]) -> Option<String> {
        let request_id = Uuid::new_v4();

        let wire_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            })
            .collect();

        let body = serde_json::json!({
            "model": self.config.api_model,
            "messages": wire_messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let mut request = self.http.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(%request_id, "requesting next line ({} messages)", messages.len());

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%request_id, "chat request failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%request_id, "chat endpoint returned status {status}");
            return None;
        }

        let payload: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(%request_id, "chat response was not valid JSON: {e}");
                return None;
            }
        };

        match payload["choices"][0]["message"]["content"].as_str() {
            Some(content) => {
                debug!(%request_id, "received {} chars", content.len());
                Some(content.to_string())
            }
            None => {
                warn!(%request_id, "chat response had no message content");
                None
            }
        }
    }
}

/// Derive the chat completions URL from a configured base.
///
/// Accepts either a bare base URL or one that already names the endpoint,
/// so both provider URLs and relay paths work unchanged.
fn chat_completions_url(api_url: &str) -> String {
    let base = api_url.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{base}/chat/completions")
    }
}
