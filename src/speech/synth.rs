//! Speech-synthesis collaborator
//!
//! Each of the two podcast roles maps to a fixed voice on the configured
//! endpoint. Synthesis failures are recoverable by contract: the caller
//! skips the affected chunk and moves on.

use crate::config::TtsConfig;
use crate::messages::Speaker;
use crate::{BanterError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// The TTS collaborator contract.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one chunk of text in the given speaker's voice, returning
    /// raw audio bytes in a playable format.
    async fn synthesize(&self, speaker: Speaker, text: &str) -> Result<Vec<u8>>;
}

/// Synthesis over an HTTP voice endpoint.
///
/// The endpoint is queried with `voice` and `text` parameters and answers
/// with the encoded audio. The host and guest voices are fixed per run; a
/// missing guest voice falls back to the default (host) voice.
pub struct HttpSynthesizer {
    config: TtsConfig,
    http: reqwest::Client,
}

impl HttpSynthesizer {
    /// Create a new synthesizer from configuration.
    pub fn new(config: &TtsConfig) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(BanterError::ConfigError(
                "tts.api_url must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BanterError::ConfigError(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    /// The voice name for a speaker, falling back to the host voice when the
    /// guest voice is not configured.
    fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Host => &self.config.host_voice,
            Speaker::Guest => self
                .config
                .guest_voice
                .as_deref()
                .unwrap_or(&self.config.host_voice),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, speaker: Speaker, text: &str) -> Result<Vec<u8>> {
        let voice = self.voice_for(speaker);
        debug!("synthesizing {} chars with voice {voice}", text.len());

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&[("voice", voice), ("text", text)])
            .send()
            .await
            .map_err(|e| BanterError::SynthesisError(format!("voice request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BanterError::SynthesisError(format!(
                "voice endpoint returned status {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BanterError::SynthesisError(format!("voice response truncated: {e}")))?;

        if bytes.is_empty() {
            return Err(BanterError::SynthesisError(
                "voice endpoint returned no audio".to_string(),
            ));
        }

        Ok(bytes.to_vec())
    }
}
