//! Session configuration
//!
//! All settings for one podcast session, loadable from a TOML file. Every
//! section has working defaults so a bare `SessionConfig::default()` runs
//! against the stock endpoints.

use crate::llm::LlmConfig;
use crate::{BanterError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the speech-synthesis endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Voice endpoint queried with `voice` and `text` parameters
    pub api_url: String,

    /// Voice used for the host role (also the fallback voice)
    pub host_voice: String,

    /// Voice used for the guest role; the host voice is used when unset
    pub guest_voice: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.streamelements.com/kappa/v2/speech".to_string(),
            host_voice: "Brian".to_string(),
            guest_voice: Some("Amy".to_string()),
            request_timeout_secs: 30,
        }
    }
}

impl TtsConfig {
    /// Set the voice endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the host voice
    pub fn with_host_voice(mut self, voice: impl Into<String>) -> Self {
        self.host_voice = voice.into();
        self
    }

    /// Set the guest voice
    pub fn with_guest_voice(mut self, voice: impl Into<String>) -> Self {
        self.guest_voice = Some(voice.into());
        self
    }
}

/// Configuration for chunking and playback.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Maximum chunk length handed to the synthesizer, in bytes
    pub max_chunk_chars: usize,

    /// Whether synthesized audio is actually played
    pub playback_enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 220,
            playback_enabled: true,
        }
    }
}

impl SpeechConfig {
    /// Set the maximum chunk length
    pub fn with_max_chunk_chars(mut self, max: usize) -> Self {
        self.max_chunk_chars = max;
        self
    }

    /// Disable audio output (the run proceeds silently)
    pub fn without_playback(mut self) -> Self {
        self.playback_enabled = false;
        self
    }
}

/// All settings for one session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub speech: SpeechConfig,
}

impl SessionConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BanterError::ConfigError(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: SessionConfig = toml::from_str(&raw).map_err(|e| {
            BanterError::ConfigError(format!(
                "invalid config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The default config file location, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("banter").join("config.toml"))
    }

    /// Validate field values that serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_url.trim().is_empty() {
            return Err(BanterError::ConfigError(
                "llm.api_url must not be empty".to_string(),
            ));
        }
        if self.llm.api_model.trim().is_empty() {
            return Err(BanterError::ConfigError(
                "llm.api_model must not be empty".to_string(),
            ));
        }
        if self.llm.history_window == 0 {
            return Err(BanterError::ConfigError(
                "llm.history_window must be at least 1".to_string(),
            ));
        }
        if self.tts.api_url.trim().is_empty() {
            return Err(BanterError::ConfigError(
                "tts.api_url must not be empty".to_string(),
            ));
        }
        if self.speech.max_chunk_chars == 0 {
            return Err(BanterError::ConfigError(
                "speech.max_chunk_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
