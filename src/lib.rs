pub mod config;
pub mod llm;
pub mod messages;
pub mod session;
pub mod speech;
pub mod transcript;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BanterError {
    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for BanterError {
    fn from(e: std::io::Error) -> Self {
        BanterError::IOError(e.to_string())
    }
}

impl BanterError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors let the current run continue (the affected chunk is
    /// skipped), while non-recoverable errors end the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A failed generation call ends the run
            BanterError::GenerationError(_) => false,
            // A failed synthesis call only skips one chunk
            BanterError::SynthesisError(_) => true,
            // A playback error is treated as that chunk finishing
            BanterError::PlaybackError(_) => true,
            // Config errors require user intervention
            BanterError::ConfigError(_) => false,
            // Channel errors indicate internal issues
            BanterError::ChannelError(_) => false,
            // IO errors may require user intervention
            BanterError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            BanterError::GenerationError(_) => {
                "The language model returned no reply. The conversation has stopped.".to_string()
            }
            BanterError::SynthesisError(_) => {
                "Speech synthesis failed for part of the reply.".to_string()
            }
            BanterError::PlaybackError(_) => {
                "Audio playback failed. Please check your speakers.".to_string()
            }
            BanterError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            BanterError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            BanterError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

/// Result type alias for Banter operations
pub type Result<T> = std::result::Result<T, BanterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability_classification() {
        assert!(!BanterError::GenerationError("down".into()).is_recoverable());
        assert!(BanterError::SynthesisError("voice 500".into()).is_recoverable());
        assert!(BanterError::PlaybackError("decode".into()).is_recoverable());
        assert!(!BanterError::ConfigError("bad toml".into()).is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BanterError = io.into();
        assert!(matches!(err, BanterError::IOError(_)));
    }
}
