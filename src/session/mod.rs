//! Session lifecycle
//!
//! A [`Session`] bundles configuration and collaborators; each call to
//! [`Session::start`] begins one run with a fresh conversation (new system
//! prompt, host turn first) and hands back a [`SessionHandle`] for stopping
//! and joining it. Nothing carries over between runs.

mod runner;

pub use runner::GENERATION_FAILURE_NOTICE;

use crate::config::SessionConfig;
use crate::llm::client::{ChatApiClient, DialogueModel};
use crate::llm::context::ConversationContext;
use crate::llm::prompts::build_system_prompt;
use crate::messages::SessionOutcome;
use crate::speech::playback::AudioPlayer;
use crate::speech::sequencer::PlaybackSequencer;
use crate::speech::synth::{HttpSynthesizer, SpeechSynthesizer};
use crate::transcript::TranscriptSink;
use crate::Result;
use runner::TurnLoop;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// A configured podcast session, ready to start runs.
pub struct Session {
    config: SessionConfig,
    model: Arc<dyn DialogueModel>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn AudioPlayer>,
    transcript: Arc<dyn TranscriptSink>,
}

impl Session {
    /// Create a session with the real HTTP collaborators and the platform
    /// audio output.
    pub fn new(config: SessionConfig, transcript: Arc<dyn TranscriptSink>) -> Result<Self> {
        config.validate()?;
        let model = Arc::new(ChatApiClient::new(&config.llm)?);
        let synthesizer = Arc::new(HttpSynthesizer::new(&config.tts)?);
        let player = build_player(&config)?;
        Ok(Self {
            config,
            model,
            synthesizer,
            player,
            transcript,
        })
    }

    /// Create a session with caller-supplied collaborators.
    pub fn with_collaborators(
        config: SessionConfig,
        model: Arc<dyn DialogueModel>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
        transcript: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            config,
            model,
            synthesizer,
            player,
            transcript,
        }
    }

    /// Start one run on the given topic.
    ///
    /// Every run gets a freshly seeded conversation; the previous run's
    /// history is gone. At most one run should be live per session — the
    /// operator surface enforces this as a start/stop toggle.
    pub fn start(&self, topic: &str) -> SessionHandle {
        info!("starting run on topic: {topic}");

        let context = ConversationContext::new(
            build_system_prompt(topic),
            self.config.llm.history_window,
        );
        let sequencer = PlaybackSequencer::new(
            Arc::clone(&self.synthesizer),
            Arc::clone(&self.player),
            self.config.speech.max_chunk_chars,
        );
        let cancel = CancellationToken::new();

        let turn_loop = TurnLoop {
            context,
            model: Arc::clone(&self.model),
            sequencer,
            transcript: Arc::clone(&self.transcript),
            cancel: cancel.clone(),
            max_utterance_chars: self.config.speech.max_chunk_chars,
        };
        let task = tokio::spawn(turn_loop.run());

        SessionHandle { cancel, task }
    }
}

fn build_player(config: &SessionConfig) -> Result<Arc<dyn AudioPlayer>> {
    if !config.speech.playback_enabled {
        return Ok(Arc::new(crate::speech::playback::NullPlayer));
    }
    platform_player()
}

#[cfg(feature = "audio-io")]
fn platform_player() -> Result<Arc<dyn AudioPlayer>> {
    Ok(Arc::new(crate::speech::playback::RodioPlayer::spawn()?))
}

#[cfg(not(feature = "audio-io"))]
fn platform_player() -> Result<Arc<dyn AudioPlayer>> {
    tracing::warn!("built without the audio-io feature; running silently");
    Ok(Arc::new(crate::speech::playback::NullPlayer))
}

/// Control over one live run.
pub struct SessionHandle {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    /// Request a cooperative stop.
    ///
    /// Idempotent: repeated calls are no-ops. The run observes the request
    /// at its next suspension point, releases any live audio, and ends.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the run has ended (stopped or failed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end.
    pub async fn wait(&mut self) -> SessionOutcome {
        (&mut self.task).await.unwrap_or(SessionOutcome::Failed)
    }
}
