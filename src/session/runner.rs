//! The turn loop
//!
//! One run is one task executing this loop: trim the history, ask the model
//! for the next line, record and display it, speak it, flip the turn owner,
//! repeat. The loop only ends through cancellation or a generation failure;
//! pacing comes entirely from network latency and playback time.

use crate::llm::client::DialogueModel;
use crate::llm::context::ConversationContext;
use crate::llm::prompts::turn_instruction;
use crate::messages::{SessionOutcome, Speaker};
use crate::speech::sequencer::PlaybackSequencer;
use crate::transcript::{TranscriptEntry, TranscriptSink};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Diagnostic notice surfaced to the transcript when generation fails.
pub const GENERATION_FAILURE_NOTICE: &str =
    "The language model returned no reply. The conversation has stopped.";

/// Everything one run needs.
pub(crate) struct TurnLoop {
    pub context: ConversationContext,
    pub model: Arc<dyn DialogueModel>,
    pub sequencer: PlaybackSequencer,
    pub transcript: Arc<dyn TranscriptSink>,
    pub cancel: CancellationToken,
    pub max_utterance_chars: usize,
}

impl TurnLoop {
    /// Run until cancelled or failed. The host always opens.
    pub(crate) async fn run(mut self) -> SessionOutcome {
        let mut turn = Speaker::Host;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            debug!("requesting next line for {}", turn.label());
            let request = self
                .context
                .request_with(turn_instruction(turn, self.max_utterance_chars));
            let reply = self.model.next_line(&request).await;

            // a stop that landed during the call wins over its result
            if self.cancel.is_cancelled() {
                break;
            }

            let Some(line) = reply
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
            else {
                warn!("generation returned no usable reply; ending the run");
                self.transcript
                    .append(TranscriptEntry::notice(GENERATION_FAILURE_NOTICE));
                self.sequencer.release();
                self.cancel.cancel();
                return SessionOutcome::Failed;
            };

            self.context.push_assistant(line.clone());
            self.transcript.append(TranscriptEntry::line(turn, &line));

            self.sequencer.speak(turn, &line, &self.cancel).await;

            if self.cancel.is_cancelled() {
                break;
            }

            turn = turn.flip();
        }

        info!("run stopped after {} line(s)", self.context.line_count());
        self.sequencer.release();
        SessionOutcome::Stopped
    }
}
