//! Sequential speech playback for one utterance
//!
//! The sequencer drives synthesize-then-play for each chunk of an utterance
//! strictly in order, and is the sole owner of the live [`PlaybackHandle`].
//! It re-reads the cancellation token at every suspension point, so a stop
//! takes effect before the next chunk at the latest.

use crate::speech::chunker::chunk_utterance;
use crate::speech::playback::{AudioPlayer, PlaybackHandle, PlaybackOutcome};
use crate::speech::synth::SpeechSynthesizer;
use crate::messages::Speaker;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Plays the chunks of one utterance in order, one audio resource at a time.
pub struct PlaybackSequencer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn AudioPlayer>,
    max_chunk_chars: usize,
    current: Option<PlaybackHandle>,
}

impl PlaybackSequencer {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            synthesizer,
            player,
            max_chunk_chars,
            current: None,
        }
    }

    /// Synthesize and play the utterance, completing after the last chunk's
    /// audio has finished or the run was cancelled.
    ///
    /// Synthesis failures skip the affected chunk; playback errors count as
    /// that chunk finishing. Neither ends the run.
    pub async fn speak(&mut self, speaker: Speaker, text: &str, cancel: &CancellationToken) {
        let chunks = chunk_utterance(text, self.max_chunk_chars);
        debug!("speaking {} chunk(s) as {}", chunks.len(), speaker.label());

        for chunk in chunks {
            if cancel.is_cancelled() {
                break;
            }

            let audio = match self.synthesizer.synthesize(speaker, &chunk).await {
                Ok(audio) => audio,
                Err(e) => {
                    warn!("skipping chunk, synthesis failed: {e}");
                    continue;
                }
            };

            // the stop may have landed while the synthesis call was in flight
            if cancel.is_cancelled() {
                break;
            }

            // fully tear down the previous audio resource before acquiring a
            // new one; this is what keeps the at-most-one-handle invariant
            self.release();

            match self.player.play(audio).await {
                Ok(handle) => self.current = Some(handle),
                Err(e) => {
                    warn!("skipping chunk, playback could not start: {e}");
                    continue;
                }
            }

            let cancelled = self.await_current(cancel).await;
            self.release();
            if cancelled {
                break;
            }
        }

        self.release();
    }

    /// Wait until the live handle resolves or the run is cancelled.
    /// Returns true if cancellation cut the playback short.
    async fn await_current(&mut self, cancel: &CancellationToken) -> bool {
        let Some(handle) = self.current.as_mut() else {
            return cancel.is_cancelled();
        };

        tokio::select! {
            outcome = handle.wait() => {
                if outcome == PlaybackOutcome::Error {
                    warn!("playback ended with an error; continuing");
                }
                false
            }
            () = cancel.cancelled() => true,
        }
    }

    /// Stop and release the live audio resource, if any.
    pub fn release(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.release();
        }
    }
}

impl Drop for PlaybackSequencer {
    fn drop(&mut self) {
        self.release();
    }
}
