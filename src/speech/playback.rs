//! Audio playback backends and the single live playback resource
//!
//! At most one [`PlaybackHandle`] exists at any instant, system-wide. Every
//! handle carries a stop hook into the underlying audio object and a
//! one-shot completion signal; natural end, playback error, and forced stop
//! all resolve that signal exactly once, so the sequencer's await can never
//! hang and the audio resource is always released.

use crate::Result;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// How a playback ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The audio played to its natural end
    Finished,
    /// Playback was stopped before the end
    Stopped,
    /// The backend failed while decoding or playing
    Error,
}

type StopHook = Box<dyn Fn() + Send>;

/// The one in-flight audio resource.
///
/// Owned exclusively by the sequencer; dropping the handle stops playback
/// and releases the underlying resource. The completion signal is sent by
/// the player backend exactly once.
pub struct PlaybackHandle {
    stop: Option<StopHook>,
    done: oneshot::Receiver<PlaybackOutcome>,
}

impl PlaybackHandle {
    /// Create a handle from a stop hook and a completion receiver.
    pub fn new(stop: StopHook, done: oneshot::Receiver<PlaybackOutcome>) -> Self {
        Self {
            stop: Some(stop),
            done,
        }
    }

    /// Wait for the completion signal.
    ///
    /// A dead backend counts as a playback error.
    pub async fn wait(&mut self) -> PlaybackOutcome {
        (&mut self.done).await.unwrap_or(PlaybackOutcome::Error)
    }

    /// Stop playback and release the resource immediately.
    pub fn release(mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

/// A playback backend.
///
/// `play` hands the synthesized bytes to the backend and returns the live
/// handle; it must not wait for playback to end.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> Result<PlaybackHandle>;
}

/// A player that discards audio and completes immediately.
///
/// Used when the build has no audio output (CI, text-only runs) so the rest
/// of the engine behaves identically.
#[derive(Debug, Default)]
pub struct NullPlayer;

#[async_trait]
impl AudioPlayer for NullPlayer {
    async fn play(&self, _audio: Vec<u8>) -> Result<PlaybackHandle> {
        let (done_tx, done_rx) = oneshot::channel();
        let _ = done_tx.send(PlaybackOutcome::Finished);
        Ok(PlaybackHandle::new(Box::new(|| {}), done_rx))
    }
}

#[cfg(feature = "audio-io")]
pub use rodio_player::RodioPlayer;

#[cfg(feature = "audio-io")]
mod rodio_player {
    use super::{AudioPlayer, PlaybackHandle, PlaybackOutcome};
    use crate::{BanterError, Result};
    use async_trait::async_trait;
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use parking_lot::Mutex;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;
    use tracing::{error, warn};

    /// One queued playback: the audio bytes, the abort flag set by the stop
    /// hook, the slot the thread publishes its sink into, and the one-shot
    /// completion sender.
    struct PlayRequest {
        bytes: Vec<u8>,
        abort: Arc<AtomicBool>,
        sink_slot: Arc<Mutex<Option<Arc<Sink>>>>,
        done: oneshot::Sender<PlaybackOutcome>,
    }

    /// Playback over the default audio output device.
    ///
    /// A dedicated thread owns the output stream (it is not `Send`) and
    /// plays requests one at a time; handles reach back into it through the
    /// per-request sink slot.
    pub struct RodioPlayer {
        requests: Sender<PlayRequest>,
    }

    impl RodioPlayer {
        /// Start the playback thread.
        pub fn spawn() -> Result<Self> {
            let (tx, rx) = unbounded::<PlayRequest>();
            std::thread::Builder::new()
                .name("banter-playback".to_string())
                .spawn(move || playback_thread(rx))
                .map_err(|e| {
                    BanterError::PlaybackError(format!("could not start playback thread: {e}"))
                })?;
            Ok(Self { requests: tx })
        }
    }

    #[async_trait]
    impl AudioPlayer for RodioPlayer {
        async fn play(&self, audio: Vec<u8>) -> Result<PlaybackHandle> {
            let (done_tx, done_rx) = oneshot::channel();
            let abort = Arc::new(AtomicBool::new(false));
            let sink_slot: Arc<Mutex<Option<Arc<Sink>>>> = Arc::new(Mutex::new(None));

            self.requests
                .send(PlayRequest {
                    bytes: audio,
                    abort: Arc::clone(&abort),
                    sink_slot: Arc::clone(&sink_slot),
                    done: done_tx,
                })
                .map_err(|_| BanterError::PlaybackError("playback thread is gone".to_string()))?;

            let stop = Box::new(move || {
                abort.store(true, Ordering::Relaxed);
                if let Some(sink) = sink_slot.lock().take() {
                    sink.stop();
                }
            });

            Ok(PlaybackHandle::new(stop, done_rx))
        }
    }

    fn playback_thread(rx: Receiver<PlayRequest>) {
        let (_stream, stream_handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                error!("audio output device unavailable: {e}");
                for request in rx.iter() {
                    let _ = request.done.send(PlaybackOutcome::Error);
                }
                return;
            }
        };

        for request in rx.iter() {
            play_one(&stream_handle, request);
        }
    }

    fn play_one(stream_handle: &OutputStreamHandle, request: PlayRequest) {
        if request.abort.load(Ordering::Relaxed) {
            let _ = request.done.send(PlaybackOutcome::Stopped);
            return;
        }

        let source = match Decoder::new(Cursor::new(request.bytes)) {
            Ok(s) => s,
            Err(e) => {
                warn!("audio decode failed: {e}");
                let _ = request.done.send(PlaybackOutcome::Error);
                return;
            }
        };

        let sink = match Sink::try_new(stream_handle) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                warn!("could not open playback sink: {e}");
                let _ = request.done.send(PlaybackOutcome::Error);
                return;
            }
        };

        *request.sink_slot.lock() = Some(Arc::clone(&sink));
        sink.append(source);

        // a stop hook that ran between the abort check and the slot store
        // missed the sink; honor it here
        if request.abort.load(Ordering::Relaxed) {
            sink.stop();
        }

        sink.sleep_until_end();
        request.sink_slot.lock().take();

        let outcome = if request.abort.load(Ordering::Relaxed) {
            PlaybackOutcome::Stopped
        } else {
            PlaybackOutcome::Finished
        };
        let _ = request.done.send(outcome);
    }
}
