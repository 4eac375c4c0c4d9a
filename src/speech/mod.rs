//! Speech output
//!
//! Turns one generated utterance into audible speech:
//!
//! - **chunker**: splits the utterance into bounded, speakable segments
//! - **synth**: the TTS collaborator contract and its HTTP implementation
//! - **playback**: the single live audio resource and the player backends
//! - **sequencer**: plays the chunks strictly in order under cancellation
//!
//! A synthesis or playback failure only ever costs the affected chunk; the
//! run itself keeps going.

pub mod chunker;
pub mod playback;
pub mod sequencer;
pub mod synth;

pub use chunker::chunk_utterance;
pub use playback::{AudioPlayer, NullPlayer, PlaybackHandle, PlaybackOutcome};
pub use sequencer::PlaybackSequencer;
pub use synth::{HttpSynthesizer, SpeechSynthesizer};

#[cfg(feature = "audio-io")]
pub use playback::RodioPlayer;
