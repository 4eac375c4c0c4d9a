//! Transcript sink
//!
//! The display surface the loop writes to. Appends must never block the
//! loop, so the channel-backed sink drops the entry on a disconnected
//! receiver instead of waiting.

use crate::messages::Speaker;
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

/// One displayed line: a spoken dialogue line or a system notice.
#[derive(Clone, Debug)]
pub struct TranscriptEntry {
    /// The speaker, or `None` for system/diagnostic notices
    pub speaker: Option<Speaker>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// A spoken dialogue line
    pub fn line(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// A system/diagnostic notice
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Display label for the entry
    pub fn label(&self) -> &'static str {
        match self.speaker {
            Some(speaker) => speaker.label(),
            None => "System",
        }
    }
}

/// The display-surface contract. Appends must not block.
pub trait TranscriptSink: Send + Sync {
    fn append(&self, entry: TranscriptEntry);
}

/// A sink that forwards entries over an unbounded channel.
///
/// Lets a UI or printer consume the transcript on its own thread; a closed
/// receiver silently drops entries rather than stalling the loop.
pub struct ChannelSink {
    tx: Sender<TranscriptEntry>,
}

impl ChannelSink {
    /// Create a sink and the receiving end for the display thread.
    pub fn unbounded() -> (Self, Receiver<TranscriptEntry>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl TranscriptSink for ChannelSink {
    fn append(&self, entry: TranscriptEntry) {
        let _ = self.tx.send(entry);
    }
}

/// An in-memory transcript, shareable across threads.
#[derive(Default)]
pub struct TranscriptLog {
    entries: Mutex<Vec<TranscriptEntry>>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in append order
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clear the transcript for a fresh run
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl TranscriptSink for TranscriptLog {
    fn append(&self, entry: TranscriptEntry) {
        self.entries.lock().push(entry);
    }
}
