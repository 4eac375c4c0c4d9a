//! Shared value types passed between the session, speech, and transcript layers.

use serde::{Deserialize, Serialize};

/// One of the two fixed podcast roles.
///
/// The host opens the topic and keeps asking questions; the guest answers
/// with detail. Exactly one speaker owns each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    Host,
    Guest,
}

impl Speaker {
    /// The speaker owning the turn after this one.
    pub fn flip(self) -> Self {
        match self {
            Speaker::Host => Speaker::Guest,
            Speaker::Guest => Speaker::Host,
        }
    }

    /// Display label used in the transcript and in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Host => "Host",
            Speaker::Guest => "Guest",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator stopped the run.
    Stopped,
    /// The generation collaborator returned no usable reply; the run ended
    /// itself after surfacing a diagnostic.
    Failed,
}
