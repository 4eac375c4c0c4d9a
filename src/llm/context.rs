//! Conversation context management for dialogue generation
//!
//! Owns the ordered message history of one run and derives the bounded
//! request window sent to the language model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// System prompt/instructions
    System,
    /// Per-turn instruction (never persisted into history)
    User,
    /// A generated dialogue line
    Assistant,
}

impl MessageRole {
    /// Convert to the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Role of the message sender
    pub role: MessageRole,

    /// Message content
    pub content: String,

    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a new conversation message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// The conversation history of one run.
///
/// The history starts with exactly one `System` message and grows by
/// appending `Assistant` lines in order; it is never reordered and the
/// system message is never evicted. Requests to the model see at most the
/// last `window` non-system messages (plus the system message), so request
/// size stays bounded no matter how long the run gets.
#[derive(Clone, Debug)]
pub struct ConversationContext {
    /// Full history; index 0 is always the system message
    messages: Vec<ConversationMessage>,

    /// Maximum number of non-system messages included in a request
    window: usize,
}

impl ConversationContext {
    /// Create a new context seeded with a system prompt
    pub fn new(system_prompt: impl Into<String>, window: usize) -> Self {
        Self {
            messages: vec![ConversationMessage::system(system_prompt)],
            window,
        }
    }

    /// Append a generated dialogue line to the history
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::assistant(content));
    }

    /// The full history, system message included
    pub fn history(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Number of messages in the history, system message included
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of non-system messages in the history
    pub fn line_count(&self) -> usize {
        self.messages.len().saturating_sub(1)
    }

    /// The bounded request view: the system message followed by at most the
    /// last `window` non-system messages, verbatim and in order.
    ///
    /// Histories shorter than the window pass through unchanged. This is a
    /// pure function of the history; nothing is evicted.
    pub fn trimmed(&self) -> Vec<ConversationMessage> {
        let Some((system, rest)) = self.messages.split_first() else {
            return Vec::new();
        };
        let start = rest.len().saturating_sub(self.window);
        let mut out = Vec::with_capacity(1 + rest.len() - start);
        out.push(system.clone());
        out.extend_from_slice(&rest[start..]);
        out
    }

    /// The trimmed view plus a transient `User` instruction for this turn.
    ///
    /// The instruction is part of the request only; it is never stored in
    /// the history.
    pub fn request_with(&self, instruction: impl Into<String>) -> Vec<ConversationMessage> {
        let mut request = self.trimmed();
        request.push(ConversationMessage::user(instruction));
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_starts_with_system() {
        let ctx = ConversationContext::new("You are simulating a podcast.", 10);
        assert_eq!(ctx.message_count(), 1);
        assert_eq!(ctx.history()[0].role, MessageRole::System);
        assert_eq!(ctx.line_count(), 0);
    }

    #[test]
    fn test_short_history_passes_through() {
        let mut ctx = ConversationContext::new("System", 10);
        ctx.push_assistant("Line 1");
        ctx.push_assistant("Line 2");

        let trimmed = ctx.trimmed();
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[0].role, MessageRole::System);
        assert_eq!(trimmed[1].content, "Line 1");
        assert_eq!(trimmed[2].content, "Line 2");
    }

    #[test]
    fn test_trimmed_keeps_system_and_last_window() {
        // system + 12 lines with a window of 10 trims to 11 messages
        let mut ctx = ConversationContext::new("System", 10);
        for i in 0..12 {
            ctx.push_assistant(format!("Line {}", i));
        }

        let trimmed = ctx.trimmed();
        assert_eq!(trimmed.len(), 11);
        assert_eq!(trimmed[0].role, MessageRole::System);
        assert_eq!(trimmed[1].content, "Line 2");
        assert_eq!(trimmed[10].content, "Line 11");

        // the suffix matches the tail of the full history verbatim
        let tail = &ctx.history()[ctx.message_count() - 10..];
        for (got, want) in trimmed[1..].iter().zip(tail) {
            assert_eq!(got.content, want.content);
        }
    }

    #[test]
    fn test_request_instruction_is_not_persisted() {
        let mut ctx = ConversationContext::new("System", 10);
        ctx.push_assistant("Hello");

        let request = ctx.request_with("Your turn.");
        assert_eq!(request.len(), 3);
        assert_eq!(request[2].role, MessageRole::User);
        assert_eq!(request[2].content, "Your turn.");

        // history is untouched
        assert_eq!(ctx.message_count(), 2);
        assert!(ctx.history().iter().all(|m| m.role != MessageRole::User));
    }

    #[test]
    fn test_history_order_is_insertion_order() {
        let mut ctx = ConversationContext::new("System", 3);
        ctx.push_assistant("a");
        ctx.push_assistant("b");
        ctx.push_assistant("a");

        let contents: Vec<_> = ctx.history()[1..].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(MessageRole::System.as_str(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }
}
