//! System prompts and the per-turn instruction for the podcast dialogue

use crate::messages::Speaker;

/// Build the system prompt that seeds a run from an operator-supplied topic.
///
/// The prompt fixes the two personas and the conversational register; the
/// model is asked for bare spoken lines with no speaker prefixes so replies
/// can go straight to the transcript and the synthesizer.
pub fn build_system_prompt(topic: &str) -> String {
    format!(
        r#"You are simulating a podcast between two people on the topic: "{topic}".

The rules:
1. Speaker A (Host): curious, asks questions, keeps the debate going.
2. Speaker B (Guest): an expert and enthusiast, gives details and anecdotes.
3. Format: conversational and lively, short replies (3 sentences at most).
4. Do not add prefixes like "Host:" or "Guest:"; answer with the spoken text only.
5. The conversation is open-ended; never wrap it up for good.

Start with the Host introducing the topic."#
    )
}

/// Build the transient instruction injected before each generation call.
///
/// Names whose turn it is, bounds the utterance length, and forbids
/// restating earlier lines verbatim. Sent as a `user` message with the
/// request; never persisted into history.
pub fn turn_instruction(speaker: Speaker, max_chars: usize) -> String {
    format!(
        "It is the {role}'s turn to speak. Reply with the {role}'s next line only, \
         at most {max_chars} characters. Do not repeat earlier lines word for word.",
        role = speaker.label(),
    )
}
