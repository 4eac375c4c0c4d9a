//! Dialogue generation
//!
//! This module provides the language-model side of the podcast engine:
//!
//! - **config**: connection and sampling parameters for the chat endpoint
//! - **context**: conversation history and the bounded request window
//! - **prompts**: the podcast system prompt and the per-turn instruction
//! - **client**: the [`DialogueModel`] contract and its HTTP implementation
//!
//! Generation failures never cross the [`DialogueModel`] boundary as errors:
//! any non-success status, malformed payload, or network problem is reported
//! as `None` and handled uniformly by the turn loop.

pub mod client;
pub mod config;
pub mod context;
pub mod prompts;

pub use client::{ChatApiClient, DialogueModel};
pub use config::LlmConfig;
pub use context::{ConversationContext, ConversationMessage, MessageRole};
pub use prompts::{build_system_prompt, turn_instruction};
