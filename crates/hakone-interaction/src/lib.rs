//! hakone-interaction
//!
//! Conversation turn-taking and the Gemini reply generator.

pub mod conversation;
pub mod gemini_api_agent;

pub use conversation::{ConversationSession, ConversationSessionBuilder, DEFAULT_FALLBACK};
pub use gemini_api_agent::GeminiApiAgent;
