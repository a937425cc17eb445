//! Session domain module.
//!
//! This module contains the conversation message types, the rule that turns a
//! message log into remote-call history, and the read-only views handed to the
//! presentation layer.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`)
//! - `history`: History assembly (`HistoryEntry`, `assemble_history`)
//! - `model`: Session views and turn results (`SessionSnapshot`, `TurnOutcome`)
//!
//! The stateful session itself lives in `hakone-interaction`.

mod history;
mod message;
mod model;

// Re-export public API
pub use history::{HistoryEntry, assemble_history};
pub use message::{ChatMessage, MessageRole};
pub use model::{IgnoreReason, SessionSnapshot, SessionState, TurnOutcome};
