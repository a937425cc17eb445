//! History assembly for remote calls.
//!
//! The greeting that opens a log is synthesized locally, not produced by the
//! model in answer to anything, so it is left out of the context sent back to
//! the model. Every later message is sent in log order, including fallback
//! lines from failed turns.

use super::message::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

/// One prior message as presented to the remote model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub text: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
        }
    }
}

/// Builds the history for the next remote call from a session log.
///
/// The log passed here must not yet contain the user message being sent; that
/// message travels separately as the current turn.
pub fn assemble_history(log: &[ChatMessage]) -> Vec<HistoryEntry> {
    let skip = match log.first() {
        Some(first) if first.role == MessageRole::Model => 1,
        _ => 0,
    };
    log.iter().skip(skip).map(HistoryEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: u64, role: MessageRole, text: &str) -> ChatMessage {
        ChatMessage::new(id, role, text)
    }

    #[test]
    fn test_greeting_only_log_has_empty_history() {
        let log = vec![msg(0, MessageRole::Model, "What do you want to talk about?")];
        assert!(assemble_history(&log).is_empty());
    }

    #[test]
    fn test_history_excludes_only_the_greeting() {
        let log = vec![
            msg(0, MessageRole::Model, "greeting"),
            msg(1, MessageRole::User, "hi"),
            msg(2, MessageRole::Model, "Abu!"),
            msg(3, MessageRole::User, "climb?"),
            msg(4, MessageRole::Model, "fallback line"),
        ];
        let history = assemble_history(&log);
        let expected: Vec<HistoryEntry> = log[1..].iter().map(HistoryEntry::from).collect();
        assert_eq!(history, expected);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[3].text, "fallback line");
    }

    #[test]
    fn test_log_without_leading_greeting_is_sent_whole() {
        let log = vec![msg(0, MessageRole::User, "hi"), msg(1, MessageRole::Model, "yo")];
        assert_eq!(assemble_history(&log).len(), 2);
    }

    #[test]
    fn test_empty_log() {
        assert!(assemble_history(&[]).is_empty());
    }
}
