//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Author of a message, in the remote model's role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Typed by the user.
    User,
    /// Authored by the persona: greeting, reply or fallback line.
    Model,
}

impl MessageRole {
    /// Role name as sent on the wire ("user" / "model").
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }
}

/// A single message in a session log.
///
/// Messages are never edited after they are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonically increasing within a session, for stable display keys.
    pub id: u64,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The literal content.
    pub text: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(id: u64, role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Model.as_str(), "model");
        assert_eq!(serde_json::to_string(&MessageRole::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let msg = ChatMessage::new(7, MessageRole::User, "  yes  ");
        assert_eq!(msg.text, "  yes  ");
        assert!(msg.is_user());
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }
}
