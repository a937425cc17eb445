//! Persona domain model.
//!
//! A persona is a character the user chats with: the greeting that opens every
//! conversation, the behavioural rules sent to the remote model and the line
//! shown when the model cannot be reached.

use serde::{Deserialize, Serialize};

/// Placeholder in a greeting that is replaced with the user's nickname.
pub const USER_PLACEHOLDER: &str = "{user}";

/// A character profile driving the remote model's tone and behaviour.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Stable identifier, also used as display name (e.g. "Kuroda Yukinari")
    pub id: String,
    /// First model-authored message of every conversation
    pub greeting: String,
    /// Behavioural rules passed verbatim to the remote model, never shown
    pub system_instruction: String,
    /// Appended in place of a reply when the remote call fails
    pub fallback: String,
}

impl Persona {
    /// Renders the greeting for the given user nickname.
    ///
    /// Every occurrence of [`USER_PLACEHOLDER`] is replaced; greetings without
    /// the placeholder are returned unchanged.
    pub fn render_greeting(&self, nickname: &str) -> String {
        self.greeting.replace(USER_PLACEHOLDER, nickname)
    }

    /// Returns the first whitespace-separated part of the id.
    pub fn family_name(&self) -> &str {
        self.id.split_whitespace().next().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(greeting: &str) -> Persona {
        Persona {
            id: "Izumida Touichirou".to_string(),
            greeting: greeting.to_string(),
            system_instruction: "IDENTITY: Izumida".to_string(),
            fallback: "Abu...".to_string(),
        }
    }

    #[test]
    fn test_render_greeting_substitutes_nickname() {
        let p = persona("{user}. Tell me, do you wish to talk cycling?");
        assert_eq!(
            p.render_greeting("Onoda"),
            "Onoda. Tell me, do you wish to talk cycling?"
        );
    }

    #[test]
    fn test_render_greeting_without_placeholder() {
        let p = persona("Tell me, do you wish to talk cycling?");
        assert_eq!(
            p.render_greeting("Onoda"),
            "Tell me, do you wish to talk cycling?"
        );
    }

    #[test]
    fn test_family_name() {
        assert_eq!(persona("").family_name(), "Izumida");
    }
}
