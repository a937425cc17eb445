//! UserProfile domain model.

use serde::{Deserialize, Serialize};

/// Nickname used in greetings when none is configured.
pub const DEFAULT_NICKNAME: &str = "Rookie";

/// User profile domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// How the personas address the user
    #[serde(default = "default_nickname")]
    pub nickname: String,
}

fn default_nickname() -> String {
    DEFAULT_NICKNAME.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
        }
    }
}
