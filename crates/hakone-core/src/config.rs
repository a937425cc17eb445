//! Configuration models.
//!
//! `RootConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Loading lives in `hakone-infrastructure`; these types only describe shape
//! and defaults.

use crate::reply::DEFAULT_MAX_OUTPUT_TOKENS;
use crate::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default bound on a single remote call, in seconds.
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub debug: DebugSettings,
}

const MIN_REPLY_TIMEOUT_SECS: u64 = 1;

/// Settings for conversation sessions and the remote model.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Model name passed to the remote API
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on generated tokens per reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Seconds to wait for a reply before falling back
    #[serde(default = "default_reply_timeout_secs")]
    pub reply_timeout_secs: u64,
    /// Persona a fresh chat opens with; registry default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_persona: Option<String>,
}

impl ChatSettings {
    /// Time allowed for one reply, never less than a second.
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs.max(MIN_REPLY_TIMEOUT_SECS))
    }

    /// Overrides the reply timeout.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout_secs = timeout.as_secs().max(MIN_REPLY_TIMEOUT_SECS);
        self
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            reply_timeout_secs: default_reply_timeout_secs(),
            default_persona: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_reply_timeout_secs() -> u64 {
    DEFAULT_REPLY_TIMEOUT_SECS
}

/// Debug and logging settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DebugSettings {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}
