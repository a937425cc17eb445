//! Remote reply generation contract.
//!
//! The conversation session depends only on this trait; the Gemini HTTP client
//! in `hakone-interaction` is one implementation and tests substitute fakes.

use crate::error::RemoteCallError;
use crate::session::HistoryEntry;
use serde::Serialize;

/// Default upper bound on generated tokens per reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Everything the remote model needs for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRequest {
    /// The active persona's behavioural rules, verbatim
    pub system_instruction: String,
    /// Prior conversation, greeting excluded
    pub history: Vec<HistoryEntry>,
    /// The user's new message, not duplicated in `history`
    pub message: String,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

/// A service that produces the persona's next reply.
#[async_trait::async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generates a reply for the given request.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The reply text
    /// - `Err(RemoteCallError)`: Network, quota, server or decoding failure
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<String, RemoteCallError>;
}
