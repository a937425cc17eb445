//! Session views and turn results.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Turn-taking state of a conversation session.
///
/// Failures do not have a state of their own: they are folded into the log
/// and the session returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No remote call is outstanding; the user may submit.
    Idle,
    /// Exactly one remote call is outstanding.
    AwaitingReply,
}

/// Read-only copy of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The persona currently bound to the conversation
    pub active_persona_id: String,
    /// Messages in display order
    pub log: Vec<ChatMessage>,
    /// True while a reply is outstanding (drives the typing indicator)
    pub pending: bool,
}

impl SessionSnapshot {
    pub fn state(&self) -> SessionState {
        if self.pending {
            SessionState::AwaitingReply
        } else {
            SessionState::Idle
        }
    }
}

/// Why a submission was ignored without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The text was empty or whitespace only.
    BlankInput,
    /// A reply for the previous turn is still outstanding.
    ReplyPending,
}

/// Result of `submit_user_turn` as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model replied and the reply was appended.
    Replied(ChatMessage),
    /// The remote call failed; the fallback line was appended.
    FellBack(ChatMessage),
    /// Nothing was appended and no call was issued.
    Ignored(IgnoreReason),
    /// The session was reset while the call was outstanding; the result was
    /// dropped.
    Discarded,
}

impl TurnOutcome {
    /// The message this turn appended for the model, if any.
    pub fn reply(&self) -> Option<&ChatMessage> {
        match self {
            TurnOutcome::Replied(msg) | TurnOutcome::FellBack(msg) => Some(msg),
            TurnOutcome::Ignored(_) | TurnOutcome::Discarded => None,
        }
    }
}
