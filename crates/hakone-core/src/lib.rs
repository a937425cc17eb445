//! hakone-core
//!
//! Pure domain types for the Hakone persona chat: personas and their registry,
//! chat messages, history assembly, the reply-generation contract and
//! configuration models. No network or file I/O.

pub mod config;
pub mod error;
pub mod persona;
pub mod reply;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{HakoneError, RemoteCallError};
