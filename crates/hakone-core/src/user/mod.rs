//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model
//! - `service`: User service trait and the constant default implementation

mod model;
mod service;

// Re-export public API
pub use model::{DEFAULT_NICKNAME, UserProfile};
pub use service::{DefaultUserService, UserService};
