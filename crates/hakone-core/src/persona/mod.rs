//! Persona domain module.
//!
//! This module contains the persona model, the fixed preset roster and the
//! registry used to look personas up by id.
//!
//! # Module Structure
//!
//! - `model`: Core persona domain model (`Persona`)
//! - `preset`: The built-in Hakone climbers
//! - `registry`: Lookup by id (`PersonaRegistry`)
//!
//! # Usage
//!
//! ```ignore
//! use hakone_core::persona::{Persona, PersonaRegistry};
//! ```

mod model;
mod preset;
mod registry;

// Re-export public API
pub use model::{Persona, USER_PLACEHOLDER};
pub use preset::{IZUMIDA_TOUICHIROU, KURODA_YUKINARI, SHINKAI_YUTO, get_default_presets};
pub use registry::PersonaRegistry;
