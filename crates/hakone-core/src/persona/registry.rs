//! Persona registry.
//!
//! Pure lookup over a fixed set of personas. Unknown ids are configuration
//! errors, never recovered at runtime.

use super::model::Persona;
use super::preset::{KURODA_YUKINARI, get_default_presets};
use crate::error::{HakoneError, Result};
use std::sync::Arc;

/// An immutable, ordered set of personas keyed by id.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Arc<Persona>>,
    default_id: String,
}

impl PersonaRegistry {
    /// Creates the registry of built-in presets.
    pub fn builtin() -> Self {
        Self {
            personas: get_default_presets().into_iter().map(Arc::new).collect(),
            default_id: KURODA_YUKINARI.to_string(),
        }
    }

    /// Creates a registry from a custom persona set.
    ///
    /// The first persona becomes the default.
    ///
    /// # Errors
    ///
    /// Returns `HakoneError::Config` if the set is empty or contains
    /// duplicate ids.
    pub fn from_personas(personas: Vec<Persona>) -> Result<Self> {
        let default_id = personas
            .first()
            .map(|p| p.id.clone())
            .ok_or_else(|| HakoneError::config("persona registry must not be empty"))?;

        for (index, persona) in personas.iter().enumerate() {
            if personas[..index].iter().any(|p| p.id == persona.id) {
                return Err(HakoneError::config(format!(
                    "duplicate persona id '{}'",
                    persona.id
                )));
            }
        }

        Ok(Self {
            personas: personas.into_iter().map(Arc::new).collect(),
            default_id,
        })
    }

    /// Looks up a persona by its exact id.
    ///
    /// # Errors
    ///
    /// Returns `HakoneError::UnknownPersona` if `id` is not registered.
    pub fn get(&self, id: &str) -> Result<Arc<Persona>> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| HakoneError::unknown_persona(id))
    }

    /// Resolves loosely typed user input to a persona.
    ///
    /// Matches the full id or any single name part, ignoring case, so
    /// "kuroda", "Yukinari" and "kuroda yukinari" all resolve to the same
    /// persona. Ambiguous input resolves to nothing.
    pub fn resolve(&self, query: &str) -> Option<Arc<Persona>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(exact) = self.personas.iter().find(|p| p.id.eq_ignore_ascii_case(query)) {
            return Some(exact.clone());
        }

        let mut matches = self.personas.iter().filter(|p| {
            p.id
                .split_whitespace()
                .any(|part| part.eq_ignore_ascii_case(query))
        });
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }

    /// Returns the persona a fresh chat opens with.
    pub fn default_persona(&self) -> Arc<Persona> {
        // default_id is always taken from the registered set
        self.personas
            .iter()
            .find(|p| p.id == self.default_id)
            .unwrap_or(&self.personas[0])
            .clone()
    }

    /// Iterates personas in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Persona>> {
        self.personas.iter()
    }

    /// Returns all persona ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
