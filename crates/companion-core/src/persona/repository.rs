//! Persona repository trait.
//!
//! Defines the interface for loading user-authored personas that extend the
//! built-in presets.

use super::model::Persona;
use crate::error::Result;

/// An abstract repository for persona persistence.
///
/// Decouples catalog construction from the storage mechanism (TOML file,
/// embedded table, remote API).
pub trait PersonaRepository: Send + Sync {
    /// Retrieves all stored personas.
    fn get_all(&self) -> Result<Vec<Persona>>;

    /// Saves all personas, replacing existing ones.
    fn save_all(&self, personas: &[Persona]) -> Result<()>;
}
