//! Persona domain module.
//!
//! This module contains the persona model, the built-in presets, the shared
//! read-only catalog, and the repository interface for user personas.
//!
//! # Module Structure
//!
//! - `model`: Core persona models (`Persona`, `PersonaSource`, `ResponseTable`)
//! - `preset`: Default system personas
//! - `catalog`: Immutable registry with custom-name fallback (`PersonaCatalog`)
//! - `repository`: Repository trait for user persona persistence

mod catalog;
mod model;
mod preset;
mod repository;

// Re-export public API
pub use catalog::{PersonaCatalog, ResolvedPersona};
pub use model::{Persona, PersonaSource, ResponseTable};
pub use preset::{DEFAULT_PERSONA_NAME, get_default_presets};
pub use repository::PersonaRepository;
