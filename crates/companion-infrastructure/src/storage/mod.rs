//! Storage layer for atomic file operations.

mod toml_document;

pub use toml_document::{StorageError, TomlDocument};
