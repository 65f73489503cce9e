pub mod config_service;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod toml_persona_repository;
pub mod toml_session_repository;

pub use crate::config_service::{ConfigService, LoadedConfig};
pub use crate::logging::init_tracing;
pub use crate::paths::CompanionPaths;
pub use crate::toml_persona_repository::TomlPersonaRepository;
pub use crate::toml_session_repository::TomlSessionRepository;
