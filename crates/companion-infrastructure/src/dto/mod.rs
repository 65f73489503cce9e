//! Data transfer objects for the on-disk TOML formats.

mod config_root;
mod persona;
mod session;

pub use config_root::ConfigRoot;
pub use persona::{PersonaConfig, PersonaSourceDTO};
pub use session::{
    MessageDTO, SESSION_ENTITY, SessionDTO, SessionV1_0_0, create_session_migrator,
    session_from_toml, session_to_toml,
};
