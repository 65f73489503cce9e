//! Session domain module.
//!
//! This module contains the conversation session, its message types and
//! state machine, and the persistence interface.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `state`: Turn state and observer types (`SessionState`, `SessionEvent`, `SessionListener`)
//! - `conversation`: The session itself (`ConversationSession`)
//! - `snapshot`: Serializable session copy (`SessionSnapshot`)
//! - `repository`: Repository trait for snapshot persistence

mod conversation;
mod message;
mod repository;
mod snapshot;
mod state;


// Re-export public API
pub use conversation::ConversationSession;
pub use message::{Message, MessageRole};
pub use repository::SessionRepository;
pub use snapshot::SessionSnapshot;
pub use state::{SessionEvent, SessionListener, SessionState};
