//! Companion chat engine.
//!
//! Classifies the emotional intent of a user message, picks a reply from the
//! active persona's table without repeating recent lines, and records both
//! turns in a session.
//!
//! ```
//! use std::sync::Arc;
//! use companion_core::{ConversationSession, PersonaCatalog};
//!
//! let catalog = Arc::new(PersonaCatalog::builtin().unwrap());
//! let mut session = ConversationSession::new(catalog, "teacher");
//! let reply = session.append_user("오늘 정말 행복한 하루였어").unwrap();
//! assert!(!reply.text.is_empty());
//! assert_eq!(session.history().len(), 2);
//! ```

pub mod config;
pub mod emotion;
pub mod error;
pub mod persona;
pub mod selector;
pub mod session;

// Re-export common types
pub use config::EngineConfig;
pub use emotion::{EmotionCategory, EmotionClassifier};
pub use error::{CompanionError, Result};
pub use persona::{Persona, PersonaCatalog};
pub use selector::ResponseSelector;
pub use session::{ConversationSession, Message, MessageRole, SessionSnapshot, SessionState};
