//! Serializable copy of a session for persistence collaborators.

use super::message::{Message, MessageRole};
use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain-data view of a session: identity, active persona and history.
///
/// The catalog, classifier and random source are not part of a snapshot;
/// they are supplied again on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the snapshot
    pub updated_at: DateTime<Utc>,
    /// Active persona name as chosen by the user
    pub persona: String,
    /// Messages in insertion order
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl SessionSnapshot {
    /// State implied by the stored history.
    ///
    /// A trailing user message means the reply was never produced.
    pub fn state(&self) -> SessionState {
        match self.messages.last() {
            None => SessionState::Idle,
            Some(last) if last.role == MessageRole::User => SessionState::AwaitingReply,
            Some(_) => SessionState::Ready,
        }
    }
}
