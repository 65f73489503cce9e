//! Conversation message types.

use crate::emotion::EmotionCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Reply chosen from the active persona.
    Assistant,
}

/// A single turn in a conversation history.
///
/// Messages are created by the session only and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID v4).
    pub id: String,
    pub role: MessageRole,
    /// Non-empty message text.
    pub text: String,
    /// Creation time; non-decreasing within a session.
    pub timestamp: DateTime<Utc>,
    /// Category assigned to a user turn, or answered by an assistant turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionCategory>,
}

impl Message {
    pub(crate) fn new(
        role: MessageRole,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        emotion: EmotionCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp,
            emotion: Some(emotion),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}
