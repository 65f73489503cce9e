//! Session snapshot DTOs and migrations

use chrono::{DateTime, Utc};
use companion_core::emotion::EmotionCategory;
use companion_core::session::{Message, MessageRole, SessionSnapshot};
use companion_core::{CompanionError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use version_migrate::{FromDomain, IntoDomain, Versioned};

/// Entity name under which the session migration path is registered.
pub const SESSION_ENTITY: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRoleDTO {
    User,
    Assistant,
}

/// One stored message. `emotion` is kept as text so that an unknown
/// category from a newer writer degrades to `None` instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDTO {
    pub id: String,
    pub role: MessageRoleDTO,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Session snapshot V1.0.0 (initial version).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct SessionV1_0_0 {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub persona: String,
    #[serde(default)]
    pub messages: Vec<MessageDTO>,
}

/// Type alias for the latest session version.
pub type SessionDTO = SessionV1_0_0;

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<SessionSnapshot> for SessionV1_0_0 {
    fn into_domain(self) -> SessionSnapshot {
        let messages = self
            .messages
            .into_iter()
            .map(|m| {
                let emotion = m.emotion.as_deref().and_then(|raw| {
                    EmotionCategory::from_str(raw)
                        .inspect_err(|_| {
                            tracing::warn!(message_id = %m.id, emotion = raw, "unknown emotion in stored message")
                        })
                        .ok()
                });
                Message {
                    id: m.id,
                    role: match m.role {
                        MessageRoleDTO::User => MessageRole::User,
                        MessageRoleDTO::Assistant => MessageRole::Assistant,
                    },
                    text: m.text,
                    timestamp: m.timestamp,
                    emotion,
                }
            })
            .collect();

        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            persona: self.persona,
            messages,
        }
    }
}

impl FromDomain<SessionSnapshot> for SessionV1_0_0 {
    fn from_domain(snapshot: SessionSnapshot) -> Self {
        SessionV1_0_0 {
            id: snapshot.id,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            persona: snapshot.persona,
            messages: snapshot
                .messages
                .into_iter()
                .map(|m| MessageDTO {
                    id: m.id,
                    role: match m.role {
                        MessageRole::User => MessageRoleDTO::User,
                        MessageRole::Assistant => MessageRoleDTO::Assistant,
                    },
                    text: m.text,
                    timestamp: m.timestamp,
                    emotion: m.emotion.map(|e| e.to_string()),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

fn migration_error(err: impl std::fmt::Display) -> CompanionError {
    CompanionError::Serialization {
        format: "session".to_string(),
        message: err.to_string(),
    }
}

/// Creates the migrator for stored sessions.
///
/// # Migration Path
///
/// - V1.0.0 → SessionSnapshot
///
/// Files with any other `version` (or none) are rejected.
pub fn create_session_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let session_path = version_migrate::Migrator::define(SESSION_ENTITY)
        .from::<SessionV1_0_0>()
        .into_with_save::<SessionSnapshot>();

    migrator.register(session_path).map_err(|e| {
        CompanionError::internal(format!("failed to register session migration path: {e}"))
    })?;

    Ok(migrator)
}

/// Migrates a flat TOML document (`version` next to the fields) to a snapshot.
pub fn session_from_toml(
    migrator: &version_migrate::Migrator,
    value: toml::Value,
) -> Result<SessionSnapshot> {
    migrator
        .load_flat_from(SESSION_ENTITY, value)
        .map_err(migration_error)
}

/// Converts a snapshot to the flat TOML document of the latest version.
pub fn session_to_toml(
    migrator: &version_migrate::Migrator,
    snapshot: &SessionSnapshot,
) -> Result<toml::Value> {
    // The migrator writes JSON; re-read it as a TOML value
    let json = migrator
        .save_domain_flat(SESSION_ENTITY, snapshot)
        .map_err(migration_error)?;
    let value: toml::Value = serde_json::from_str(&json)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(version_line: &str, emotion: &str) -> toml::Value {
        let content = format!(
            r#"
{version_line}
id = "s-1"
created_at = "2026-01-01T09:00:00Z"
updated_at = "2026-01-01T09:00:01Z"
persona = "teacher"

[[messages]]
id = "m-1"
role = "user"
text = "오늘 정말 행복한 하루였어"
timestamp = "2026-01-01T09:00:00Z"
emotion = "{emotion}"
"#
        );
        toml::from_str(&content).unwrap()
    }

    #[test]
    fn test_session_migrator_creation() {
        assert!(create_session_migrator().is_ok());
    }

    #[test]
    fn test_load_v1_0_0() {
        let migrator = create_session_migrator().unwrap();
        let snapshot =
            session_from_toml(&migrator, stored(r#"version = "1.0.0""#, "happy")).unwrap();
        assert_eq!(snapshot.persona, "teacher");
        assert_eq!(snapshot.messages[0].role, MessageRole::User);
        assert_eq!(snapshot.messages[0].emotion, Some(EmotionCategory::Happy));
    }

    #[test]
    fn test_unknown_emotion_degrades_to_none() {
        let migrator = create_session_migrator().unwrap();
        let snapshot =
            session_from_toml(&migrator, stored(r#"version = "1.0.0""#, "nostalgic")).unwrap();
        assert_eq!(snapshot.messages[0].emotion, None);
    }

    #[test]
    fn test_unregistered_and_malformed_versions_rejected() {
        let migrator = create_session_migrator().unwrap();
        for version in ["1", "1.banana", "1..", "1.0.0.0.0", "2.0.0"] {
            let line = format!(r#"version = "{version}""#);
            let result = session_from_toml(&migrator, stored(&line, "happy"));
            assert!(result.is_err(), "version {version} was accepted");
        }
    }

    #[test]
    fn test_missing_version_rejected() {
        let migrator = create_session_migrator().unwrap();
        assert!(session_from_toml(&migrator, stored("", "happy")).is_err());
    }

    #[test]
    fn test_save_writes_version_and_reloads() {
        let migrator = create_session_migrator().unwrap();
        let snapshot =
            session_from_toml(&migrator, stored(r#"version = "1.0.0""#, "happy")).unwrap();

        let value = session_to_toml(&migrator, &snapshot).unwrap();
        assert_eq!(value.get("version").and_then(|v| v.as_str()), Some("1.0.0"));

        let text = toml::to_string_pretty(&value).unwrap();
        let reparsed: toml::Value = toml::from_str(&text).unwrap();
        assert_eq!(session_from_toml(&migrator, reparsed).unwrap(), snapshot);
    }
}
