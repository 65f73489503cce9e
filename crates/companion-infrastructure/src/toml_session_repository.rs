//! TOML-based SessionRepository implementation.
//!
//! Each session lives in its own file, `<sessions_dir>/<session-id>.toml`,
//! written in the flat versioned format of [`crate::dto::SessionDTO`].

use crate::dto::{create_session_migrator, session_from_toml, session_to_toml};
use crate::storage::TomlDocument;
use companion_core::session::{SessionRepository, SessionSnapshot};
use companion_core::{CompanionError, Result};
use std::fs;
use std::path::PathBuf;

pub struct TomlSessionRepository {
    sessions_dir: PathBuf,
}

impl TomlSessionRepository {
    pub fn new(sessions_dir: PathBuf) -> Self {
        Self { sessions_dir }
    }

    fn document(&self, session_id: &str) -> Result<TomlDocument<toml::Value>> {
        let valid = !session_id.is_empty()
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CompanionError::invalid_input(format!(
                "invalid session id '{session_id}'"
            )));
        }
        Ok(TomlDocument::new(
            self.sessions_dir.join(format!("{session_id}.toml")),
        ))
    }
}

impl SessionRepository for TomlSessionRepository {
    fn find_by_id(&self, session_id: &str) -> Result<Option<SessionSnapshot>> {
        let Some(value) = self.document(session_id)?.load()? else {
            return Ok(None);
        };
        let migrator = create_session_migrator()?;
        session_from_toml(&migrator, value).map(Some)
    }

    fn save(&self, session: &SessionSnapshot) -> Result<()> {
        let migrator = create_session_migrator()?;
        let value = session_to_toml(&migrator, session)?;
        self.document(&session.id)?.save(&value)?;
        tracing::debug!(session_id = %session.id, messages = session.messages.len(), "session saved");
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        self.document(session_id)?.remove()?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<SessionSnapshot>> {
        if !self.sessions_dir.exists() {
            return Ok(Vec::new());
        }

        let migrator = create_session_migrator()?;
        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.sessions_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            match TomlDocument::<toml::Value>::new(path.clone()).load() {
                Ok(Some(value)) => match session_from_toml(&migrator, value) {
                    Ok(snapshot) => sessions.push(snapshot),
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping session"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session"),
            }
        }

        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}
