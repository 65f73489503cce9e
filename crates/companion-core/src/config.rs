//! Engine settings shared by every session.

use crate::error::{CompanionError, Result};
use crate::persona::DEFAULT_PERSONA_NAME;
use crate::selector::{DEFAULT_RECENT_REPLY_WINDOW, FALLBACK_REPLY};
use serde::{Deserialize, Serialize};

/// Tunables for reply selection and session defaults.
///
/// Every field has a default, so an empty `[engine]` table is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Persona used for custom names and for new sessions.
    pub default_persona: String,
    /// Number of recent assistant replies the selector avoids.
    pub recent_reply_window: usize,
    /// Line used when a persona has no usable replies.
    pub fallback_reply: String,
    /// Fixed seed for reproducible reply selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_persona: DEFAULT_PERSONA_NAME.to_string(),
            recent_reply_window: DEFAULT_RECENT_REPLY_WINDOW,
            fallback_reply: FALLBACK_REPLY.to_string(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Rejects settings the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.default_persona.trim().is_empty() {
            return Err(CompanionError::config("engine.default_persona must not be blank"));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(CompanionError::config("engine.fallback_reply must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_table() {
        let config: EngineConfig = toml::from_str("recent_reply_window = 5\nseed = 42").unwrap();
        assert_eq!(config.recent_reply_window, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.default_persona, DEFAULT_PERSONA_NAME);
    }

    #[test]
    fn test_blank_default_persona_rejected() {
        let config = EngineConfig {
            default_persona: " ".to_string(),
            ..EngineConfig::default()
        };
        assert!(config.validate().unwrap_err().is_config());
    }
}
