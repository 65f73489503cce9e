//! Root DTO of config.toml.

use super::persona::PersonaConfig;
use companion_core::EngineConfig;
use companion_core::emotion::KeywordTable;
use serde::{Deserialize, Serialize};

/// Everything stored in config.toml.
///
/// ```toml
/// [engine]
/// default_persona = "friend"
///
/// [classifier]
/// happy = ["yay"]
///
/// [[persona]]
/// name = "coach"
/// greeting = "Let's go!"
/// [persona.responses]
/// general = ["Keep going."]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRoot {
    #[serde(default)]
    pub engine: EngineConfig,

    /// Keyword overrides; unspecified sets keep the built-in keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<KeywordTable>,

    /// User personas, merged over the presets by name.
    #[serde(rename = "persona", default, skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<PersonaConfig>,
}
