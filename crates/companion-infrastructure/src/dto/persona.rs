//! Persona DTO stored in the `[[persona]]` tables of config.toml.

use companion_core::emotion::EmotionCategory;
use companion_core::persona::{Persona, PersonaSource, ResponseTable};
use companion_core::{CompanionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Represents the source of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaSourceDTO {
    System,
    #[default]
    User,
}

/// On-disk form of a persona.
///
/// Response keys are category names (`happy`, `sad`, `angry`, `question`,
/// `general`), matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaConfig {
    pub name: String,
    /// Defaults to `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub greeting: String,
    #[serde(default)]
    pub source: PersonaSourceDTO,
    #[serde(default)]
    pub responses: BTreeMap<String, Vec<String>>,
}

impl TryFrom<PersonaConfig> for Persona {
    type Error = CompanionError;

    fn try_from(dto: PersonaConfig) -> Result<Self> {
        if dto.name.trim().is_empty() {
            return Err(CompanionError::config("persona name must not be blank"));
        }

        let mut responses = ResponseTable::new();
        for (key, replies) in dto.responses {
            let category = EmotionCategory::from_str(key.trim()).map_err(|_| {
                CompanionError::config(format!(
                    "persona '{}' has unknown response category '{}'",
                    dto.name, key
                ))
            })?;
            responses.insert(category, replies);
        }

        Ok(Persona {
            display_name: dto.display_name.unwrap_or_else(|| dto.name.clone()),
            name: dto.name,
            greeting: dto.greeting,
            source: match dto.source {
                PersonaSourceDTO::System => PersonaSource::System,
                PersonaSourceDTO::User => PersonaSource::User,
            },
            responses,
        })
    }
}

impl From<&Persona> for PersonaConfig {
    fn from(persona: &Persona) -> Self {
        PersonaConfig {
            name: persona.name.clone(),
            display_name: (persona.display_name != persona.name)
                .then(|| persona.display_name.clone()),
            greeting: persona.greeting.clone(),
            source: match persona.source {
                PersonaSource::System => PersonaSourceDTO::System,
                PersonaSource::User => PersonaSourceDTO::User,
            },
            responses: persona
                .responses
                .iter()
                .map(|(category, replies)| (category.to_string(), replies.to_vec()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persona_table() {
        let dto: PersonaConfig = toml::from_str(
            r#"
name = "coach"
greeting = "Let's go!"

[responses]
General = ["Keep going."]
happy = ["Nice work!", "That's the spirit!"]
"#,
        )
        .unwrap();

        let persona = Persona::try_from(dto).unwrap();
        assert_eq!(persona.display_name, "coach");
        assert_eq!(persona.source, PersonaSource::User);
        assert_eq!(persona.responses.get(EmotionCategory::Happy).len(), 2);
        assert!(persona.has_general());
    }

    #[test]
    fn test_source_defaults_to_user() {
        let dto: PersonaConfig = toml::from_str("name = \"x\"\ngreeting = \"hi\"\n").unwrap();
        assert_eq!(dto.source, PersonaSourceDTO::User);
        assert_eq!(Persona::try_from(dto).unwrap().source, PersonaSource::User);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let dto = PersonaConfig {
            name: "coach".to_string(),
            display_name: None,
            greeting: "hi".to_string(),
            source: PersonaSourceDTO::User,
            responses: BTreeMap::from([("bored".to_string(), vec!["zzz".to_string()])]),
        };
        let err = Persona::try_from(dto).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("bored"));
    }

    #[test]
    fn test_domain_to_dto_uses_category_names() {
        let persona = Persona::new("coach", "Coach", "hi")
            .with_replies(EmotionCategory::Question, ["Good question."]);
        let dto = PersonaConfig::from(&persona);
        assert_eq!(dto.display_name.as_deref(), Some("Coach"));
        assert_eq!(dto.responses["question"], vec!["Good question.".to_string()]);
    }
}
