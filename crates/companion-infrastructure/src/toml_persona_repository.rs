//! TOML-based PersonaRepository implementation

use crate::dto::{ConfigRoot, PersonaConfig};
use crate::storage::TomlDocument;
use companion_core::Result;
use companion_core::persona::{Persona, PersonaRepository};
use std::path::PathBuf;

/// Stores user personas in the `[[persona]]` tables of config.toml.
///
/// Responsibilities:
/// - Load/save the persona tables through [`TomlDocument`]
/// - Convert between DTOs and domain models
///
/// Does NOT:
/// - Merge with presets (done by the catalog)
/// - Touch the `[engine]` or `[classifier]` tables on save
pub struct TomlPersonaRepository {
    document: TomlDocument<ConfigRoot>,
}

impl TomlPersonaRepository {
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            document: TomlDocument::new(config_path),
        }
    }
}

impl PersonaRepository for TomlPersonaRepository {
    fn get_all(&self) -> Result<Vec<Persona>> {
        let Some(root) = self.document.load()? else {
            return Ok(Vec::new());
        };

        root.personas.into_iter().map(Persona::try_from).collect()
    }

    fn save_all(&self, personas: &[Persona]) -> Result<()> {
        let dtos: Vec<PersonaConfig> = personas.iter().map(PersonaConfig::from).collect();
        self.document.update(ConfigRoot::default(), |root| {
            root.personas = dtos;
        })?;
        tracing::info!(
            path = %self.document.path().display(),
            count = personas.len(),
            "personas saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::emotion::EmotionCategory;
    use companion_core::persona::PersonaSource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_all_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlPersonaRepository::new(temp_dir.path().join("config.toml"));
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_personas() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlPersonaRepository::new(temp_dir.path().join("config.toml"));

        let personas = vec![
            Persona::new("coach", "Coach", "Let's go!")
                .with_replies(EmotionCategory::General, ["Keep going."])
                .with_replies(EmotionCategory::Sad, ["Rest, then try again."]),
            Persona::new("grandma", "할머니", "밥은 먹었니?")
                .with_source(PersonaSource::System)
                .with_replies(EmotionCategory::General, ["그래, 그래."]),
        ];
        repo.save_all(&personas).unwrap();

        let loaded = repo.get_all().unwrap();
        assert_eq!(loaded, personas);
    }

    #[test]
    fn test_save_preserves_engine_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[engine]\nseed = 99\n").unwrap();

        let repo = TomlPersonaRepository::new(path.clone());
        repo.save_all(&[Persona::new("coach", "coach", "hi")
            .with_replies(EmotionCategory::General, ["ok"])])
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("seed = 99"));
        assert!(content.contains("coach"));
    }

    #[test]
    fn test_invalid_persona_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[[persona]]\nname = \"x\"\ngreeting = \"hi\"\n[persona.responses]\nbored = [\"zzz\"]\n",
        )
        .unwrap();

        let err = TomlPersonaRepository::new(path).get_all().unwrap_err();
        assert!(err.is_config());
    }
}
