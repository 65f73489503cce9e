//! Configuration service.
//!
//! Loads config.toml and turns it into the engine objects a front end needs:
//! the persona catalog, the classifier and the engine settings.

use crate::dto::ConfigRoot;
use crate::storage::TomlDocument;
use crate::toml_persona_repository::TomlPersonaRepository;
use companion_core::emotion::EmotionClassifier;
use companion_core::persona::{PersonaCatalog, PersonaRepository, get_default_presets};
use companion_core::{EngineConfig, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Engine objects built from one configuration file.
#[derive(Debug)]
pub struct LoadedConfig {
    pub engine: EngineConfig,
    pub catalog: Arc<PersonaCatalog>,
    pub classifier: Arc<EmotionClassifier>,
}

/// Reads config.toml and builds engine objects from it.
///
/// A missing file is equivalent to an empty one: built-in personas, default
/// keywords and default engine settings.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the raw configuration.
    pub fn load_root(&self) -> Result<ConfigRoot> {
        let root = TomlDocument::<ConfigRoot>::new(self.path.clone())
            .load()?
            .unwrap_or_default();
        root.engine.validate()?;
        Ok(root)
    }

    /// Loads the configuration and builds the catalog and classifier.
    ///
    /// User personas replace presets of the same name.
    pub fn load(&self) -> Result<LoadedConfig> {
        let root = self.load_root()?;
        let user_personas = TomlPersonaRepository::new(self.path.clone()).get_all()?;
        let catalog = PersonaCatalog::with_overrides(
            get_default_presets(),
            user_personas,
            &root.engine.default_persona,
        )?;
        let classifier = EmotionClassifier::new(root.classifier.clone().unwrap_or_default());

        tracing::info!(
            path = %self.path.display(),
            personas = catalog.len(),
            default_persona = %root.engine.default_persona,
            "configuration loaded"
        );

        Ok(LoadedConfig {
            engine: root.engine,
            catalog: Arc::new(catalog),
            classifier: Arc::new(classifier),
        })
    }

    /// Writes the engine settings, keeping the rest of the file.
    pub fn save_engine(&self, engine: &EngineConfig) -> Result<()> {
        engine.validate()?;
        TomlDocument::<ConfigRoot>::new(self.path.clone()).update(ConfigRoot::default(), |root| {
            root.engine = engine.clone();
        })?;
        Ok(())
    }
}
