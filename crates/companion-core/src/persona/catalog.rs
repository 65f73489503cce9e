//! Read-only persona registry shared by every session.

use super::model::Persona;
use super::preset::{DEFAULT_PERSONA_NAME, get_default_presets};
use crate::error::{CompanionError, Result};
use std::collections::HashMap;

/// A persona looked up by a user-facing name.
///
/// Names missing from the catalog resolve to the default persona's tables
/// while keeping the name the user typed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPersona<'a> {
    pub display_name: &'a str,
    pub persona: &'a Persona,
    /// True when `display_name` is not a catalog entry.
    pub custom: bool,
}

/// Immutable registry of personas, keyed by case-insensitive name.
///
/// Built once and shared behind an `Arc`; there is no mutation API.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
    index: HashMap<String, usize>,
    default_index: usize,
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PersonaCatalog {
    /// Builds a catalog from `personas`, using `default_name` for custom names.
    ///
    /// # Errors
    ///
    /// - `Config` if two personas share a name or a name is blank
    /// - `NotFound` if `default_name` is not among `personas`
    pub fn new(personas: Vec<Persona>, default_name: &str) -> Result<Self> {
        let mut index = HashMap::with_capacity(personas.len());
        for (position, persona) in personas.iter().enumerate() {
            let key = normalize_key(&persona.name);
            if key.is_empty() {
                return Err(CompanionError::config("persona name must not be blank"));
            }
            if index.insert(key, position).is_some() {
                return Err(CompanionError::config(format!(
                    "duplicate persona name '{}'",
                    persona.name
                )));
            }
            if !persona.has_general() {
                tracing::warn!(
                    persona = %persona.name,
                    "persona has no general replies; fallback line will be used"
                );
            }
        }

        let default_index = *index
            .get(&normalize_key(default_name))
            .ok_or_else(|| CompanionError::not_found("persona", default_name))?;

        tracing::debug!(
            personas = personas.len(),
            default = default_name,
            "persona catalog built"
        );

        Ok(Self {
            personas,
            index,
            default_index,
        })
    }

    /// The system presets with `friend` as default.
    pub fn builtin() -> Result<Self> {
        Self::new(get_default_presets(), DEFAULT_PERSONA_NAME)
    }

    /// Builds a catalog from `base` with `overrides` replacing entries of the
    /// same name and appending new ones.
    pub fn with_overrides(
        base: Vec<Persona>,
        overrides: Vec<Persona>,
        default_name: &str,
    ) -> Result<Self> {
        let mut personas = base;
        for persona in overrides {
            let key = normalize_key(&persona.name);
            match personas
                .iter_mut()
                .find(|existing| normalize_key(&existing.name) == key)
            {
                Some(existing) => *existing = persona,
                None => personas.push(persona),
            }
        }
        Self::new(personas, default_name)
    }

    /// Looks up a persona by name.
    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.index
            .get(&normalize_key(name))
            .map(|&position| &self.personas[position])
    }

    /// Like [`get`](Self::get), reporting a miss as `NotFound`.
    pub fn require(&self, name: &str) -> Result<&Persona> {
        self.get(name)
            .ok_or_else(|| CompanionError::not_found("persona", name))
    }

    pub fn default_persona(&self) -> &Persona {
        &self.personas[self.default_index]
    }

    /// Resolves any user-supplied name, never failing.
    pub fn resolve<'a>(&'a self, name: &'a str) -> ResolvedPersona<'a> {
        match self.get(name) {
            Some(persona) => ResolvedPersona {
                display_name: persona.display_name.as_str(),
                persona,
                custom: false,
            },
            None => ResolvedPersona {
                display_name: name.trim(),
                persona: self.default_persona(),
                custom: true,
            },
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Persona names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.personas.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> + '_ {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionCategory;

    fn persona(name: &str) -> Persona {
        Persona::new(name, name.to_uppercase(), "hi")
            .with_replies(EmotionCategory::General, ["ok"])
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = PersonaCatalog::builtin().unwrap();
        assert_eq!(catalog.default_persona().name, DEFAULT_PERSONA_NAME);
        assert!(catalog.contains("teacher"));
        assert!(catalog.contains("boyfriend"));
        assert!(catalog.contains("girlfriend"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let catalog = PersonaCatalog::builtin().unwrap();
        assert_eq!(catalog.get("  Teacher ").unwrap().name, "teacher");
        assert!(catalog.get("stranger").is_none());
        assert!(catalog.require("stranger").unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_custom_name_uses_default_table() {
        let catalog = PersonaCatalog::builtin().unwrap();
        let resolved = catalog.resolve(" 민수 ");
        assert!(resolved.custom);
        assert_eq!(resolved.display_name, "민수");
        assert_eq!(resolved.persona.name, DEFAULT_PERSONA_NAME);

        let known = catalog.resolve("teacher");
        assert!(!known.custom);
        assert_eq!(known.display_name, "선생님");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = PersonaCatalog::new(vec![persona("a"), persona("A")], "a").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_default_rejected() {
        let err = PersonaCatalog::new(vec![persona("a")], "b").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_persona_is_accepted() {
        let catalog =
            PersonaCatalog::new(vec![persona("a"), Persona::new("b", "B", "hi")], "a").unwrap();
        assert!(!catalog.get("b").unwrap().has_general());
    }

    #[test]
    fn test_overrides_replace_and_append() {
        let overrides = vec![
            Persona::new("Teacher", "Coach", "yo").with_replies(EmotionCategory::General, ["go"]),
            persona("pirate"),
        ];
        let catalog = PersonaCatalog::with_overrides(
            get_default_presets(),
            overrides,
            DEFAULT_PERSONA_NAME,
        )
        .unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("teacher").unwrap().display_name, "Coach");
        assert_eq!(catalog.names().last(), Some("pirate"));
    }
}
