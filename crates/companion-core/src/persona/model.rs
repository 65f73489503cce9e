//! Persona domain model.
//!
//! A persona is a named conversational identity: a greeting plus a table of
//! candidate replies keyed by emotion category.

use crate::emotion::EmotionCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents the source of a persona (system-provided or user-created).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersonaSource {
    System,
    #[default]
    User,
}

fn has_usable(replies: &[String]) -> bool {
    replies.iter().any(|reply| !reply.trim().is_empty())
}

/// Candidate replies per emotion category.
///
/// Order within a list is preserved as authored; the selector draws from it
/// at random, so order carries no weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTable(BTreeMap<EmotionCategory, Vec<String>>);

impl ResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate list for `category`.
    pub fn insert<I, S>(&mut self, category: EmotionCategory, replies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(category, replies.into_iter().map(Into::into).collect());
    }

    /// Raw candidates for a category, without any fallback.
    pub fn get(&self, category: EmotionCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories with at least one candidate.
    pub fn categories(&self) -> impl Iterator<Item = EmotionCategory> + '_ {
        self.0
            .iter()
            .filter(|(_, replies)| !replies.is_empty())
            .map(|(category, _)| *category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, &[String])> + '_ {
        self.0
            .iter()
            .map(|(category, replies)| (*category, replies.as_slice()))
    }
}

/// A named conversational identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Lookup key, unique within a catalog (e.g. "teacher").
    pub name: String,
    /// Human-readable label shown in the UI.
    pub display_name: String,
    /// Line shown when the persona becomes active.
    pub greeting: String,
    /// Source of the persona (System or User).
    #[serde(default)]
    pub source: PersonaSource,
    /// Candidate replies keyed by emotion category.
    #[serde(default)]
    pub responses: ResponseTable,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            greeting: greeting.into(),
            source: PersonaSource::default(),
            responses: ResponseTable::new(),
        }
    }

    pub fn with_source(mut self, source: PersonaSource) -> Self {
        self.source = source;
        self
    }

    /// Adds a candidate list for `category`, replacing any existing one.
    pub fn with_replies<I, S>(mut self, category: EmotionCategory, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses.insert(category, replies);
        self
    }

    /// Whether the mandatory `general` list has a non-blank reply.
    pub fn has_general(&self) -> bool {
        has_usable(self.responses.get(EmotionCategory::General))
    }

    /// Candidate pool for `category`, falling back to `general` when the
    /// category is absent, empty or blank-only.
    ///
    /// Returns the category actually used alongside the pool. The pool has
    /// no usable entry only for a persona whose `general` is unusable too.
    pub fn reply_pool(&self, category: EmotionCategory) -> (EmotionCategory, &[String]) {
        let pool = self.responses.get(category);
        if has_usable(pool) {
            return (category, pool);
        }
        (
            EmotionCategory::General,
            self.responses.get(EmotionCategory::General),
        )
    }
}
