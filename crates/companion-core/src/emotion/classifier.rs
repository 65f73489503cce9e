//! Keyword-based emotion classifier.
//!
//! Matching is substring-based, not tokenized: a keyword embedded inside a
//! longer unrelated word still counts. This is a known limitation kept so
//! that classification outcomes stay stable.

use super::category::EmotionCategory;
use super::keywords::KeywordTable;
use std::collections::BTreeMap;

/// Outcome of a classification together with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: EmotionCategory,
    /// True when a greeting phrase short-circuited classification.
    pub greeting: bool,
    /// Number of matched keywords per keyword-bearing category.
    pub counts: BTreeMap<EmotionCategory, usize>,
}

/// Maps free-form text to an [`EmotionCategory`].
///
/// Stateless apart from its keyword table; the same input always yields the
/// same category.
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    table: KeywordTable,
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::default())
    }
}

impl EmotionClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self {
            table: table.normalized(),
        }
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.table
    }

    /// Classifies `text` into exactly one category.
    pub fn classify(&self, text: &str) -> EmotionCategory {
        self.analyze(text).category
    }

    /// Classifies `text` and reports per-category keyword counts.
    ///
    /// Greetings win over everything. Otherwise the first category in
    /// [`EmotionCategory::PRIORITY`] with a nonzero count is chosen, falling
    /// back to `General`.
    pub fn analyze(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        if lowered.is_empty() {
            return Classification {
                category: EmotionCategory::General,
                greeting: false,
                counts: BTreeMap::new(),
            };
        }

        if self
            .table
            .greetings
            .iter()
            .any(|greeting| lowered.contains(greeting.as_str()))
        {
            tracing::debug!(category = %EmotionCategory::General, "greeting detected");
            return Classification {
                category: EmotionCategory::General,
                greeting: true,
                counts: BTreeMap::new(),
            };
        }

        let counts: BTreeMap<EmotionCategory, usize> = EmotionCategory::PRIORITY
            .iter()
            .map(|&category| {
                let hits = self
                    .table
                    .keywords_for(category)
                    .iter()
                    .filter(|keyword| lowered.contains(keyword.as_str()))
                    .count();
                (category, hits)
            })
            .collect();

        let category = EmotionCategory::PRIORITY
            .iter()
            .copied()
            .find(|category| counts.get(category).copied().unwrap_or(0) > 0)
            .unwrap_or(EmotionCategory::General);

        tracing::debug!(%category, ?counts, "classified message");

        Classification {
            category,
            greeting: false,
            counts,
        }
    }
}
