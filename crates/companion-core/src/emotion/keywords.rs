//! Keyword tables driving the emotion classifier.

use super::category::EmotionCategory;
use serde::{Deserialize, Serialize};

const GREETINGS: &[&str] = &["안녕", "반가", "hello", "good morning", "good night"];

const QUESTION: &[&str] = &[
    "?", "왜", "뭐", "어떻게", "언제", "어디", "누구", "궁금", "why", "what", "how", "when",
    "where",
];

const HAPPY: &[&str] = &[
    "행복", "기뻐", "기쁘", "좋아", "신나", "최고", "고마워", "happy", "glad", "great", "awesome",
    "excited",
];

const SAD: &[&str] = &[
    "슬퍼", "슬프", "우울", "힘들", "외로", "눈물", "sad", "lonely", "depressed", "tired", "cry",
];

const ANGRY: &[&str] = &[
    "화나", "화가", "짜증", "열받", "싫어", "angry", "mad", "annoyed", "furious", "hate",
];

/// Keyword sets for each keyword-bearing category, plus greeting phrases.
///
/// Every field defaults to the built-in table, so a configuration file only
/// needs to list the sets it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    /// Phrases that force `General` regardless of any other keyword.
    pub greetings: Vec<String>,
    pub question: Vec<String>,
    pub happy: Vec<String>,
    pub sad: Vec<String>,
    pub angry: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            greetings: owned(GREETINGS),
            question: owned(QUESTION),
            happy: owned(HAPPY),
            sad: owned(SAD),
            angry: owned(ANGRY),
        }
    }
}

impl KeywordTable {
    /// Returns the keyword set for a category. `General` has none.
    pub fn keywords_for(&self, category: EmotionCategory) -> &[String] {
        match category {
            EmotionCategory::Question => &self.question,
            EmotionCategory::Happy => &self.happy,
            EmotionCategory::Sad => &self.sad,
            EmotionCategory::Angry => &self.angry,
            EmotionCategory::General => &[],
        }
    }

    /// Lower-cases every keyword and drops blank entries.
    ///
    /// Input text is lower-cased before matching, so keywords must be too.
    pub fn normalized(mut self) -> Self {
        for set in [
            &mut self.greetings,
            &mut self.question,
            &mut self.happy,
            &mut self.sad,
            &mut self.angry,
        ] {
            *set = set
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_has_no_keywords() {
        let table = KeywordTable::default();
        assert!(table.keywords_for(EmotionCategory::General).is_empty());
        assert!(!table.keywords_for(EmotionCategory::Angry).is_empty());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let table: KeywordTable = toml::from_str(r#"happy = ["yay"]"#).unwrap();
        assert_eq!(table.happy, vec!["yay".to_string()]);
        assert_eq!(table.sad, KeywordTable::default().sad);
    }

    #[test]
    fn test_normalized_lowercases_and_drops_blanks() {
        let table = KeywordTable {
            greetings: vec!["  HeLLo ".to_string(), "   ".to_string()],
            ..KeywordTable::default()
        }
        .normalized();
        assert_eq!(table.greetings, vec!["hello".to_string()]);
    }
}
