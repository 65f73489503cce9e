//! Emotion category assigned to each user message.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of classification outcomes.
///
/// `General` is the default when no keyword set matches.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmotionCategory {
    Happy,
    Sad,
    Angry,
    Question,
    #[default]
    General,
}

impl EmotionCategory {
    /// Keyword-bearing categories in the order the classifier checks them.
    ///
    /// A question that also carries an emotional word is treated as a request
    /// for information first.
    pub const PRIORITY: [EmotionCategory; 4] = [
        EmotionCategory::Question,
        EmotionCategory::Happy,
        EmotionCategory::Sad,
        EmotionCategory::Angry,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(EmotionCategory::from_str("HAPPY").unwrap(), EmotionCategory::Happy);
        assert_eq!(EmotionCategory::from_str("question").unwrap(), EmotionCategory::Question);
        assert!(EmotionCategory::from_str("bored").is_err());
    }

    #[test]
    fn test_display_and_serde_agree() {
        for category in EmotionCategory::iter() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_priority_excludes_general() {
        assert!(!EmotionCategory::PRIORITY.contains(&EmotionCategory::General));
        assert_eq!(EmotionCategory::PRIORITY[0], EmotionCategory::Question);
    }
}
