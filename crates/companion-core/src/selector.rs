//! Reply selection with anti-repetition.

use crate::emotion::EmotionCategory;
use crate::persona::Persona;
use rand::Rng;
use rand::seq::SliceRandom;

/// How many of the most recent assistant replies are avoided by default.
pub const DEFAULT_RECENT_REPLY_WINDOW: usize = 3;

/// Line returned when a persona has no usable replies at all.
pub const FALLBACK_REPLY: &str = "응, 듣고 있어. 조금 더 이야기해 줄래?";

/// Draws a persona reply for a classified message.
///
/// Selection never fails: a missing category falls back to `general`, a
/// persona without `general` yields the fallback line, and a pool exhausted
/// by recent replies accepts a repeat.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    fallback_reply: String,
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self {
            fallback_reply: FALLBACK_REPLY.to_string(),
        }
    }
}

impl ResponseSelector {
    /// Creates a selector with a custom fallback line.
    ///
    /// A blank line is ignored in favour of [`FALLBACK_REPLY`].
    pub fn new(fallback_reply: impl Into<String>) -> Self {
        let fallback_reply = fallback_reply.into();
        if fallback_reply.trim().is_empty() {
            return Self::default();
        }
        Self { fallback_reply }
    }

    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    /// Picks a reply for `category` from `persona`.
    ///
    /// `recent_replies` holds the latest assistant replies, most recent last.
    /// Candidates found in it are skipped. When that leaves nothing, the
    /// oldest entries of the window are released one at a time, so the most
    /// recent reply repeats only when the pool has a single entry.
    pub fn select<R>(
        &self,
        persona: &Persona,
        category: EmotionCategory,
        recent_replies: &[String],
        rng: &mut R,
    ) -> String
    where
        R: Rng + ?Sized,
    {
        let (used, pool) = persona.reply_pool(category);
        if used != category {
            tracing::debug!(
                persona = %persona.name,
                requested = %category,
                "no replies for category, using general"
            );
        }

        let pool: Vec<&String> = pool.iter().filter(|c| !c.trim().is_empty()).collect();
        if pool.is_empty() {
            tracing::warn!(persona = %persona.name, "persona has no usable replies");
            return self.fallback_reply.clone();
        }

        for released in 0..recent_replies.len() {
            let window = &recent_replies[released..];
            let fresh: Vec<&String> = pool
                .iter()
                .copied()
                .filter(|candidate| !window.iter().any(|recent| recent == *candidate))
                .collect();

            if let Some(choice) = fresh.choose(&mut *rng) {
                if released > 0 {
                    tracing::debug!(
                        persona = %persona.name,
                        released,
                        "reply pool exhausted by recent replies, allowing older repeat"
                    );
                }
                return (*choice).clone();
            }
        }

        pool.choose(&mut *rng)
            .map(|choice| (*choice).clone())
            .unwrap_or_else(|| self.fallback_reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_line_persona() -> Persona {
        Persona::new("pair", "Pair", "hi").with_replies(EmotionCategory::General, ["A", "B"])
    }

    #[test]
    fn test_blank_fallback_uses_default() {
        assert_eq!(ResponseSelector::new("  ").fallback_reply(), FALLBACK_REPLY);
        assert_eq!(ResponseSelector::new("hmm").fallback_reply(), "hmm");
    }

    #[test]
    fn test_empty_persona_returns_fallback() {
        let selector = ResponseSelector::default();
        let persona = Persona::new("empty", "Empty", "hi");
        let mut rng = StdRng::seed_from_u64(1);
        let reply = selector.select(&persona, EmotionCategory::Sad, &[], &mut rng);
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[test]
    fn test_blank_candidates_are_ignored() {
        let selector = ResponseSelector::default();
        let persona =
            Persona::new("blank", "Blank", "hi").with_replies(EmotionCategory::General, ["", " "]);
        let mut rng = StdRng::seed_from_u64(1);
        let reply = selector.select(&persona, EmotionCategory::General, &[], &mut rng);
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[test]
    fn test_blank_only_category_uses_general_not_fallback() {
        let selector = ResponseSelector::default();
        let persona = Persona::new("sparse", "Sparse", "hi")
            .with_replies(EmotionCategory::General, ["real general line"])
            .with_replies(EmotionCategory::Happy, ["", "  "]);
        let mut rng = StdRng::seed_from_u64(5);
        let reply = selector.select(&persona, EmotionCategory::Happy, &[], &mut rng);
        assert_eq!(reply, "real general line");
    }

    #[test]
    fn test_missing_category_falls_back_to_general() {
        let selector = ResponseSelector::default();
        let persona = two_line_persona();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let reply = selector.select(&persona, EmotionCategory::Question, &[], &mut rng);
            assert!(reply == "A" || reply == "B");
        }
    }

    #[test]
    fn test_recent_replies_are_excluded() {
        let selector = ResponseSelector::default();
        let persona = Persona::new("trio", "Trio", "hi")
            .with_replies(EmotionCategory::Happy, ["x", "y", "z"]);
        let recent = vec!["x".to_string(), "z".to_string()];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = selector.select(&persona, EmotionCategory::Happy, &recent, &mut rng);
            assert_eq!(reply, "y");
        }
    }

    #[test]
    fn test_exhausted_pool_avoids_most_recent() {
        let selector = ResponseSelector::default();
        let persona = two_line_persona();
        let recent = vec!["A".to_string(), "B".to_string()];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = selector.select(&persona, EmotionCategory::General, &recent, &mut rng);
            assert_eq!(reply, "A");
        }
    }

    #[test]
    fn test_single_candidate_repeats() {
        let selector = ResponseSelector::default();
        let persona =
            Persona::new("solo", "Solo", "hi").with_replies(EmotionCategory::General, ["only"]);
        let recent = vec!["only".to_string()];
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            selector.select(&persona, EmotionCategory::General, &recent, &mut rng),
            "only"
        );
    }

    #[test]
    fn test_threaded_calls_never_repeat_previous() {
        let selector = ResponseSelector::default();
        let persona = two_line_persona();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut recent: Vec<String> = Vec::new();
            for _ in 0..6 {
                let reply = selector.select(&persona, EmotionCategory::General, &recent, &mut rng);
                if let Some(previous) = recent.last() {
                    assert_ne!(&reply, previous);
                }
                recent.push(reply);
                if recent.len() > DEFAULT_RECENT_REPLY_WINDOW {
                    recent.remove(0);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_reply() {
        let selector = ResponseSelector::default();
        let persona = Persona::new("many", "Many", "hi")
            .with_replies(EmotionCategory::General, ["1", "2", "3", "4", "5"]);
        let a = selector.select(&persona, EmotionCategory::General, &[], &mut StdRng::seed_from_u64(7));
        let b = selector.select(&persona, EmotionCategory::General, &[], &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
