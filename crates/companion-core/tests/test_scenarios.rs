use companion_core::emotion::{EmotionCategory, EmotionClassifier};
use companion_core::persona::{Persona, PersonaCatalog};
use companion_core::selector::ResponseSelector;
use companion_core::session::ConversationSession;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

#[test]
fn test_happy_diary_entry_with_teacher() {
    let classifier = EmotionClassifier::default();
    let catalog = PersonaCatalog::builtin().expect("builtin catalog");
    let teacher = catalog.get("teacher").expect("teacher persona");

    let category = classifier.classify("오늘 정말 행복한 하루였어");
    assert_eq!(category, EmotionCategory::Happy);

    let selector = ResponseSelector::default();
    for seed in 0..20 {
        let reply = selector.select(teacher, category, &[], &mut StdRng::seed_from_u64(seed));
        assert!(
            teacher.responses.get(EmotionCategory::Happy).contains(&reply),
            "unexpected reply: {reply}"
        );
    }
}

#[test]
fn test_question_without_question_table_uses_general() {
    let classifier = EmotionClassifier::default();
    let catalog = PersonaCatalog::builtin().expect("builtin catalog");
    let girlfriend = catalog.get("girlfriend").expect("girlfriend persona");
    assert!(girlfriend.responses.get(EmotionCategory::Question).is_empty());

    let category = classifier.classify("왜 그런 거야?");
    assert_eq!(category, EmotionCategory::Question);

    let reply = ResponseSelector::default().select(
        girlfriend,
        category,
        &[],
        &mut StdRng::seed_from_u64(4),
    );
    assert!(!reply.is_empty());
    assert!(girlfriend.responses.get(EmotionCategory::General).contains(&reply));
}

#[test]
fn test_three_threaded_turns_over_two_line_pool() {
    let persona = Persona::new("duo", "Duo", "hey")
        .with_replies(EmotionCategory::General, ["line one", "line two"]);
    let catalog = Arc::new(PersonaCatalog::new(vec![persona], "duo").expect("catalog"));

    for seed in 0..25 {
        let mut session =
            ConversationSession::with_rng(catalog.clone(), "duo", StdRng::seed_from_u64(seed));
        let replies: Vec<String> = (0..3)
            .map(|_| session.append_user("그냥").expect("turn").text.clone())
            .collect();
        assert_ne!(replies[0], replies[1]);
        assert_ne!(replies[1], replies[2]);
    }
}

#[test]
fn test_general_only_persona_always_answers() {
    let persona =
        Persona::new("plain", "Plain", "hi").with_replies(EmotionCategory::General, ["mm-hm"]);
    let selector = ResponseSelector::default();
    let mut rng = StdRng::seed_from_u64(0);
    for category in [
        EmotionCategory::Happy,
        EmotionCategory::Sad,
        EmotionCategory::Angry,
        EmotionCategory::Question,
        EmotionCategory::General,
    ] {
        let recent = vec!["mm-hm".to_string()];
        assert_eq!(selector.select(&persona, category, &recent, &mut rng), "mm-hm");
    }
}

#[test]
fn test_anti_repetition_law() {
    let persona = Persona::new("many", "Many", "hi")
        .with_replies(EmotionCategory::Sad, ["a", "b", "c", "d"]);
    let selector = ResponseSelector::default();
    let recent = vec!["a".to_string(), "c".to_string(), "d".to_string()];
    for seed in 0..100 {
        let reply =
            selector.select(&persona, EmotionCategory::Sad, &recent, &mut StdRng::seed_from_u64(seed));
        assert!(!recent.contains(&reply));
    }
}

#[test]
fn test_greeting_wins_over_question_and_emotion() {
    let classifier = EmotionClassifier::default();
    assert_eq!(classifier.classify("안녕, 왜 이렇게 슬퍼?"), EmotionCategory::General);
}

#[test]
fn test_question_wins_over_happy() {
    let classifier = EmotionClassifier::default();
    assert_eq!(classifier.classify("행복이 뭐야"), EmotionCategory::Question);
}
