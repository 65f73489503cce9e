//! Default persona presets.
//!
//! Provides the system-defined personas available to every session. The
//! partner and mentor personas differ only in flavor text; the mechanism is
//! entirely table-driven.

use super::model::{Persona, PersonaSource};
use crate::emotion::EmotionCategory;

/// Name of the persona used when a custom free-text name is chosen.
pub const DEFAULT_PERSONA_NAME: &str = "friend";

/// Returns the official preset persona configurations for the application.
///
/// - **boyfriend**: warm partner, every category authored
/// - **girlfriend**: warm partner, no dedicated `question` table
/// - **teacher**: mentor, no dedicated `angry` table
/// - **friend**: default persona for custom names
pub fn get_default_presets() -> Vec<Persona> {
    vec![
        Persona::new("boyfriend", "남자친구", "자기야, 오늘 하루는 어땠어?")
            .with_source(PersonaSource::System)
            .with_replies(
                EmotionCategory::Happy,
                [
                    "네가 행복하니까 나도 덩달아 기분이 좋아!",
                    "와, 그 얘기 더 해줘. 듣기만 해도 웃음이 나.",
                    "오늘 좋은 일 있었구나! 같이 축하하자.",
                ],
            )
            .with_replies(
                EmotionCategory::Sad,
                [
                    "많이 힘들었지? 내가 옆에 있을게.",
                    "울고 싶으면 울어도 돼. 다 들어줄게.",
                    "오늘은 푹 쉬자. 내일은 조금 나아질 거야.",
                ],
            )
            .with_replies(
                EmotionCategory::Angry,
                [
                    "누가 우리 자기를 화나게 했어? 내가 대신 혼내줄게.",
                    "화날 만했네. 천천히 얘기해 봐.",
                ],
            )
            .with_replies(
                EmotionCategory::Question,
                [
                    "음, 좋은 질문이다. 같이 생각해 볼까?",
                    "글쎄, 네 생각은 어때? 궁금해.",
                ],
            )
            .with_replies(
                EmotionCategory::General,
                [
                    "응응, 듣고 있어. 계속 얘기해 줘.",
                    "그랬구나. 너랑 얘기하는 시간이 제일 좋아.",
                    "오늘도 네 얘기 들려줘서 고마워.",
                ],
            ),
        Persona::new("girlfriend", "여자친구", "왔어? 보고 싶었어!")
            .with_source(PersonaSource::System)
            .with_replies(
                EmotionCategory::Happy,
                [
                    "진짜? 나도 너무 기뻐!",
                    "역시 오늘 좋은 일 있을 줄 알았어!",
                ],
            )
            .with_replies(
                EmotionCategory::Sad,
                [
                    "토닥토닥, 오늘 고생 많았어.",
                    "속상했겠다. 내가 꼭 안아줄게.",
                ],
            )
            .with_replies(
                EmotionCategory::Angry,
                [
                    "헐, 완전 속상했겠다. 내 편 해줄게!",
                    "그건 정말 화날 일이야. 잠깐 숨 좀 돌리자.",
                ],
            )
            .with_replies(
                EmotionCategory::General,
                [
                    "응, 그래서 어떻게 됐어?",
                    "너랑 얘기하면 시간 가는 줄 모르겠어.",
                    "오늘 있었던 일 더 들려줘.",
                ],
            ),
        Persona::new("teacher", "선생님", "반가워요. 오늘은 어떤 이야기를 나눠볼까요?")
            .with_source(PersonaSource::System)
            .with_replies(
                EmotionCategory::Happy,
                [
                    "정말 좋은 하루였군요. 그 기분을 일기에 남겨두면 좋겠어요.",
                    "기쁜 순간을 알아차리는 것도 큰 능력이에요.",
                    "멋져요! 무엇이 그렇게 만들었는지 돌아볼까요?",
                ],
            )
            .with_replies(
                EmotionCategory::Sad,
                [
                    "힘든 마음을 말해줘서 고마워요. 천천히 이야기해 봐요.",
                    "그런 날도 있어요. 스스로를 너무 몰아세우지 않았으면 해요.",
                ],
            )
            .with_replies(
                EmotionCategory::Question,
                [
                    "좋은 질문이에요. 먼저 스스로 어떻게 생각하는지 들어볼까요?",
                    "그 질문에 답하려면 몇 가지를 나눠서 생각해 봐야 해요.",
                ],
            )
            .with_replies(
                EmotionCategory::General,
                [
                    "그렇군요. 조금 더 자세히 말해줄 수 있나요?",
                    "흥미로운 이야기네요. 그때 어떤 기분이었나요?",
                    "잘 듣고 있어요. 계속해 보세요.",
                ],
            ),
        Persona::new(DEFAULT_PERSONA_NAME, "친구", "안녕! 무슨 얘기든 편하게 해.")
            .with_source(PersonaSource::System)
            .with_replies(
                EmotionCategory::Happy,
                ["오 대박, 잘됐다!", "좋겠다! 나까지 신난다."],
            )
            .with_replies(
                EmotionCategory::Sad,
                ["에구, 많이 힘들었겠다.", "괜찮아, 내가 들어줄게."],
            )
            .with_replies(
                EmotionCategory::General,
                [
                    "그래서 그래서?",
                    "오, 그런 일이 있었구나.",
                    "ㅋㅋ 계속 말해봐.",
                ],
            ),
    ]
}
