//! Property-based tests for the dialogue engine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::random::ScriptedRng;
use super::responses::Pool;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_rng() -> impl Strategy<Value = ScriptedRng> {
    (
        proptest::collection::vec(0usize..16, 0..4),
        proptest::collection::vec(0.0f64..1.0, 0..4),
    )
        .prop_map(|(picks, draws)| ScriptedRng::new().with_picks(picks).with_draws(draws))
}

// ============================================================================
// Classifier Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_classify_is_deterministic(text in any::<String>()) {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    #[test]
    fn prop_classify_ignores_case(text in "[a-zA-Z' ]{0,40}") {
        prop_assert_eq!(classify(&text), classify(&text.to_uppercase()));
    }

    #[test]
    fn prop_severe_marker_always_wins(
        prefix in "[a-z ]{0,20}",
        suffix in "[a-z ]{0,20}",
        marker in prop::sample::select(vec!["too much", "panic", "falling apart", "overwhelm"]),
    ) {
        let text = format!("{prefix} {marker} {suffix}");
        prop_assert_eq!(classify(&text), Category::SevereStress);
    }
}

// ============================================================================
// Transition Properties
// ============================================================================

#[test]
fn test_every_stage_category_pair_yields_reply() {
    for stage in Stage::ALL {
        for category in Category::ALL {
            for turn_count in [0, 1, 2, 5] {
                for draw in [0.0, 0.9] {
                    let mut rng = ScriptedRng::new().with_draws([draw]);
                    let result = transition(stage, category, turn_count, &mut rng);
                    assert!(
                        !result.reply.trim().is_empty(),
                        "{stage:?} x {category:?} at turn {turn_count}"
                    );
                    assert!(result.reply.split("\n\n").count() <= 2);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_every_pair_yields_non_empty_reply(
        stage in arb_stage(),
        category in arb_category(),
        turn_count in 0u32..10,
        mut rng in arb_rng(),
    ) {
        let result = transition(stage, category, turn_count, &mut rng);
        prop_assert!(!result.reply.trim().is_empty());
    }

    #[test]
    fn prop_breathing_offer_resolves_binary(
        category in arb_category(),
        turn_count in 0u32..10,
        mut rng in arb_rng(),
    ) {
        let result = transition(Stage::SuggestedBreathing, category, turn_count, &mut rng);
        if category == Category::Acceptance {
            prop_assert_eq!(result.next_stage, Stage::PostBreathing);
        } else {
            prop_assert_eq!(result.next_stage, Stage::Listening);
        }
    }

    #[test]
    fn prop_reply_has_at_most_two_fragments(
        stage in arb_stage(),
        category in arb_category(),
        turn_count in 0u32..10,
        mut rng in arb_rng(),
    ) {
        let result = transition(stage, category, turn_count, &mut rng);
        prop_assert!(result.reply.split("\n\n").count() <= 2);
    }

    #[test]
    fn prop_cues_only_on_stage_entry(
        stage in arb_stage(),
        category in arb_category(),
        turn_count in 0u32..10,
        mut rng in arb_rng(),
    ) {
        let result = transition(stage, category, turn_count, &mut rng);
        for effect in &result.effects {
            let Effect::Cue(cue) = effect;
            prop_assert_ne!(result.next_stage, stage);
            match cue {
                FeedbackCue::MoodAcknowledged => {
                    prop_assert_eq!(result.next_stage, Stage::SuggestedBreathing);
                }
                FeedbackCue::Celebration => prop_assert_eq!(result.next_stage, Stage::Closing),
            }
        }
    }

    #[test]
    fn prop_low_mood_offer_iff_threshold(
        stage in prop::sample::select(vec![Stage::Initial, Stage::Listening, Stage::PostBreathing, Stage::Closing]),
        category in prop::sample::select(vec![Category::Sad, Category::Stressed]),
        turn_count in 0u32..10,
        mut rng in arb_rng(),
    ) {
        let result = transition(stage, category, turn_count, &mut rng);
        let expect_offer = turn_count >= transition::BREATHING_OFFER_THRESHOLD
            && stage != Stage::PostBreathing;
        let has_suggestion = Pool::BreathingSuggestion
            .templates()
            .iter()
            .any(|t| result.reply.ends_with(t));

        prop_assert_eq!(has_suggestion, expect_offer);
        if expect_offer {
            prop_assert_eq!(result.next_stage, Stage::SuggestedBreathing);
        } else {
            prop_assert_eq!(result.next_stage, Stage::Listening);
        }
    }
}
