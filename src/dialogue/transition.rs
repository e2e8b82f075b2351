//! Pure stage transition function
//!
//! Given the current stage, the classified category and the turn count,
//! decide the next stage and assemble the reply. Rules are evaluated in a
//! fixed priority order and the last arm covers everything else, so there is
//! no error path.

use super::responses::{Pool, GROUNDING_MESSAGE};
use super::{Category, Effect, FeedbackCue, ResponseRng, Stage};

/// Turn count at which sad/stressed replies start offering a breathing break
pub const BREATHING_OFFER_THRESHOLD: u32 = 2;

/// Draws above this value append an encouragement to a reflection
pub const ENCOURAGEMENT_THRESHOLD: f64 = 0.6;

const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Result of a dialogue transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub next_stage: Stage,
    pub reply: String,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    fn new(next_stage: Stage, reply: impl Into<String>) -> Self {
        Self {
            next_stage,
            reply: reply.into(),
            effects: vec![],
        }
    }

    /// Append a fragment separated by a blank line
    fn with_fragment(mut self, fragment: &str) -> Self {
        self.reply.push_str(FRAGMENT_SEPARATOR);
        self.reply.push_str(fragment);
        self
    }

    fn with_entry_cues(mut self, from: Stage) -> Self {
        if self.next_stage != from {
            match self.next_stage {
                Stage::SuggestedBreathing => {
                    self.effects.push(Effect::Cue(FeedbackCue::MoodAcknowledged));
                }
                Stage::Closing => self.effects.push(Effect::Cue(FeedbackCue::Celebration)),
                Stage::Initial | Stage::Listening | Stage::PostBreathing => {}
            }
        }
        self
    }
}

/// Pure transition function.
///
/// The only nondeterminism is template choice through `rng`.
pub fn transition(
    stage: Stage,
    category: Category,
    turn_count: u32,
    rng: &mut impl ResponseRng,
) -> TransitionResult {
    let result = match (stage, category) {
        // A breathing offer is always answered yes or not-yes
        (Stage::SuggestedBreathing, Category::Acceptance) => TransitionResult::new(
            Stage::PostBreathing,
            Pool::BreathingAccepted.choose(rng),
        ),
        (Stage::SuggestedBreathing, _) => {
            TransitionResult::new(Stage::Listening, Pool::BreathingDeclined.choose(rng))
        }

        (_, Category::SevereStress) => {
            TransitionResult::new(Stage::SuggestedBreathing, GROUNDING_MESSAGE)
        }

        (_, Category::Sad | Category::Stressed) => {
            let pool = if category == Category::Sad {
                Pool::SadValidation
            } else {
                Pool::StressedValidation
            };
            let validation = TransitionResult::new(Stage::Listening, pool.choose(rng));

            if turn_count >= BREATHING_OFFER_THRESHOLD && stage != Stage::PostBreathing {
                let mut offer = validation.with_fragment(Pool::BreathingSuggestion.choose(rng));
                offer.next_stage = Stage::SuggestedBreathing;
                offer
            } else {
                validation
            }
        }

        (_, Category::Closing) => TransitionResult::new(Stage::Closing, Pool::Closing.choose(rng)),

        (_, Category::Breathing) => TransitionResult::new(
            Stage::PostBreathing,
            Pool::BreathingAccepted.choose(rng),
        ),

        (_, Category::Greeting) => TransitionResult::new(stage, Pool::Greeting.choose(rng)),

        (_, Category::Happy) => TransitionResult::new(stage, Pool::Happy.choose(rng)),

        // General, plus acceptance/decline outside of a breathing offer
        (_, Category::General | Category::Acceptance | Category::Decline) => {
            let reflection = TransitionResult::new(stage, Pool::Reflection.choose(rng));
            if rng.draw() > ENCOURAGEMENT_THRESHOLD {
                reflection.with_fragment(Pool::Encouragement.choose(rng))
            } else {
                reflection
            }
        }
    };

    result.with_entry_cues(stage)
}
