//! Emotion/intent categories and session entry hints

use serde::{Deserialize, Serialize};

/// What the classifier believes a single user utterance is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SevereStress,
    Happy,
    Sad,
    Stressed,
    Acceptance,
    Decline,
    Breathing,
    Closing,
    Greeting,
    General,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 10] = [
        Category::SevereStress,
        Category::Happy,
        Category::Sad,
        Category::Stressed,
        Category::Acceptance,
        Category::Decline,
        Category::Breathing,
        Category::Closing,
        Category::Greeting,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::SevereStress => "severe_stress",
            Category::Happy => "happy",
            Category::Sad => "sad",
            Category::Stressed => "stressed",
            Category::Acceptance => "acceptance",
            Category::Decline => "decline",
            Category::Breathing => "breathing",
            Category::Closing => "closing",
            Category::Greeting => "greeting",
            Category::General => "general",
        }
    }
}

/// Mood supplied by whoever opened the chat (e.g. a mood check-in deep link).
///
/// Only affects the opening assistant turn and the suggested quick replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodHint {
    Sad,
    Stressed,
}

impl MoodHint {
    /// Map a logged mood onto a chat hint; only low moods carry one.
    pub fn from_mood(mood: crate::db::MoodType) -> Option<Self> {
        match mood {
            crate::db::MoodType::Sad => Some(MoodHint::Sad),
            crate::db::MoodType::Stressed => Some(MoodHint::Stressed),
            crate::db::MoodType::Happy | crate::db::MoodType::Okay => None,
        }
    }
}
