//! Conversation stages

use serde::{Deserialize, Serialize};

/// Position of the conversation. There is no terminal stage: a session in
/// `Closing` keeps accepting turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Initial,
    Listening,
    SuggestedBreathing,
    PostBreathing,
    Closing,
}

/// Coarse progress marker rendered by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Opening,
    Sharing,
    Breathing,
    Closing,
}

impl Stage {
    #[cfg(test)]
    pub const ALL: [Stage; 5] = [
        Stage::Initial,
        Stage::Listening,
        Stage::SuggestedBreathing,
        Stage::PostBreathing,
        Stage::Closing,
    ];

    pub fn milestone(self) -> Milestone {
        match self {
            Stage::Initial => Milestone::Opening,
            Stage::Listening => Milestone::Sharing,
            Stage::SuggestedBreathing | Stage::PostBreathing => Milestone::Breathing,
            Stage::Closing => Milestone::Closing,
        }
    }
}
