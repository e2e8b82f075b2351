//! Effects produced by dialogue transitions

use serde::Serialize;

/// UI feedback the core may request at notable stage changes.
///
/// Fire-and-forget: the dialogue never waits on these and a failed
/// delivery never changes the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCue {
    /// Conversation moved into offering a breathing exercise
    MoodAcknowledged,
    /// Conversation reached its closing stage
    Celebration,
}

/// Effects to be executed after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cue(FeedbackCue),
}
