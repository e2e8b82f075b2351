//! API request and response types

use crate::calm::{PatternInfo, PhasePosition};
use crate::db::{MoodEntry, MoodStats, MoodType};
use crate::session::SessionSnapshot;
use crate::sound::MoodTone;
use serde::{Deserialize, Serialize};

/// Request to open a chat session, optionally from a mood check-in
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub mood: Option<MoodType>,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to record a mood check-in
#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub mood: MoodType,
    #[serde(default)]
    pub reflection: Option<String>,
}

/// Response with a session snapshot
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionSnapshot,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub queued: bool,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response for a saved mood, with the chime to play
#[derive(Debug, Serialize)]
pub struct SaveMoodResponse {
    pub entry: MoodEntry,
    pub tone: MoodTone,
}

#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct TodayMoodResponse {
    pub entry: Option<MoodEntry>,
}

/// Weekly dashboard data
#[derive(Debug, Serialize)]
pub struct MoodStatsResponse {
    pub stats: MoodStats,
    pub total: usize,
    pub moods: Vec<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct PatternsResponse {
    pub patterns: Vec<PatternInfo>,
}

#[derive(Debug, Serialize)]
pub struct PhaseResponse {
    pub position: PhasePosition,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
