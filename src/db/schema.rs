//! Database schema and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS moods (
    id TEXT PRIMARY KEY,
    mood TEXT NOT NULL,
    reflection TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_moods_created ON moods(created_at DESC);
";

/// Mood picked at check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodType {
    Happy,
    Okay,
    Sad,
    Stressed,
}

impl MoodType {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodType::Happy => "happy",
            MoodType::Okay => "okay",
            MoodType::Sad => "sad",
            MoodType::Stressed => "stressed",
        }
    }
}

impl fmt::Display for MoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(MoodType::Happy),
            "okay" => Ok(MoodType::Okay),
            "sad" => Ok(MoodType::Sad),
            "stressed" => Ok(MoodType::Stressed),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}

/// One mood check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood: MoodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Per-mood counts over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoodStats {
    pub happy: usize,
    pub okay: usize,
    pub sad: usize,
    pub stressed: usize,
}

impl MoodStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a MoodEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut stats, entry| {
                match entry.mood {
                    MoodType::Happy => stats.happy += 1,
                    MoodType::Okay => stats.okay += 1,
                    MoodType::Sad => stats.sad += 1,
                    MoodType::Stressed => stats.stressed += 1,
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.happy + self.okay + self.sad + self.stressed
    }
}
