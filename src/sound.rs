//! Mood acknowledgement tones
//!
//! Describes the chime the UI plays after a check-in. Synthesis happens on
//! the client; a client without audio simply ignores the descriptor.

use crate::db::MoodType;
use serde::Serialize;

/// Delay between successive notes of a chime
const NOTE_STAGGER_SECS: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTone {
    /// Note frequencies in Hz, played in order
    pub frequencies: &'static [f32],
    /// Length of each note in seconds
    pub duration_secs: f32,
    pub stagger_secs: f32,
    pub waveform: &'static str,
}

// C5 E5 G5
const HAPPY_NOTES: &[f32] = &[523.25, 659.25, 783.99];
// G4 B4
const OKAY_NOTES: &[f32] = &[392.0, 493.88];
// D4 F4
const SAD_NOTES: &[f32] = &[293.66, 349.23];
// A4 G4 F4, descending
const STRESSED_NOTES: &[f32] = &[440.0, 392.0, 349.23];

pub fn tone_for(mood: MoodType) -> MoodTone {
    let (frequencies, duration_secs) = match mood {
        MoodType::Happy => (HAPPY_NOTES, 0.3),
        MoodType::Okay => (OKAY_NOTES, 0.4),
        MoodType::Sad => (SAD_NOTES, 0.5),
        MoodType::Stressed => (STRESSED_NOTES, 0.4),
    };
    MoodTone {
        frequencies,
        duration_secs,
        stagger_secs: NOTE_STAGGER_SECS,
        waveform: "sine",
    }
}
