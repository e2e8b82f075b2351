//! Guided breathing patterns
//!
//! A pattern is four phase lengths in seconds (inhale, hold, exhale, hold).
//! Phases with zero length are skipped.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl Phase {
    const ORDER: [Phase; 4] = [Phase::Inhale, Phase::HoldIn, Phase::Exhale, Phase::HoldOut];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::HoldIn | Phase::HoldOut => "Hold",
            Phase::Exhale => "Breathe Out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingPattern {
    /// In for 4, out for 6
    Calm,
    /// 4-4-4-4
    Box,
}

/// Where a running exercise is at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhasePosition {
    pub phase: Phase,
    pub label: &'static str,
    pub remaining_secs: u32,
    /// Completed full cycles so far
    pub cycle: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseStep {
    pub phase: Phase,
    pub label: &'static str,
    pub secs: u32,
}

/// Serializable description for the UI
#[derive(Debug, Clone, Serialize)]
pub struct PatternInfo {
    pub id: BreathingPattern,
    pub name: &'static str,
    pub pattern: [u32; 4],
    pub steps: Vec<PhaseStep>,
    pub cycle_secs: u32,
}

impl std::str::FromStr for BreathingPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calm" => Ok(BreathingPattern::Calm),
            "box" => Ok(BreathingPattern::Box),
            other => Err(format!("unknown breathing pattern: {other}")),
        }
    }
}

impl BreathingPattern {
    pub const ALL: [BreathingPattern; 2] = [BreathingPattern::Calm, BreathingPattern::Box];

    pub fn name(self) -> &'static str {
        match self {
            BreathingPattern::Calm => "Calm Breathing",
            BreathingPattern::Box => "Box Breathing",
        }
    }

    pub fn durations(self) -> [u32; 4] {
        match self {
            BreathingPattern::Calm => [4, 0, 6, 0],
            BreathingPattern::Box => [4, 4, 4, 4],
        }
    }

    /// Active phases with their lengths, in order
    pub fn phases(self) -> impl Iterator<Item = (Phase, u32)> {
        Phase::ORDER
            .into_iter()
            .zip(self.durations())
            .filter(|(_, secs)| *secs > 0)
    }

    pub fn cycle_secs(self) -> u32 {
        self.durations().iter().sum()
    }

    /// Phase in effect `elapsed_secs` after the exercise started
    pub fn phase_at(self, elapsed_secs: u32) -> PhasePosition {
        let cycle_secs = self.cycle_secs();
        let cycle = elapsed_secs / cycle_secs;
        let mut offset = elapsed_secs % cycle_secs;

        for (phase, secs) in self.phases() {
            if offset < secs {
                return PhasePosition {
                    phase,
                    label: phase.label(),
                    remaining_secs: secs - offset,
                    cycle,
                };
            }
            offset -= secs;
        }

        // offset < cycle_secs, so some phase always matches
        unreachable!("offset within cycle must fall in a phase")
    }

    pub fn info(self) -> PatternInfo {
        PatternInfo {
            id: self,
            name: self.name(),
            pattern: self.durations(),
            steps: self
                .phases()
                .map(|(phase, secs)| PhaseStep {
                    phase,
                    label: phase.label(),
                    secs,
                })
                .collect(),
            cycle_secs: self.cycle_secs(),
        }
    }
}
