//! Random source for template variety
//!
//! Selection carries no meaning, so it sits behind a small trait that tests
//! can script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two kinds of draws the dialogue engine makes
pub trait ResponseRng: Send + Sync {
    /// Uniform index in `0..len`. `len` is always non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform value in `[0, 1)`
    fn draw(&mut self) -> f64;
}

/// Production source backed by `rand`'s standard generator
pub struct StdResponseRng {
    rng: StdRng,
}

impl StdResponseRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[allow(dead_code)] // Reproducible sessions for debugging
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ResponseRng for StdResponseRng {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl<R: ResponseRng + ?Sized> ResponseRng for Box<R> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Scripted source for deterministic tests.
///
/// Picks and draws are consumed from their queues; once a queue is empty the
/// fallback value is used (index 0, draw 0.0).
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    picks: std::collections::VecDeque<usize>,
    draws: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_draws(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.draws.extend(draws);
        self
    }
}

#[cfg(test)]
impl ResponseRng for ScriptedRng {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }

    fn draw(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(0.0)
    }
}
