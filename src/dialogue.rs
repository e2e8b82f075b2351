//! Rule-based dialogue engine
//!
//! Classification and stage transitions are pure; the only source of
//! nondeterminism is the injected [`ResponseRng`] used to vary templates.

mod category;
mod classifier;
mod effect;
pub mod random;
pub mod responses;
mod stage;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use category::{Category, MoodHint};
pub use classifier::classify;
pub use effect::{Effect, FeedbackCue};
pub use random::{ResponseRng, StdResponseRng};
pub use stage::{Milestone, Stage};
pub use transition::transition;
