//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::dialogue::FeedbackCue;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::ChatEvent;

/// Suspension between accepting a user turn and showing the reply
#[async_trait]
pub trait ThinkingDelay: Send + Sync {
    async fn pause(&self);
}

/// Receiver of fire-and-forget UI feedback cues.
///
/// Errors are reported so the caller can log them, never to change the
/// conversation.
pub trait FeedbackSink: Send + Sync {
    fn notify(&self, session_id: &str, cue: FeedbackCue) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ThinkingDelay + ?Sized> ThinkingDelay for Arc<T> {
    async fn pause(&self) {
        (**self).pause().await;
    }
}

impl<T: FeedbackSink + ?Sized> FeedbackSink for Arc<T> {
    fn notify(&self, session_id: &str, cue: FeedbackCue) -> Result<(), String> {
        (**self).notify(session_id, cue)
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Sleeps for a uniformly drawn duration in `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    fn sample(&self) -> Duration {
        if self.max == self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[async_trait]
impl ThinkingDelay for RandomDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.sample()).await;
    }
}

/// Forwards cues to the session's event subscribers
pub struct BroadcastFeedback {
    broadcast_tx: broadcast::Sender<ChatEvent>,
}

impl BroadcastFeedback {
    pub fn new(broadcast_tx: broadcast::Sender<ChatEvent>) -> Self {
        Self { broadcast_tx }
    }
}

impl FeedbackSink for BroadcastFeedback {
    fn notify(&self, _session_id: &str, cue: FeedbackCue) -> Result<(), String> {
        self.broadcast_tx
            .send(ChatEvent::Feedback { cue })
            .map(|_| ())
            .map_err(|_| "no subscribers for feedback cue".to_string())
    }
}
