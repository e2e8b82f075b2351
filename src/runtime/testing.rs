//! Mock implementations for testing
//!
//! These mocks enable integration testing without real timers or a UI.

use super::traits::*;
use crate::dialogue::FeedbackCue;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Delays
// ============================================================================

/// Delay that returns immediately
pub struct InstantDelay;

#[async_trait]
impl ThinkingDelay for InstantDelay {
    async fn pause(&self) {}
}

/// Delay that blocks until the test releases it
#[derive(Default)]
pub struct GatedDelay {
    /// Notified when a pause starts
    pub started: Arc<Notify>,
    /// Notify to let the pause finish
    pub release: Arc<Notify>,
}

impl GatedDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThinkingDelay for GatedDelay {
    async fn pause(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

// ============================================================================
// Feedback sinks
// ============================================================================

/// Records every cue it receives
#[derive(Default)]
pub struct RecordingFeedback {
    pub cues: Mutex<Vec<(String, FeedbackCue)>>,
}

impl RecordingFeedback {
    pub fn recorded(&self) -> Vec<FeedbackCue> {
        self.cues.lock().unwrap().iter().map(|(_, c)| *c).collect()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, session_id: &str, cue: FeedbackCue) -> Result<(), String> {
        self.cues
            .lock()
            .unwrap()
            .push((session_id.to_string(), cue));
        Ok(())
    }
}

/// Sink whose output device is always unavailable
pub struct FailingFeedback;

impl FeedbackSink for FailingFeedback {
    fn notify(&self, _session_id: &str, _cue: FeedbackCue) -> Result<(), String> {
        Err("audio device unavailable".to_string())
    }
}

// ============================================================================
// Executor tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::random::ScriptedRng;
    use crate::dialogue::Stage;
    use crate::runtime::{ChatEvent, ChatRuntime, Command};
    use crate::session::{Role, Session};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{broadcast, mpsc, RwLock};

    struct Harness {
        session: Arc<RwLock<Session>>,
        command_tx: mpsc::Sender<Command>,
        events: broadcast::Receiver<ChatEvent>,
        in_flight: Arc<AtomicBool>,
        join: tokio::task::JoinHandle<()>,
    }

    fn spawn<D, F>(delay: D, feedback: F) -> Harness
    where
        D: ThinkingDelay + 'static,
        F: FeedbackSink + 'static,
    {
        let session = Session::new(None, ScriptedRng::new());
        let id = session.id().to_string();
        let session = Arc::new(RwLock::new(session));
        let (command_tx, command_rx) = mpsc::channel(8);
        let (broadcast_tx, events) = broadcast::channel(64);
        let in_flight = Arc::new(AtomicBool::new(true));
        let runtime = ChatRuntime::new(
            session.clone(),
            id,
            delay,
            feedback,
            command_rx,
            broadcast_tx,
            in_flight.clone(),
        );
        let join = tokio::spawn(runtime.run());
        Harness {
            session,
            command_tx,
            events,
            in_flight,
            join,
        }
    }

    async fn submit(tx: &mpsc::Sender<Command>, text: &str) {
        tx.send(Command::Submit {
            text: text.to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_composing_visible_during_delay() {
        let delay = Arc::new(GatedDelay::new());
        let mut h = spawn(delay.clone(), Arc::new(RecordingFeedback::default()));

        submit(&h.command_tx, "I feel happy").await;
        delay.started.notified().await;

        {
            let session = h.session.read().await;
            assert!(session.is_composing());
            assert_eq!(session.transcript().len(), 2);
            assert_eq!(session.transcript()[1].role, Role::User);
            assert!(h.in_flight.load(Ordering::SeqCst));
        }

        delay.release.notify_one();
        drop(h.command_tx);
        h.join.await.unwrap();

        let session = h.session.read().await;
        assert!(!session.is_composing());
        assert_eq!(session.transcript().len(), 3);
        assert!(!h.in_flight.load(Ordering::SeqCst));

        // user message, composing on, assistant message, composing off
        let mut kinds = vec![];
        while let Ok(event) = h.events.try_recv() {
            kinds.push(match event {
                ChatEvent::Message { turn } => format!("message:{:?}", turn.role),
                ChatEvent::Composing { composing } => format!("composing:{composing}"),
                other => format!("{other:?}"),
            });
        }
        assert_eq!(
            kinds,
            vec![
                "message:User",
                "composing:true",
                "message:Assistant",
                "composing:false"
            ]
        );
    }

    #[tokio::test]
    async fn test_submissions_are_serialized() {
        let mut h = spawn(InstantDelay, RecordingFeedback::default());
        for text in ["I feel sad", "still sad", "yes", "hello"] {
            submit(&h.command_tx, text).await;
        }
        drop(h.command_tx);
        h.join.await.unwrap();

        let session = h.session.read().await;
        let roles: Vec<Role> = session.transcript().iter().map(|t| t.role).collect();
        assert_eq!(roles.len(), 9);
        for (i, role) in roles.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Assistant } else { Role::User };
            assert_eq!(*role, expected, "turn {i}");
        }
        assert_eq!(session.turn_count(), 4);
        assert_eq!(session.stage(), Stage::PostBreathing);

        let mut stages = vec![];
        while let Ok(event) = h.events.try_recv() {
            if let ChatEvent::StageChange { stage, .. } = event {
                stages.push(stage);
            }
        }
        assert_eq!(
            stages,
            vec![
                Stage::Listening,
                Stage::SuggestedBreathing,
                Stage::PostBreathing
            ]
        );
    }

    #[tokio::test]
    async fn test_feedback_cues_reach_sink() {
        let feedback = Arc::new(RecordingFeedback::default());
        let h = spawn(InstantDelay, feedback.clone());
        submit(&h.command_tx, "I'm falling apart").await;
        submit(&h.command_tx, "no").await;
        submit(&h.command_tx, "thank you, bye").await;
        drop(h.command_tx);
        h.join.await.unwrap();

        assert_eq!(
            feedback.recorded(),
            vec![FeedbackCue::MoodAcknowledged, FeedbackCue::Celebration]
        );
    }

    #[tokio::test]
    async fn test_failing_feedback_does_not_alter_dialogue() {
        let h = spawn(InstantDelay, FailingFeedback);
        submit(&h.command_tx, "it's all too much").await;
        drop(h.command_tx);
        h.join.await.unwrap();

        let session = h.session.read().await;
        assert_eq!(session.stage(), Stage::SuggestedBreathing);
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_command_ignored() {
        let h = spawn(InstantDelay, RecordingFeedback::default());
        submit(&h.command_tx, "  ").await;
        drop(h.command_tx);
        h.join.await.unwrap();

        let session = h.session.read().await;
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.turn_count(), 0);
        assert!(!h.in_flight.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_in_flight_reply_completes_after_senders_dropped() {
        let delay = Arc::new(GatedDelay::new());
        let h = spawn(delay.clone(), RecordingFeedback::default());
        submit(&h.command_tx, "I need to talk").await;
        delay.started.notified().await;

        drop(h.command_tx);
        delay.release.notify_one();
        h.join.await.unwrap();

        let session = h.session.read().await;
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[2].role, Role::Assistant);
    }
}
