//! Per-session runtime executor

use super::traits::{FeedbackSink, ThinkingDelay};
use super::{ChatEvent, Command};

use crate::dialogue::Effect;
use crate::session::{Reply, Session};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};

/// Drives one session: commands are handled strictly one at a time, so a
/// submission always finishes before the next one begins.
pub struct ChatRuntime<D, F>
where
    D: ThinkingDelay + 'static,
    F: FeedbackSink + 'static,
{
    session_id: String,
    session: Arc<RwLock<Session>>,
    delay: D,
    feedback: F,
    command_rx: mpsc::Receiver<Command>,
    broadcast_tx: broadcast::Sender<ChatEvent>,
    in_flight: Arc<AtomicBool>,
}

impl<D, F> ChatRuntime<D, F>
where
    D: ThinkingDelay + 'static,
    F: FeedbackSink + 'static,
{
    pub fn new(
        session: Arc<RwLock<Session>>,
        session_id: String,
        delay: D,
        feedback: F,
        command_rx: mpsc::Receiver<Command>,
        broadcast_tx: broadcast::Sender<ChatEvent>,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            session_id,
            session,
            delay,
            feedback,
            command_rx,
            broadcast_tx,
            in_flight,
        }
    }

    /// Run until every command sender is dropped.
    ///
    /// A submission that is already underway always completes; dropping the
    /// senders only stops further commands from arriving.
    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Starting chat runtime");

        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Submit { text } => self.handle_submit(&text).await,
            }
        }

        tracing::info!(session_id = %self.session_id, "Chat runtime stopped");
    }

    async fn handle_submit(&mut self, text: &str) {
        // Events are published while the write lock is held so a subscriber
        // never sees a turn both in its snapshot and as a live event.
        let pending = {
            let mut session = self.session.write().await;
            let Some(pending) = session.begin(text) else {
                tracing::debug!(session_id = %self.session_id, "Ignoring blank submission");
                self.in_flight.store(false, Ordering::SeqCst);
                return;
            };
            if let Some(turn) = session.transcript().last() {
                let _ = self.broadcast_tx.send(ChatEvent::Message { turn: turn.clone() });
            }
            let _ = self
                .broadcast_tx
                .send(ChatEvent::Composing { composing: true });
            pending
        };

        // Readers may observe the composing flag while we wait
        self.delay.pause().await;

        let mut session = self.session.write().await;
        let reply = session.finish(pending);
        // Released under the lock, before subscribers see composing end
        self.in_flight.store(false, Ordering::SeqCst);
        tracing::debug!(
            session_id = %session.id(),
            stage = ?session.stage(),
            turn_count = session.turn_count(),
            "Reply recorded"
        );
        self.publish_reply(reply);
    }

    fn publish_reply(&self, reply: Reply) {
        let Reply {
            category,
            previous_stage,
            next_stage,
            turn,
            effects,
        } = reply;

        tracing::info!(
            session_id = %self.session_id,
            category = category.as_str(),
            from = ?previous_stage,
            to = ?next_stage,
            "Dialogue transition"
        );

        let _ = self.broadcast_tx.send(ChatEvent::Message { turn });
        if next_stage != previous_stage {
            let _ = self.broadcast_tx.send(ChatEvent::StageChange {
                stage: next_stage,
                milestone: next_stage.milestone(),
            });
        }
        let _ = self
            .broadcast_tx
            .send(ChatEvent::Composing { composing: false });

        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::Cue(cue) => {
                if let Err(e) = self.feedback.notify(&self.session_id, cue) {
                    tracing::debug!(session_id = %self.session_id, error = %e, ?cue, "Feedback cue dropped");
                }
            }
        }
    }
}
