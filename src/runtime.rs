//! Runtime for live chat sessions
//!
//! Each session gets its own task that serializes submissions and streams
//! events to subscribers. The manager keeps the handles.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;

use crate::dialogue::{FeedbackCue, Milestone, MoodHint, Stage, StdResponseRng};
use crate::session::{Session, SessionSnapshot, Turn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio::time::Instant;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = ChatRuntime<RandomDelay, BroadcastFeedback>;

/// Commands accepted by a session runtime
#[derive(Debug)]
pub enum Command {
    Submit { text: String },
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Init { snapshot: SessionSnapshot },
    Message { turn: Turn },
    Composing { composing: bool },
    StageChange { stage: Stage, milestone: Milestone },
    Feedback { cue: FeedbackCue },
    Error { message: String },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Assistant is still composing a reply")]
    Busy,
    #[error("Session runtime has stopped: {0}")]
    Stopped(String),
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct ChatHandle {
    pub command_tx: mpsc::Sender<Command>,
    pub broadcast_tx: broadcast::Sender<ChatEvent>,
    pub session: Arc<RwLock<Session>>,
    /// Claimed by `submit` before the command is queued, released by the
    /// executor once the reply is recorded
    pub in_flight: Arc<AtomicBool>,
    last_active: Arc<Mutex<Instant>>,
}

impl ChatHandle {
    async fn touch(&self) {
        *self.last_active.lock().await = Instant::now();
    }

    /// Nothing in flight, nobody streaming, and untouched for `max_idle`
    async fn is_idle(&self, max_idle: Duration) -> bool {
        !self.in_flight.load(Ordering::SeqCst)
            && self.broadcast_tx.receiver_count() == 0
            && self.last_active.lock().await.elapsed() >= max_idle
    }
}

/// Manager for all live chat sessions
pub struct RuntimeManager {
    delay: RandomDelay,
    sessions: RwLock<HashMap<String, ChatHandle>>,
}

impl RuntimeManager {
    pub fn new(delay: RandomDelay) -> Self {
        Self {
            delay,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session and start its runtime task
    pub async fn create(&self, mood_hint: Option<MoodHint>) -> SessionSnapshot {
        let session = Session::new(mood_hint, StdResponseRng::from_entropy());
        let snapshot = session.snapshot();
        let id = session.id().to_string();

        let (command_tx, command_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let session = Arc::new(RwLock::new(session));
        let in_flight = Arc::new(AtomicBool::new(false));

        let runtime: ProductionRuntime = ChatRuntime::new(
            session.clone(),
            id.clone(),
            self.delay,
            BroadcastFeedback::new(broadcast_tx.clone()),
            command_rx,
            broadcast_tx.clone(),
            in_flight.clone(),
        );

        let session_id = id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %session_id, "Chat session finished");
        });

        self.sessions.write().await.insert(
            id.clone(),
            ChatHandle {
                command_tx,
                broadcast_tx,
                session,
                in_flight,
                last_active: Arc::new(Mutex::new(Instant::now())),
            },
        );

        tracing::info!(session_id = %id, mood_hint = ?mood_hint, "Chat session created");
        snapshot
    }

    async fn handle(&self, session_id: &str) -> Result<ChatHandle, RuntimeError> {
        let handle = self
            .sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;
        handle.touch().await;
        Ok(handle)
    }

    /// Queue a user utterance.
    ///
    /// Returns `Ok(false)` for blank text, which is ignored without touching
    /// the session. Only one utterance may be pending per session; a second
    /// one before the reply is recorded gets `Busy`.
    pub async fn submit(&self, session_id: &str, text: String) -> Result<bool, RuntimeError> {
        let handle = self.handle(session_id).await?;

        if text.trim().is_empty() {
            return Ok(false);
        }
        if handle.in_flight.swap(true, Ordering::SeqCst) {
            return Err(RuntimeError::Busy);
        }

        if let Err(e) = handle.command_tx.send(Command::Submit { text }).await {
            handle.in_flight.store(false, Ordering::SeqCst);
            return Err(RuntimeError::Stopped(e.to_string()));
        }
        Ok(true)
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let handle = self.handle(session_id).await?;
        let snapshot = handle.session.read().await.snapshot();
        Ok(snapshot)
    }

    /// Subscribe to session updates, returning the current state alongside
    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> Result<(SessionSnapshot, broadcast::Receiver<ChatEvent>), RuntimeError> {
        let handle = self.handle(session_id).await?;
        // Subscribe under the read lock so no event slips between the two
        let session = handle.session.read().await;
        let rx = handle.broadcast_tx.subscribe();
        Ok((session.snapshot(), rx))
    }

    /// Forget a session. An in-flight reply still completes in the
    /// background, after which the runtime task exits.
    pub async fn discard(&self, session_id: &str) -> Result<(), RuntimeError> {
        if self.sessions.write().await.remove(session_id).is_none() {
            return Err(RuntimeError::SessionNotFound(session_id.to_string()));
        }
        tracing::info!(session_id = %session_id, "Chat session discarded");
        Ok(())
    }

    /// Drop sessions that have sat idle for `max_idle`. Dropping the handle
    /// closes the command channel, which ends the runtime task.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut idle = vec![];
        for (id, handle) in sessions.iter() {
            if handle.is_idle(max_idle).await {
                idle.push(id.clone());
            }
        }
        for id in &idle {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Evicted idle chat session");
        }
        idle.len()
    }

    /// Periodically evict idle sessions for as long as the manager lives
    pub fn spawn_sweeper(self: &Arc<Self>, max_idle: Duration, every: Duration) {
        let manager: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            loop {
                timer.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                let evicted = manager.evict_idle(max_idle).await;
                if evicted > 0 {
                    let remaining = manager.session_count().await;
                    tracing::debug!(evicted, remaining, "Idle session sweep");
                }
            }
        });
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
