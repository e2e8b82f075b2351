//! HTTP API for the wellness companion

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::db::Database;
use crate::runtime::{RandomDelay, RuntimeManager};
use std::sync::Arc;
use std::time::Duration;

/// How often idle chat sessions are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<RuntimeManager>,
    pub db: Database,
}

impl AppState {
    /// Must be called inside a tokio runtime; starts the idle sweeper
    pub fn new(db: Database, delay: RandomDelay, session_idle: Duration) -> Self {
        let runtime = Arc::new(RuntimeManager::new(delay));
        runtime.spawn_sweeper(session_idle, SWEEP_INTERVAL.min(session_idle));
        Self { runtime, db }
    }
}
