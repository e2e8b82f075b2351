//! Process configuration from the environment

use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_THINK_MIN_MS: u64 = 1000;
const DEFAULT_THINK_MAX_MS: u64 = 2000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub port: u16,
    pub think_min: Duration,
    pub think_max: Duration,
    /// Chat sessions untouched for this long are discarded
    pub session_idle: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("MINDEASE_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.mindease/mindease.db")
        });

        let port = lookup("MINDEASE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let think_min_ms = lookup("MINDEASE_THINK_MIN_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_THINK_MIN_MS);
        let think_max_ms = lookup("MINDEASE_THINK_MAX_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_THINK_MAX_MS)
            .max(think_min_ms);

        let session_idle_secs = lookup("MINDEASE_SESSION_IDLE_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_SESSION_IDLE_SECS);

        Self {
            db_path,
            port,
            think_min: Duration::from_millis(think_min_ms),
            think_max: Duration::from_millis(think_max_ms),
            session_idle: Duration::from_secs(session_idle_secs),
        }
    }
}
