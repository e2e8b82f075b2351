//! Database module for the mood journal
//!
//! Append-only store of mood check-ins with optional reflections.

mod schema;

pub use schema::*;

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, TimeZone, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Window used by the weekly dashboard
const WEEK_DAYS: i64 = 7;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database lock poisoned")]
    LockPoisoned,
    #[error("Corrupt mood row {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Mood Operations ====================

    /// Record a check-in now
    pub fn save_mood(&self, mood: MoodType, reflection: Option<&str>) -> DbResult<MoodEntry> {
        self.save_mood_at(mood, reflection, Utc::now())
    }

    /// Record a check-in at an explicit time. Blank reflections are dropped.
    pub fn save_mood_at(
        &self,
        mood: MoodType,
        reflection: Option<&str>,
        at: DateTime<Utc>,
    ) -> DbResult<MoodEntry> {
        let reflection = reflection
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);
        let entry = MoodEntry {
            id: uuid::Uuid::new_v4().to_string(),
            mood,
            reflection,
            // Stored with microsecond precision
            timestamp: at.trunc_subsecs(6),
        };

        self.conn()?.execute(
            "INSERT INTO moods (id, mood, reflection, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id,
                entry.mood.as_str(),
                entry.reflection,
                format_datetime(entry.timestamp)
            ],
        )?;

        tracing::debug!(id = %entry.id, mood = %entry.mood, "Mood saved");
        Ok(entry)
    }

    /// All check-ins, newest first
    pub fn list_moods(&self) -> DbResult<Vec<MoodEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, mood, reflection, created_at FROM moods
             ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map([], read_row)?;
        collect_entries(rows)
    }

    /// Check-ins in `[from, to)`, newest first
    pub fn moods_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DbResult<Vec<MoodEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, mood, reflection, created_at FROM moods
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(
            params![format_datetime(from), format_datetime(to)],
            read_row,
        )?;
        collect_entries(rows)
    }

    /// Latest check-in on the same UTC calendar day as `now`
    pub fn today_mood(&self, now: DateTime<Utc>) -> DbResult<Option<MoodEntry>> {
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map_or(now, |midnight| Utc.from_utc_datetime(&midnight));
        let end = start + Duration::days(1);
        Ok(self.moods_between(start, end)?.into_iter().next())
    }

    /// Check-ins from the past seven days up to and including `now`
    pub fn weekly_moods(&self, now: DateTime<Utc>) -> DbResult<Vec<MoodEntry>> {
        self.moods_between(now - Duration::days(WEEK_DAYS), now + Duration::microseconds(1))
    }

    pub fn mood_stats(&self, now: DateTime<Utc>) -> DbResult<MoodStats> {
        Ok(MoodStats::from_entries(&self.weekly_moods(now)?))
    }
}

type RawRow = (String, String, Option<String>, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn collect_entries(
    rows: impl Iterator<Item = rusqlite::Result<RawRow>>,
) -> DbResult<Vec<MoodEntry>> {
    rows.map(|row| -> DbResult<MoodEntry> {
        let (id, mood, reflection, created_at) = row?;
        let mood: MoodType = mood
            .parse()
            .map_err(|reason| DbError::Corrupt {
                id: id.clone(),
                reason,
            })?;
        let timestamp = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| DbError::Corrupt {
                id: id.clone(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);
        Ok(MoodEntry {
            id,
            mood,
            reflection,
            timestamp,
        })
    })
    .collect()
}

/// Fixed-width RFC 3339 so string order matches time order
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
