//! SQLite database connection and schema management
//!
//! Manages the tracker database (default `~/.praxis/practice.db`). The badge
//! catalog is seeded on first open; all writers share one connection behind
//! a mutex, which is the serialization boundary for session recording.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::badges::CATALOG;
use crate::error::Result;

/// Database wrapper shared by the stores and engines
#[derive(Clone)]
pub struct TrackerDb {
    conn: Arc<Mutex<Connection>>,
}

impl TrackerDb {
    /// Open or create the database at the default location (~/.praxis/practice.db)
    pub fn open_default() -> Result<Self> {
        let dir = dirs::home_dir().unwrap_or_default().join(".praxis");
        Self::open(&dir.join("practice.db"))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection (for queries and transactions)
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Tracker DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.seed_badge_catalog()?;
        Ok(())
    }

    /// Insert the fixed badge catalog if the table is empty.
    /// The catalog is immutable after seeding.
    fn seed_badge_catalog(&self) -> Result<()> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM badges", [], |r| r.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let mut stmt = conn.prepare(
            "INSERT INTO badges (name, description, criteria, icon, rarity) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for def in CATALOG {
            stmt.execute((
                def.name,
                def.description,
                def.criteria.as_str(),
                def.icon,
                def.rarity.as_str(),
            ))?;
        }
        tracing::debug!("Seeded badge catalog ({} badges)", CATALOG.len());
        Ok(())
    }
}

/// SQL schema for the tracker database
const SCHEMA_SQL: &str = r#"
-- Tracked skills with practice aggregates
CREATE TABLE IF NOT EXISTS skills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    proficiency TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    total_hours REAL NOT NULL DEFAULT 0,
    last_practiced INTEGER,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_skill_name ON skills(name);
CREATE INDEX IF NOT EXISTS idx_skill_category ON skills(category);

-- Append-only practice log
CREATE TABLE IF NOT EXISTS practice_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    skill_id INTEGER NOT NULL,
    practiced_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL,
    duration_hours REAL NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (skill_id) REFERENCES skills (id)
);
CREATE INDEX IF NOT EXISTS idx_session_skill ON practice_sessions(skill_id);
CREATE INDEX IF NOT EXISTS idx_session_day ON practice_sessions(day_bucket);
CREATE INDEX IF NOT EXISTS idx_session_at ON practice_sessions(practiced_at);

-- Streak state, one row per skill (created empty alongside the skill)
CREATE TABLE IF NOT EXISTS streaks (
    skill_id INTEGER PRIMARY KEY,
    current_streak INTEGER NOT NULL DEFAULT 0,
    longest_streak INTEGER NOT NULL DEFAULT 0,
    last_practice_at INTEGER,
    updated_at INTEGER,
    FOREIGN KEY (skill_id) REFERENCES skills (id)
);

-- Fixed badge catalog, seeded once
CREATE TABLE IF NOT EXISTS badges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    criteria TEXT NOT NULL UNIQUE,
    icon TEXT NOT NULL DEFAULT 'badge',
    rarity TEXT NOT NULL DEFAULT 'common'
);

-- One-time awards; skill_id is NULL for globally scoped badges
CREATE TABLE IF NOT EXISTS earned_badges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    badge_id INTEGER NOT NULL,
    skill_id INTEGER,
    earned_at INTEGER NOT NULL,
    FOREIGN KEY (badge_id) REFERENCES badges (id),
    FOREIGN KEY (skill_id) REFERENCES skills (id)
);
CREATE INDEX IF NOT EXISTS idx_earned_badge ON earned_badges(badge_id);
CREATE INDEX IF NOT EXISTS idx_earned_skill ON earned_badges(skill_id);
"#;
