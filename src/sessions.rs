//! Session store - the append-only practice log
//!
//! Sessions are only ever inserted; the single destructive path is the
//! cascade when the owning skill is deleted.

use rusqlite::{Connection, params};

use crate::db::TrackerDb;
use crate::error::Result;
use crate::models::{PracticeSession, RecentSessionView};
use crate::time_bucket::day_bucket;

/// Repository for practice sessions
#[derive(Clone)]
pub struct SessionStore {
    db: TrackerDb,
}

impl SessionStore {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// All sessions for a skill, newest first
    pub fn for_skill(&self, skill_id: i64) -> Result<Vec<PracticeSession>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, skill_id, practiced_at, day_bucket, duration_hours, notes
             FROM practice_sessions WHERE skill_id = ?1 ORDER BY practiced_at DESC",
        )?;
        let sessions = stmt
            .query_map([skill_id], session_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(sessions)
    }

    /// Most recent sessions across all skills, with skill names
    pub fn recent(&self, limit: usize) -> Result<Vec<RecentSessionView>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT ps.id, ps.skill_id, s.name, ps.practiced_at, ps.duration_hours, ps.notes
            FROM practice_sessions ps
            JOIN skills s ON ps.skill_id = s.id
            ORDER BY ps.practiced_at DESC
            LIMIT ?1
            "#,
        )?;
        let views = stmt
            .query_map([limit], |row| {
                Ok(RecentSessionView {
                    id: row.get(0)?,
                    skill_id: row.get(1)?,
                    skill_name: row.get(2)?,
                    practiced_at: row.get(3)?,
                    duration_hours: row.get(4)?,
                    notes: row.get(5)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(views)
    }

    /// Append a session inside the caller's transaction
    pub(crate) fn insert_in(
        conn: &Connection,
        skill_id: i64,
        practiced_at: i64,
        duration_hours: f64,
        notes: &str,
    ) -> Result<PracticeSession> {
        let bucket = day_bucket(practiced_at);
        conn.execute(
            "INSERT INTO practice_sessions (skill_id, practiced_at, day_bucket, duration_hours, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![skill_id, practiced_at, bucket, duration_hours, notes],
        )?;
        Ok(PracticeSession {
            id: conn.last_insert_rowid(),
            skill_id,
            practiced_at,
            day_bucket: bucket,
            duration_hours,
            notes: notes.to_string(),
        })
    }
}

fn session_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PracticeSession> {
    Ok(PracticeSession {
        id: row.get(0)?,
        skill_id: row.get(1)?,
        practiced_at: row.get(2)?,
        day_bucket: row.get(3)?,
        duration_hours: row.get(4)?,
        notes: row.get(5)?,
    })
}
