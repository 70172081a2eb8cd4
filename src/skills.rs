//! Skill store - CRUD and practice aggregates
//!
//! A skill owns its sessions, its streak row and its skill-scoped earned
//! badges; deleting the skill cascades to all three. Globally scoped awards
//! are never touched by a cascade.

use rusqlite::{Connection, OptionalExtension, params};

use crate::db::TrackerDb;
use crate::error::{Error, Result};
use crate::models::{Proficiency, Skill, SkillDraft};
use crate::time_bucket::now_ms;

/// Repository for skill records
#[derive(Clone)]
pub struct SkillStore {
    db: TrackerDb,
}

impl SkillStore {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Create a new skill together with its empty streak row
    pub fn create(&self, draft: &SkillDraft) -> Result<Skill> {
        draft.validate()?;
        let created_at = now_ms();

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO skills (name, category, proficiency, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.name,
                draft.category,
                draft.proficiency.as_str(),
                draft.notes,
                created_at,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute("INSERT INTO streaks (skill_id) VALUES (?1)", [id])?;
        tx.commit()?;

        tracing::info!(id, name = draft.name.as_str(), "Skill created");
        Ok(Skill {
            id,
            name: draft.name.clone(),
            category: draft.category.clone(),
            proficiency: draft.proficiency,
            notes: draft.notes.clone(),
            total_hours: 0.0,
            last_practiced: None,
            created_at,
        })
    }

    /// Get a skill by id
    pub fn get(&self, id: i64) -> Result<Skill> {
        let conn = self.db.conn();
        Self::get_in(&conn, id)
    }

    pub(crate) fn get_in(conn: &Connection, id: i64) -> Result<Skill> {
        conn.query_row(
            "SELECT id, name, category, proficiency, notes, total_hours, last_practiced, created_at
             FROM skills WHERE id = ?1",
            [id],
            skill_from_row,
        )
        .optional()?
        .ok_or(Error::not_found("skill", id))
    }

    /// All skills ordered by name
    pub fn list(&self) -> Result<Vec<Skill>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, category, proficiency, notes, total_hours, last_practiced, created_at
             FROM skills ORDER BY name",
        )?;
        let skills = stmt
            .query_map([], skill_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(skills)
    }

    /// Update the user-editable fields of an existing skill
    pub fn update(&self, id: i64, draft: &SkillDraft) -> Result<Skill> {
        draft.validate()?;
        let conn = self.db.conn();
        let changed = conn.execute(
            "UPDATE skills SET name = ?1, category = ?2, proficiency = ?3, notes = ?4 WHERE id = ?5",
            params![
                draft.name,
                draft.category,
                draft.proficiency.as_str(),
                draft.notes,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(Error::not_found("skill", id));
        }
        drop(conn);
        self.get(id)
    }

    /// Delete a skill, cascading to its sessions, streak row and
    /// skill-scoped earned badges
    pub fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row("SELECT 1 FROM skills WHERE id = ?1", [id], |r| r.get(0))
            .optional()?;
        if exists.is_none() {
            return Err(Error::not_found("skill", id));
        }

        tx.execute("DELETE FROM practice_sessions WHERE skill_id = ?1", [id])?;
        tx.execute("DELETE FROM streaks WHERE skill_id = ?1", [id])?;
        tx.execute("DELETE FROM earned_badges WHERE skill_id = ?1", [id])?;
        tx.execute("DELETE FROM skills WHERE id = ?1", [id])?;
        tx.commit()?;

        tracing::info!(id, "Skill deleted");
        Ok(())
    }

    /// Fold a recorded session into the skill aggregates, inside the
    /// caller's transaction. total_hours only ever grows.
    pub(crate) fn apply_practice_in(
        conn: &Connection,
        skill_id: i64,
        duration_hours: f64,
        at_ms: i64,
    ) -> Result<()> {
        let changed = conn.execute(
            "UPDATE skills SET total_hours = total_hours + ?1, last_practiced = ?2 WHERE id = ?3",
            params![duration_hours, at_ms, skill_id],
        )?;
        if changed == 0 {
            return Err(Error::not_found("skill", skill_id));
        }
        Ok(())
    }
}

fn skill_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Skill> {
    let proficiency: String = row.get(3)?;
    Ok(Skill {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        proficiency: Proficiency::from_str(&proficiency).unwrap_or_default(),
        notes: row.get(4)?,
        total_hours: row.get(5)?,
        last_practiced: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, SkillStore) {
        let dir = tempdir().unwrap();
        let db = TrackerDb::open(&dir.path().join("test.db")).unwrap();
        (dir, SkillStore::new(db))
    }

    #[test]
    fn create_get_roundtrip() {
        let (_dir, store) = store();
        let skill = store
            .create(&SkillDraft::new("Guitar", "Music", Proficiency::Beginner, "nylon strings"))
            .unwrap();

        let fetched = store.get(skill.id).unwrap();
        assert_eq!(fetched.name, "Guitar");
        assert_eq!(fetched.proficiency, Proficiency::Beginner);
        assert_eq!(fetched.total_hours, 0.0);
        assert!(fetched.last_practiced.is_none());
    }

    #[test]
    fn create_initializes_empty_streak_row() {
        let (_dir, store) = store();
        let skill = store
            .create(&SkillDraft::new("Guitar", "Music", Proficiency::Beginner, ""))
            .unwrap();

        let streaks = crate::streaks::StreakStore::new(store.db.clone());
        let state = streaks.get(skill.id).unwrap();
        assert_eq!(state.current, 0);
        assert_eq!(state.longest, 0);
        assert!(state.last_practice_at.is_none());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let (_dir, store) = store();
        let err = store.get(999).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn update_rejects_invalid_draft() {
        let (_dir, store) = store();
        let skill = store
            .create(&SkillDraft::new("Guitar", "Music", Proficiency::Beginner, ""))
            .unwrap();

        let err = store
            .update(skill.id, &SkillDraft::new("123", "Music", Proficiency::Expert, ""))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // Unchanged after the failed update
        assert_eq!(store.get(skill.id).unwrap().name, "Guitar");
    }

    #[test]
    fn list_is_sorted_by_name() {
        let (_dir, store) = store();
        store
            .create(&SkillDraft::new("Piano", "Music", Proficiency::Beginner, ""))
            .unwrap();
        store
            .create(&SkillDraft::new("Chess", "Games", Proficiency::Advanced, ""))
            .unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Chess", "Piano"]);
    }
}
