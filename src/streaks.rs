//! Streak tracking
//!
//! A streak counts consecutive practice occurrences, where consecutive means
//! within a 36-hour window of the previous one. The 36-hour threshold (not
//! 24) tolerates timezone drift and practiced-late-at-night patterns while
//! still enforcing daily cadence.

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::db::TrackerDb;
use crate::error::{Error, Result};
use crate::time_bucket::now_ms;

/// Gap up to which a new session continues the streak (inclusive)
pub const STREAK_WINDOW_MS: i64 = 36 * 60 * 60 * 1000;

/// Streak state for a single skill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current: u32,
    /// Never decreases; always >= current after an update
    pub longest: u32,
    pub last_practice_at: Option<i64>,
}

impl StreakState {
    /// Compute the state after a new practice at `at_ms`.
    ///
    /// A gap of exactly 36h continues the streak; anything longer resets the
    /// current count to 1 and leaves the longest untouched. A backdated
    /// session (negative gap) is within the window and continues the streak
    /// (see DESIGN.md).
    pub fn advance(prior: Option<&StreakState>, at_ms: i64) -> StreakState {
        match prior.and_then(|p| p.last_practice_at.map(|last| (p, last))) {
            // No prior state, or an empty row created with the skill
            None => StreakState {
                current: 1,
                longest: 1,
                last_practice_at: Some(at_ms),
            },
            Some((prior, last)) => {
                let gap = at_ms - last;
                if gap <= STREAK_WINDOW_MS {
                    let current = prior.current + 1;
                    StreakState {
                        current,
                        longest: prior.longest.max(current),
                        last_practice_at: Some(at_ms),
                    }
                } else {
                    StreakState {
                        current: 1,
                        longest: prior.longest,
                        last_practice_at: Some(at_ms),
                    }
                }
            }
        }
    }
}

/// A skill's streak joined with its name, for ranked listings
#[derive(Debug, Clone, Serialize)]
pub struct SkillStreakView {
    pub skill_id: i64,
    pub skill_name: String,
    #[serde(flatten)]
    pub state: StreakState,
}

/// Loads and persists streak state
#[derive(Clone)]
pub struct StreakStore {
    db: TrackerDb,
}

impl StreakStore {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Get the streak state for a skill (zeroed until the first session)
    pub fn get(&self, skill_id: i64) -> Result<StreakState> {
        let conn = self.db.conn();
        Self::load(&conn, skill_id)?.ok_or(Error::not_found("skill", skill_id))
    }

    /// All streaks with skill names, highest current streak first
    pub fn all(&self) -> Result<Vec<SkillStreakView>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT st.skill_id, s.name, st.current_streak, st.longest_streak, st.last_practice_at
            FROM streaks st
            JOIN skills s ON st.skill_id = s.id
            ORDER BY st.current_streak DESC, s.name
            "#,
        )?;
        let views = stmt
            .query_map([], |row| {
                Ok(SkillStreakView {
                    skill_id: row.get(0)?,
                    skill_name: row.get(1)?,
                    state: StreakState {
                        current: row.get(2)?,
                        longest: row.get(3)?,
                        last_practice_at: row.get(4)?,
                    },
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(views)
    }

    fn load(conn: &Connection, skill_id: i64) -> Result<Option<StreakState>> {
        let state = conn
            .query_row(
                "SELECT current_streak, longest_streak, last_practice_at FROM streaks WHERE skill_id = ?1",
                [skill_id],
                |row| {
                    Ok(StreakState {
                        current: row.get(0)?,
                        longest: row.get(1)?,
                        last_practice_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Advance and persist the streak for a new session, inside the caller's
    /// transaction. Always succeeds for a valid skill.
    pub(crate) fn advance_in(
        conn: &Connection,
        skill_id: i64,
        at_ms: i64,
    ) -> Result<StreakState> {
        let prior = Self::load(conn, skill_id)?;
        let next = StreakState::advance(prior.as_ref(), at_ms);

        conn.execute(
            r#"
            INSERT INTO streaks (skill_id, current_streak, longest_streak, last_practice_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(skill_id) DO UPDATE SET
                current_streak = ?2, longest_streak = ?3, last_practice_at = ?4, updated_at = ?5
            "#,
            params![skill_id, next.current, next.longest, next.last_practice_at, now_ms()],
        )?;

        tracing::debug!(skill_id, current = next.current, longest = next.longest, "Streak updated");
        Ok(next)
    }
}
