//! Practice recorder - the session ingestion boundary
//!
//! Records one practice session as a single unit of work: append to the
//! session log, fold hours into the skill aggregates, advance the streak,
//! then evaluate badges - in that fixed order, since badge criteria read the
//! post-update streak and hour values. All four steps run inside one SQLite
//! transaction: if any step fails nothing is applied, and no retry is
//! attempted.

use serde::Serialize;

use crate::badges::{Badge, BadgeEngine};
use crate::db::TrackerDb;
use crate::error::{Error, Result};
use crate::models::PracticeSession;
use crate::sessions::SessionStore;
use crate::skills::SkillStore;
use crate::streaks::{StreakState, StreakStore};

/// Everything that came out of recording one session
#[derive(Debug, Clone, Serialize)]
pub struct RecordedPractice {
    pub session: PracticeSession,
    pub streak: StreakState,
    /// Badges newly awarded by this session, in catalog order
    pub new_badges: Vec<Badge>,
}

/// Records practice sessions and drives the streak and badge engines
#[derive(Clone)]
pub struct PracticeRecorder {
    db: TrackerDb,
}

impl PracticeRecorder {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Record a practice session for a skill.
    ///
    /// Fails with `Error::Validation` for a non-positive duration and with
    /// `Error::NotFound` for an unknown skill; storage failures roll the
    /// whole unit back.
    pub fn record(
        &self,
        skill_id: i64,
        practiced_at: i64,
        duration_hours: f64,
        notes: &str,
    ) -> Result<RecordedPractice> {
        if !duration_hours.is_finite() || duration_hours <= 0.0 {
            return Err(Error::validation("Duration must be a positive number"));
        }

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        // Unknown skill aborts before anything is written
        SkillStore::get_in(&tx, skill_id)?;

        let session = SessionStore::insert_in(&tx, skill_id, practiced_at, duration_hours, notes)?;
        SkillStore::apply_practice_in(&tx, skill_id, duration_hours, practiced_at)?;
        let streak = StreakStore::advance_in(&tx, skill_id, practiced_at)?;
        let new_badges = BadgeEngine::evaluate_in(&tx, skill_id)?;

        tx.commit()?;

        tracing::debug!(
            skill_id,
            session_id = session.id,
            streak = streak.current,
            badges = new_badges.len(),
            "Practice session recorded"
        );

        Ok(RecordedPractice {
            session,
            streak,
            new_badges,
        })
    }
}
