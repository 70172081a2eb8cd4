//! Praxis - skill practice tracker
//!
//! Tracks self-directed skill practice: skills, timestamped practice
//! sessions, consecutive-practice streaks and one-time badges, plus the
//! aggregation queries behind the progress report.
//!
//! The core of the crate is the streak/badge derivation engine. Recording a
//! session runs a fixed pipeline inside one SQLite transaction:
//!
//! ```text
//! session insert -> skill aggregates -> streak update -> badge evaluation
//! ```
//!
//! Badge criteria read post-update streak and hour values, so the order is
//! load-bearing. Everything above this engine (the CLI in `src/main.rs`) is
//! thin glue.
//!
//! # Usage
//!
//! ```ignore
//! let tracker = Tracker::open(&path)?;
//! let skill = tracker.skills().create(&draft)?;
//! let recorded = tracker.recorder().record(skill.id, now_ms, 1.5, "scales")?;
//! for badge in &recorded.new_badges {
//!     println!("earned: {}", badge.name);
//! }
//! ```

pub mod badges;
pub mod db;
pub mod error;
pub mod models;
pub mod recorder;
pub mod reports;
pub mod sessions;
pub mod skills;
pub mod streaks;
pub mod time_bucket;

pub use error::{Error, Result};

use std::path::Path;

use badges::BadgeEngine;
use db::TrackerDb;
use recorder::PracticeRecorder;
use reports::ReportQuery;
use sessions::SessionStore;
use skills::SkillStore;
use streaks::StreakStore;

/// Central handle for the tracker
///
/// Coordinates the stores and engines over one shared database connection.
/// Thread-safe through the internal mutex on that connection; writes to a
/// single skill are serialized by it.
#[derive(Clone)]
pub struct Tracker {
    db: TrackerDb,
}

impl Tracker {
    /// Open the tracker at the default database location (~/.praxis/practice.db)
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            db: TrackerDb::open_default()?,
        })
    }

    /// Open the tracker with a custom database path
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: TrackerDb::open(path)?,
        })
    }

    pub fn skills(&self) -> SkillStore {
        SkillStore::new(self.db.clone())
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.db.clone())
    }

    pub fn streaks(&self) -> StreakStore {
        StreakStore::new(self.db.clone())
    }

    pub fn badges(&self) -> BadgeEngine {
        BadgeEngine::new(self.db.clone())
    }

    pub fn recorder(&self) -> PracticeRecorder {
        PracticeRecorder::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportQuery {
        ReportQuery::new(self.db.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Proficiency, SkillDraft};
    use tempfile::tempdir;

    #[test]
    fn test_tracker_roundtrip() {
        let dir = tempdir().unwrap();
        let tracker = Tracker::open(&dir.path().join("test.db")).unwrap();

        let skill = tracker
            .skills()
            .create(&SkillDraft::new("Guitar", "Music", Proficiency::Beginner, ""))
            .unwrap();

        let recorded = tracker
            .recorder()
            .record(skill.id, 1_700_000_000_000, 1.5, "open chords")
            .unwrap();

        assert_eq!(recorded.streak.current, 1);
        assert_eq!(recorded.session.duration_hours, 1.5);
        // First session always earns the first-practice badge
        assert!(recorded.new_badges.iter().any(|b| b.name == "First Steps"));

        let fetched = tracker.skills().get(skill.id).unwrap();
        assert_eq!(fetched.total_hours, 1.5);
        assert_eq!(fetched.last_practiced, Some(1_700_000_000_000));

        let overview = tracker.reports().overview().unwrap();
        assert_eq!(overview.total_skills, 1);
        assert_eq!(overview.total_sessions, 1);
        assert_eq!(overview.practice_days, 1);
    }
}
