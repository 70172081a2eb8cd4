//! Integration tests for skill deletion cascades

use tempfile::TempDir;

use praxis::Tracker;
use praxis::error::Error;
use praxis::models::{Proficiency, SkillDraft};

const HOUR_MS: i64 = 60 * 60 * 1000;
const BASE_TS: i64 = 1_700_000_000_000;

fn open_tracker() -> (TempDir, Tracker) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = Tracker::open(&dir.path().join("test.db")).expect("Failed to open tracker");
    (dir, tracker)
}

fn add_skill(tracker: &Tracker, name: &str) -> i64 {
    tracker
        .skills()
        .create(&SkillDraft::new(name, "General", Proficiency::Beginner, ""))
        .expect("Failed to create skill")
        .id
}

#[test]
fn delete_cascades_to_sessions_streak_and_skill_badges() {
    let (_dir, tracker) = open_tracker();

    // Five skills so the global 5_skills badge gets earned too
    let mut ids = Vec::new();
    for name in ["Guitar", "Chess", "Spanish", "Cooking", "Juggling"] {
        ids.push(add_skill(&tracker, name));
    }
    for (i, id) in ids.iter().enumerate() {
        tracker
            .recorder()
            .record(*id, BASE_TS + i as i64 * HOUR_MS, 1.0, "")
            .unwrap();
    }
    let victim = ids[0];
    assert!(!tracker.sessions().for_skill(victim).unwrap().is_empty());

    tracker.skills().delete(victim).unwrap();

    // The skill and everything it owned is gone
    assert!(matches!(
        tracker.skills().get(victim).unwrap_err(),
        Error::NotFound { .. }
    ));
    assert!(tracker.sessions().for_skill(victim).unwrap().is_empty());
    assert!(matches!(
        tracker.streaks().get(victim).unwrap_err(),
        Error::NotFound { .. }
    ));

    let earned = tracker.badges().earned(None).unwrap();
    assert!(
        earned.iter().all(|v| v.skill_id != Some(victim)),
        "skill-scoped awards must be removed with the skill"
    );
    // Globally scoped awards survive the cascade
    assert!(earned.iter().any(|v| v.badge.name == "Jack of All Trades"));
}

#[test]
fn delete_unknown_skill_is_not_found() {
    let (_dir, tracker) = open_tracker();
    assert!(matches!(
        tracker.skills().delete(42).unwrap_err(),
        Error::NotFound { .. }
    ));
}

#[test]
fn overview_reflects_cascade() {
    let (_dir, tracker) = open_tracker();
    let keep = add_skill(&tracker, "Guitar");
    let drop = add_skill(&tracker, "Chess");

    tracker.recorder().record(keep, BASE_TS, 2.0, "").unwrap();
    tracker.recorder().record(drop, BASE_TS + HOUR_MS, 3.0, "").unwrap();

    tracker.skills().delete(drop).unwrap();

    let overview = tracker.reports().overview().unwrap();
    assert_eq!(overview.total_skills, 1);
    assert_eq!(overview.total_sessions, 1);
    assert_eq!(overview.total_hours, 2.0);
}
