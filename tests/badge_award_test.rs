//! Integration tests for badge evaluation and award scoping

use tempfile::TempDir;

use praxis::Tracker;
use praxis::models::{Proficiency, SkillDraft};

const HOUR_MS: i64 = 60 * 60 * 1000;
const BASE_TS: i64 = 1_700_000_000_000;

fn open_tracker() -> (TempDir, Tracker) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = Tracker::open(&dir.path().join("test.db")).expect("Failed to open tracker");
    (dir, tracker)
}

fn add_skill(tracker: &Tracker, name: &str, proficiency: Proficiency) -> i64 {
    tracker
        .skills()
        .create(&SkillDraft::new(name, "General", proficiency, ""))
        .expect("Failed to create skill")
        .id
}

#[test]
fn catalog_is_fixed_at_twelve() {
    let (_dir, tracker) = open_tracker();
    let catalog = tracker.badges().catalog().unwrap();
    assert_eq!(catalog.len(), 12);
    assert!(catalog.iter().any(|b| b.name == "Master Craftsman"));
}

#[test]
fn evaluation_is_idempotent() {
    let (_dir, tracker) = open_tracker();
    let skill_id = add_skill(&tracker, "Guitar", Proficiency::Beginner);

    let recorded = tracker.recorder().record(skill_id, BASE_TS, 1.0, "").unwrap();
    assert!(!recorded.new_badges.is_empty());

    // Re-running evaluation with unchanged inputs awards nothing further
    let again = tracker.badges().evaluate(skill_id).unwrap();
    assert!(again.is_empty(), "second evaluation must award nothing");

    let once_more = tracker.badges().evaluate(skill_id).unwrap();
    assert!(once_more.is_empty());
}

#[test]
fn fifth_skill_awards_global_badge_once_with_no_skill_reference() {
    let (_dir, tracker) = open_tracker();
    let mut ids = Vec::new();
    for name in ["Guitar", "Chess", "Spanish", "Cooking"] {
        ids.push(add_skill(&tracker, name, Proficiency::Beginner));
    }

    // Sessions on the first four skills: 5_skills is not yet satisfied
    for (i, id) in ids.iter().enumerate() {
        let recorded = tracker
            .recorder()
            .record(*id, BASE_TS + i as i64 * HOUR_MS, 1.0, "")
            .unwrap();
        assert!(recorded.new_badges.iter().all(|b| b.name != "Jack of All Trades"));
    }

    // Creating skill #5 and logging any session on it crosses the threshold
    let fifth = add_skill(&tracker, "Juggling", Proficiency::Beginner);
    let recorded = tracker
        .recorder()
        .record(fifth, BASE_TS + 10 * HOUR_MS, 1.0, "")
        .unwrap();
    assert!(recorded.new_badges.iter().any(|b| b.name == "Jack of All Trades"));

    // Stored globally: no skill attribution, even though skill #5 triggered it
    let earned = tracker.badges().earned(None).unwrap();
    let global: Vec<_> = earned
        .iter()
        .filter(|v| v.badge.name == "Jack of All Trades")
        .collect();
    assert_eq!(global.len(), 1);
    assert!(global[0].skill_id.is_none());
    assert!(global[0].skill_name.is_none());

    // A sixth skill's session re-triggers evaluation but must not re-award
    let sixth = add_skill(&tracker, "Photography", Proficiency::Beginner);
    let recorded = tracker
        .recorder()
        .record(sixth, BASE_TS + 11 * HOUR_MS, 1.0, "")
        .unwrap();
    assert!(recorded.new_badges.iter().all(|b| b.name != "Jack of All Trades"));

    let earned = tracker.badges().earned(None).unwrap();
    let count = earned
        .iter()
        .filter(|v| v.badge.name == "Jack of All Trades")
        .count();
    assert_eq!(count, 1, "global badge must exist exactly once");
}

#[test]
fn skill_scoped_badges_are_earned_per_skill() {
    let (_dir, tracker) = open_tracker();
    let guitar = add_skill(&tracker, "Guitar", Proficiency::Beginner);
    let chess = add_skill(&tracker, "Chess", Proficiency::Beginner);

    tracker.recorder().record(guitar, BASE_TS, 1.0, "").unwrap();
    let recorded = tracker
        .recorder()
        .record(chess, BASE_TS + HOUR_MS, 1.0, "")
        .unwrap();

    // Each skill earns its own first-practice badge
    assert!(recorded.new_badges.iter().any(|b| b.name == "First Steps"));

    let earned = tracker.badges().earned(None).unwrap();
    let first_steps: Vec<_> = earned
        .iter()
        .filter(|v| v.badge.name == "First Steps")
        .collect();
    assert_eq!(first_steps.len(), 2);
    assert!(first_steps.iter().any(|v| v.skill_id == Some(guitar)));
    assert!(first_steps.iter().any(|v| v.skill_id == Some(chess)));
}

#[test]
fn earned_listing_filters_skill_scope_but_keeps_global() {
    let (_dir, tracker) = open_tracker();
    let mut ids = Vec::new();
    for name in ["Guitar", "Chess", "Spanish", "Cooking", "Juggling"] {
        ids.push(add_skill(&tracker, name, Proficiency::Beginner));
    }
    for (i, id) in ids.iter().enumerate() {
        tracker
            .recorder()
            .record(*id, BASE_TS + i as i64 * HOUR_MS, 1.0, "")
            .unwrap();
    }

    let guitar = ids[0];
    let guitar_view = tracker.badges().earned(Some(guitar)).unwrap();
    // Guitar's own first-practice badge is present
    assert!(
        guitar_view
            .iter()
            .any(|v| v.badge.name == "First Steps" && v.skill_id == Some(guitar))
    );
    // Other skills' first-practice badges are filtered out
    assert!(
        guitar_view
            .iter()
            .all(|v| v.skill_id.is_none() || v.skill_id == Some(guitar))
    );
    // The global 5-skills badge is always included
    assert!(guitar_view.iter().any(|v| v.badge.name == "Jack of All Trades"));
}

#[test]
fn ten_hours_badge_requires_accumulated_hours() {
    let (_dir, tracker) = open_tracker();
    let skill_id = add_skill(&tracker, "Guitar", Proficiency::Beginner);

    let recorded = tracker.recorder().record(skill_id, BASE_TS, 9.5, "").unwrap();
    assert!(recorded.new_badges.iter().all(|b| b.name != "Hour Master"));

    let recorded = tracker
        .recorder()
        .record(skill_id, BASE_TS + HOUR_MS, 0.5, "")
        .unwrap();
    assert!(
        recorded.new_badges.iter().any(|b| b.name == "Hour Master"),
        "10 accumulated hours must award the badge"
    );
}

#[test]
fn expert_proficiency_awards_on_next_evaluation() {
    let (_dir, tracker) = open_tracker();
    let skill_id = add_skill(&tracker, "Guitar", Proficiency::Advanced);

    let recorded = tracker.recorder().record(skill_id, BASE_TS, 1.0, "").unwrap();
    assert!(recorded.new_badges.iter().all(|b| b.name != "Expert"));

    tracker
        .skills()
        .update(
            skill_id,
            &SkillDraft::new("Guitar", "General", Proficiency::Expert, ""),
        )
        .unwrap();

    let awarded = tracker.badges().evaluate(skill_id).unwrap();
    assert!(awarded.iter().any(|b| b.name == "Expert"));
}

#[test]
fn badges_survive_streak_reset() {
    let (_dir, tracker) = open_tracker();
    let skill_id = add_skill(&tracker, "Guitar", Proficiency::Beginner);

    for i in 0..7i64 {
        tracker
            .recorder()
            .record(skill_id, BASE_TS + i * 24 * HOUR_MS, 1.0, "")
            .unwrap();
    }
    let earned = tracker.badges().earned(Some(skill_id)).unwrap();
    assert!(earned.iter().any(|v| v.badge.name == "Consistent Learner"));

    // Streak collapses after a long gap; the badge is not revoked
    let recorded = tracker
        .recorder()
        .record(skill_id, BASE_TS + 60 * 24 * HOUR_MS, 1.0, "")
        .unwrap();
    assert_eq!(recorded.streak.current, 1);

    let earned = tracker.badges().earned(Some(skill_id)).unwrap();
    assert!(
        earned.iter().any(|v| v.badge.name == "Consistent Learner"),
        "badges are never revoked"
    );
}
