//! Integration tests for the report aggregator

use tempfile::TempDir;

use praxis::Tracker;
use praxis::models::{Proficiency, SkillDraft};
use praxis::time_bucket::now_ms;

const HOUR_MS: i64 = 60 * 60 * 1000;

fn open_tracker() -> (TempDir, Tracker) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let tracker = Tracker::open(&dir.path().join("test.db")).expect("Failed to open tracker");
    (dir, tracker)
}

fn add_skill(tracker: &Tracker, name: &str, category: &str, proficiency: Proficiency) -> i64 {
    tracker
        .skills()
        .create(&SkillDraft::new(name, category, proficiency, ""))
        .expect("Failed to create skill")
        .id
}

#[test]
fn distributions_share_out_hours() {
    let (_dir, tracker) = open_tracker();
    let guitar = add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);
    let piano = add_skill(&tracker, "Piano", "Music", Proficiency::Intermediate);
    let chess = add_skill(&tracker, "Chess", "Games", Proficiency::Beginner);

    let base = now_ms() - 24 * HOUR_MS;
    tracker.recorder().record(guitar, base, 3.0, "").unwrap();
    tracker.recorder().record(piano, base + HOUR_MS, 1.0, "").unwrap();
    tracker.recorder().record(chess, base + 2 * HOUR_MS, 4.0, "").unwrap();

    let categories = tracker.reports().category_distribution().unwrap();
    assert_eq!(categories.len(), 2);

    let music = categories.iter().find(|d| d.label == "Music").unwrap();
    assert_eq!(music.skills, 2);
    assert!((music.hours - 4.0).abs() < 1e-9);
    assert!((music.percent - 50.0).abs() < 1e-9);

    let games = categories.iter().find(|d| d.label == "Games").unwrap();
    assert!((games.percent - 50.0).abs() < 1e-9);
}

#[test]
fn empty_tracker_reports_zero_percentages() {
    let (_dir, tracker) = open_tracker();
    add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);

    // A skill with no hours yet: percentage guards against division by zero
    let categories = tracker.reports().category_distribution().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].percent, 0.0);

    let overview = tracker.reports().overview().unwrap();
    assert_eq!(overview.avg_daily_hours, 0.0);
}

#[test]
fn proficiency_counts_include_zero_levels() {
    let (_dir, tracker) = open_tracker();
    add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);
    add_skill(&tracker, "Piano", "Music", Proficiency::Beginner);
    add_skill(&tracker, "Chess", "Games", Proficiency::Expert);

    let counts = tracker.reports().proficiency_counts().unwrap();
    assert_eq!(counts.len(), 4);
    assert_eq!(
        counts,
        vec![
            (Proficiency::Beginner, 2),
            (Proficiency::Intermediate, 0),
            (Proficiency::Advanced, 0),
            (Proficiency::Expert, 1),
        ]
    );
}

#[test]
fn skill_summaries_use_sentinel_for_never_practiced() {
    let (_dir, tracker) = open_tracker();
    let practiced = add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);
    add_skill(&tracker, "Chess", "Games", Proficiency::Beginner);

    tracker
        .recorder()
        .record(practiced, now_ms() - 48 * HOUR_MS, 2.0, "")
        .unwrap();

    let summaries = tracker.reports().skill_summaries().unwrap();
    assert_eq!(summaries.len(), 2);

    let chess = summaries.iter().find(|s| s.name == "Chess").unwrap();
    assert!(chess.days_since_practice.is_none(), "never practiced is None, not 0");
    assert_eq!(chess.sessions, 0);
    assert_eq!(chess.avg_session_hours, 0.0);

    let guitar = summaries.iter().find(|s| s.name == "Guitar").unwrap();
    assert_eq!(guitar.days_since_practice, Some(2));
    assert_eq!(guitar.sessions, 1);
    assert!((guitar.avg_session_hours - 2.0).abs() < 1e-9);
}

#[test]
fn recent_activity_buckets_by_day() {
    let (_dir, tracker) = open_tracker();
    let skill = add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);

    // Pin sessions to 06:00 UTC two days ago so the +1h session shares the
    // day bucket and the +26h session lands on the next day
    let base = chrono::Utc::now()
        .date_naive()
        .and_hms_opt(6, 0, 0)
        .expect("valid time")
        .and_utc()
        .timestamp_millis()
        - 2 * 24 * HOUR_MS;
    tracker.recorder().record(skill, base, 1.0, "").unwrap();
    tracker.recorder().record(skill, base + HOUR_MS, 0.5, "").unwrap();
    tracker.recorder().record(skill, base + 26 * HOUR_MS, 2.0, "").unwrap();

    let activity = tracker.reports().recent_activity(30).unwrap();
    assert_eq!(activity.len(), 2);
    // Newest day first
    assert!(activity[0].day > activity[1].day);
    assert_eq!(activity[1].sessions, 2);
    assert!((activity[1].hours - 1.5).abs() < 1e-9);
}

#[test]
fn skill_activity_window_excludes_old_sessions() {
    let (_dir, tracker) = open_tracker();
    let skill = add_skill(&tracker, "Guitar", "Music", Proficiency::Beginner);

    // One session far outside the 30-day window, one inside
    tracker
        .recorder()
        .record(skill, now_ms() - 90 * 24 * HOUR_MS, 5.0, "")
        .unwrap();
    tracker
        .recorder()
        .record(skill, now_ms() - 24 * HOUR_MS, 1.0, "")
        .unwrap();

    let activity = tracker.reports().skill_activity(30).unwrap();
    let guitar = activity.iter().find(|a| a.name == "Guitar").unwrap();
    assert_eq!(guitar.sessions, 1);
    assert!((guitar.hours - 1.0).abs() < 1e-9);
}
