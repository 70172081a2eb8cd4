//! Practice logging and streak commands

use anyhow::Result;

use praxis::Tracker;
use praxis::time_bucket::{now_ms, parse_timestamp};

use super::format_ts;

/// Log a practice session and report what it triggered
pub fn log_command(
    tracker: &Tracker,
    skill_id: i64,
    hours: f64,
    at: Option<&str>,
    notes: &str,
) -> Result<()> {
    let practiced_at = match at {
        Some(s) => parse_timestamp(s)?,
        None => now_ms(),
    };

    let recorded = tracker.recorder().record(skill_id, practiced_at, hours, notes)?;
    let skill = tracker.skills().get(skill_id)?;

    println!(
        "Logged {:.1}h of {} ({} total)",
        recorded.session.duration_hours, skill.name, format_hours(skill.total_hours)
    );
    println!(
        "Streak: {} day{} (longest {})",
        recorded.streak.current,
        if recorded.streak.current == 1 { "" } else { "s" },
        recorded.streak.longest
    );
    for badge in &recorded.new_badges {
        println!("New badge: {} - {}", badge.name, badge.description);
    }
    Ok(())
}

/// Show streaks for one skill or for all of them
pub fn streaks_command(tracker: &Tracker, skill_id: Option<i64>, json: bool) -> Result<()> {
    if let Some(id) = skill_id {
        let state = tracker.streaks().get(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }
        let skill = tracker.skills().get(id)?;
        println!(
            "{}: current {} / longest {}, last practiced {}",
            skill.name,
            state.current,
            state.longest,
            state
                .last_practice_at
                .map(format_ts)
                .unwrap_or_else(|| "never".into()),
        );
        return Ok(());
    }

    let views = tracker.streaks().all()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }
    if views.is_empty() {
        println!("No skills yet.");
        return Ok(());
    }
    for view in views {
        println!(
            "  #{} {} - current {} / longest {}",
            view.skill_id, view.skill_name, view.state.current, view.state.longest
        );
    }
    Ok(())
}

/// Show recent sessions across all skills
pub fn history_command(tracker: &Tracker, limit: usize) -> Result<()> {
    let sessions = tracker.sessions().recent(limit)?;
    if sessions.is_empty() {
        println!("No practice sessions yet.");
        return Ok(());
    }
    for s in sessions {
        println!(
            "  {} - {} {:.1}h {}",
            format_ts(s.practiced_at),
            s.skill_name,
            s.duration_hours,
            s.notes
        );
    }
    Ok(())
}

fn format_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}
