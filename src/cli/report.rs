//! Progress report (CSV) and dashboard commands

use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use praxis::Tracker;

use super::format_ts;

/// Build the full progress report and write it as CSV
pub fn report_command(tracker: &Tracker, output: Option<&Path>) -> Result<()> {
    let csv = build_report_csv(tracker)?;
    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("Report written to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

fn build_report_csv(tracker: &Tracker) -> Result<String> {
    let reports = tracker.reports();
    let overview = reports.overview()?;
    let mut lines: Vec<String> = Vec::new();

    lines.push("SKILL TRACKER - COMPREHENSIVE PROGRESS REPORT".to_string());
    lines.push(format!(
        "Generated on,{}",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push("Report Period,All Time".to_string());
    lines.push(String::new());

    lines.push("OVERALL STATISTICS".to_string());
    lines.push(format!("Total Skills,{}", overview.total_skills));
    lines.push(format!("Total Practice Hours,{:.2}", overview.total_hours));
    lines.push(format!("Total Practice Sessions,{}", overview.total_sessions));
    lines.push(format!("Total Practice Days,{}", overview.practice_days));
    lines.push(format!(
        "Average Daily Practice (hours),{:.2}",
        overview.avg_daily_hours
    ));
    lines.push(format!(
        "Badges Earned,{} ({} unique)",
        overview.badges_earned, overview.unique_badges
    ));
    lines.push(format!(
        "Current Streak (avg/max),{:.1} / {}",
        overview.avg_current_streak, overview.max_current_streak
    ));
    lines.push(format!(
        "Longest Streak (avg/max),{:.1} / {}",
        overview.avg_longest_streak, overview.max_longest_streak
    ));
    lines.push(String::new());

    lines.push("CATEGORY DISTRIBUTION".to_string());
    lines.push("Category,Skills,Hours,Percentage".to_string());
    for row in reports.category_distribution()? {
        lines.push(format!(
            "{},{},{:.2},{:.1}%",
            csv_escape(&row.label),
            row.skills,
            row.hours,
            row.percent
        ));
    }
    lines.push(String::new());

    lines.push("PROFICIENCY DISTRIBUTION".to_string());
    lines.push("Proficiency,Skills,Hours,Percentage".to_string());
    for row in reports.proficiency_distribution()? {
        lines.push(format!(
            "{},{},{:.2},{:.1}%",
            csv_escape(&row.label),
            row.skills,
            row.hours,
            row.percent
        ));
    }
    lines.push(String::new());

    lines.push("SKILLS SUMMARY".to_string());
    lines.push(
        "Name,Category,Proficiency,Total Hours,Sessions,Avg Session,Current Streak,Longest Streak,Last Practiced,Days Since Practice"
            .to_string(),
    );
    for row in reports.skill_summaries()? {
        lines.push(format!(
            "{},{},{},{:.2},{},{:.2},{},{},{},{}",
            csv_escape(&row.name),
            csv_escape(&row.category),
            row.proficiency.as_str(),
            row.total_hours,
            row.sessions,
            row.avg_session_hours,
            row.current_streak,
            row.longest_streak,
            row.last_practiced
                .map(format_ts)
                .unwrap_or_else(|| "Never".into()),
            row.days_since_practice
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".into()),
        ));
    }
    lines.push(String::new());

    lines.push("RECENT ACTIVITY (LAST 30 DAYS)".to_string());
    lines.push("Date,Total Hours,Sessions".to_string());
    for day in reports.recent_activity(30)? {
        lines.push(format!("{},{:.2},{}", day.day, day.hours, day.sessions));
    }
    lines.push(String::new());

    lines.push("BADGES EARNED".to_string());
    lines.push("Badge Name,Description,Earned Date,Related Skill,Rarity".to_string());
    for view in tracker.badges().earned(None)? {
        lines.push(format!(
            "{},{},{},{},{}",
            csv_escape(&view.badge.name),
            csv_escape(&view.badge.description),
            format_ts(view.earned_at),
            csv_escape(view.skill_name.as_deref().unwrap_or("General")),
            view.badge.rarity.as_str(),
        ));
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}

/// Show a terminal dashboard of proficiency counts and recent activity
pub fn dashboard_command(tracker: &Tracker) -> Result<()> {
    let reports = tracker.reports();
    let overview = reports.overview()?;

    println!(
        "{} skills, {:.1} hours practiced over {} days\n",
        overview.total_skills, overview.total_hours, overview.practice_days
    );

    println!("Proficiency:");
    for (level, count) in reports.proficiency_counts()? {
        println!("  {:<12} {}", level.as_str(), count);
    }

    println!("\nLast 30 days:");
    let activity = reports.skill_activity(30)?;
    if activity.iter().all(|a| a.sessions == 0) {
        println!("  No practice logged.");
        return Ok(());
    }
    for row in activity {
        if row.sessions > 0 {
            println!(
                "  {:<20} {:>6.1}h over {} session{}",
                row.name,
                row.hours,
                row.sessions,
                if row.sessions == 1 { "" } else { "s" }
            );
        }
    }
    Ok(())
}

/// Quote a CSV field when it contains separators or quotes
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
