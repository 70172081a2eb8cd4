//! CLI command implementations

pub mod badges;
pub mod practice;
pub mod report;
pub mod skill;

use chrono::DateTime;
use praxis::models::Proficiency;

/// Format a stored timestamp for table output
pub fn format_ts(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Parse a proficiency argument, case-insensitively
pub fn parse_proficiency(s: &str) -> anyhow::Result<Proficiency> {
    let normalized = {
        let lower = s.trim().to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    Proficiency::from_str(&normalized).ok_or_else(|| {
        anyhow::anyhow!("Unknown proficiency: {s} (use beginner/intermediate/advanced/expert)")
    })
}
