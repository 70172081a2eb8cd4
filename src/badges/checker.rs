//! Badge criteria evaluation
//!
//! Pure predicate checks over practice aggregates. The engine gathers
//! `BadgeInputs` fresh after the streak and hour updates, so the predicates
//! see post-update values.

use super::definitions::BadgeCriteria;
use crate::models::Proficiency;

/// Aggregates a badge evaluation runs against
#[derive(Debug, Clone)]
pub struct BadgeInputs {
    /// Accumulated hours for the triggering skill
    pub total_hours: f64,
    pub proficiency: Proficiency,
    /// Current streak of the triggering skill
    pub current_streak: u32,
    /// Number of skills across the whole system
    pub skills_count: u64,
    /// Sessions logged for the triggering skill
    pub sessions_count: u64,
    /// Distinct calendar dates with at least one session, system-wide
    pub practice_days: u64,
    /// Sum of total_hours over all skills
    pub total_all_hours: f64,
}

/// Check whether a single criteria is satisfied
pub fn satisfied(criteria: BadgeCriteria, inputs: &BadgeInputs) -> bool {
    match criteria {
        BadgeCriteria::FirstPractice => inputs.sessions_count >= 1,
        BadgeCriteria::SevenDayStreak => inputs.current_streak >= 7,
        BadgeCriteria::ThirtyDayStreak => inputs.current_streak >= 30,
        BadgeCriteria::HundredDayStreak => inputs.current_streak >= 100,
        BadgeCriteria::TenHours => inputs.total_hours >= 10.0,
        BadgeCriteria::HundredHours => inputs.total_hours >= 100.0,
        BadgeCriteria::ExpertLevel => inputs.proficiency == Proficiency::Expert,
        BadgeCriteria::FiveSkills => inputs.skills_count >= 5,
        BadgeCriteria::TenSkills => inputs.skills_count >= 10,
        BadgeCriteria::TwentyFiveSkills => inputs.skills_count >= 25,
        BadgeCriteria::YearOfPractice => inputs.practice_days >= 365,
        BadgeCriteria::ThousandHours => inputs.total_all_hours >= 1000.0,
    }
}

/// All criteria satisfied by the given inputs, in catalog order
pub fn satisfied_criteria(inputs: &BadgeInputs) -> Vec<BadgeCriteria> {
    BadgeCriteria::all()
        .iter()
        .copied()
        .filter(|c| satisfied(*c, inputs))
        .collect()
}
