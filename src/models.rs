//! Data models for skills and practice sessions
//!
//! These structures represent the data stored in and queried from the
//! tracker database. Timestamps are Unix epoch milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Proficiency level of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            "Expert" => Some(Self::Expert),
            _ => None,
        }
    }

    /// All levels, lowest first (zero rows in distributions are reported too)
    pub fn all() -> &'static [Proficiency] {
        &[
            Self::Beginner,
            Self::Intermediate,
            Self::Advanced,
            Self::Expert,
        ]
    }
}

/// A tracked skill with its practice aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub proficiency: Proficiency,
    pub notes: String,
    /// Accumulated practice hours; only ever increased by session recording
    pub total_hours: f64,
    /// Timestamp of the most recent practice session (ms), if any
    pub last_practiced: Option<i64>,
    pub created_at: i64,
}

/// Input for creating or updating a skill
#[derive(Debug, Clone)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub proficiency: Proficiency,
    pub notes: String,
}

impl SkillDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        proficiency: Proficiency,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            proficiency,
            notes: notes.into(),
        }
    }

    /// Validate user-supplied fields before they touch the database
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(Error::validation("Please fill in all required fields"));
        }
        if is_numeric_string(&self.name) {
            return Err(Error::validation("Skill name must be text, not a number"));
        }
        if is_numeric_string(&self.category) {
            return Err(Error::validation("Category must be text, not a number"));
        }
        Ok(())
    }
}

/// Check if a string is just a number (rejected for text fields)
fn is_numeric_string(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// A single logged practice session. Append-only; never mutated, deleted
/// only when the owning skill is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: i64,
    pub skill_id: i64,
    /// When the practice happened (ms)
    pub practiced_at: i64,
    /// Day bucket of `practiced_at` ("YYYY-MM-DD")
    pub day_bucket: String,
    pub duration_hours: f64,
    pub notes: String,
}

/// A practice session joined with its skill name, for history views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSessionView {
    pub id: i64,
    pub skill_id: i64,
    pub skill_name: String,
    pub practiced_at: i64,
    pub duration_hours: f64,
    pub notes: String,
}
