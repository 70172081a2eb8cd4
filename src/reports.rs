//! Report aggregation - pure read-side queries
//!
//! Computes the distributions and summaries behind the progress report and
//! the dashboard. No mutation; the only failures are upstream reads.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::TrackerDb;
use crate::error::Result;
use crate::models::Proficiency;
use crate::time_bucket::{day_bucket, days_since, now_ms};

/// Overall totals across the whole tracked history
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub total_skills: u64,
    pub total_hours: f64,
    pub total_sessions: u64,
    /// Distinct calendar dates with at least one session
    pub practice_days: u64,
    pub avg_daily_hours: f64,
    pub badges_earned: u64,
    pub unique_badges: u64,
    pub avg_current_streak: f64,
    pub max_current_streak: u32,
    pub avg_longest_streak: f64,
    pub max_longest_streak: u32,
}

/// One row of a category or proficiency hour distribution
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub label: String,
    pub skills: u64,
    pub hours: f64,
    /// Share of all practice hours; 0 when no hours are logged at all
    pub percent: f64,
}

/// One day of the rolling activity histogram
#[derive(Debug, Clone, Serialize)]
pub struct DailyActivity {
    pub day: String,
    pub hours: f64,
    pub sessions: u64,
}

/// Flattened per-skill report row
#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub proficiency: Proficiency,
    pub total_hours: f64,
    pub sessions: u64,
    pub avg_session_hours: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_practiced: Option<i64>,
    /// None means never practiced - reported as a sentinel, not zero
    pub days_since_practice: Option<i64>,
}

/// Per-skill activity inside a rolling window
#[derive(Debug, Clone, Serialize)]
pub struct SkillActivity {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub hours: f64,
    pub sessions: u64,
}

/// Query interface for progress reports
#[derive(Clone)]
pub struct ReportQuery {
    db: TrackerDb,
}

impl ReportQuery {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Overall statistics for the report header
    pub fn overview(&self) -> Result<Overview> {
        let conn = self.db.conn();

        let (total_skills, total_hours): (u64, f64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(total_hours), 0) FROM skills",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        let total_sessions: u64 =
            conn.query_row("SELECT COUNT(*) FROM practice_sessions", [], |r| r.get(0))?;
        let practice_days: u64 = conn.query_row(
            "SELECT COUNT(DISTINCT day_bucket) FROM practice_sessions",
            [],
            |r| r.get(0),
        )?;
        let (badges_earned, unique_badges): (u64, u64) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT badge_id) FROM earned_badges",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        let (avg_current, max_current, avg_longest, max_longest): (f64, u32, f64, u32) = conn
            .query_row(
                "SELECT COALESCE(AVG(current_streak), 0), COALESCE(MAX(current_streak), 0),
                        COALESCE(AVG(longest_streak), 0), COALESCE(MAX(longest_streak), 0)
                 FROM streaks",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )?;

        let avg_daily_hours = if practice_days > 0 {
            total_hours / practice_days as f64
        } else {
            0.0
        };

        Ok(Overview {
            total_skills,
            total_hours,
            total_sessions,
            practice_days,
            avg_daily_hours,
            badges_earned,
            unique_badges,
            avg_current_streak: avg_current,
            max_current_streak: max_current,
            avg_longest_streak: avg_longest,
            max_longest_streak: max_longest,
        })
    }

    /// Hours per category, largest share first
    pub fn category_distribution(&self) -> Result<Vec<Distribution>> {
        let conn = self.db.conn();
        Self::distribution(&conn, "category")
    }

    /// Hours per proficiency level, largest share first
    pub fn proficiency_distribution(&self) -> Result<Vec<Distribution>> {
        let conn = self.db.conn();
        Self::distribution(&conn, "proficiency")
    }

    fn distribution(conn: &Connection, column: &str) -> Result<Vec<Distribution>> {
        let total_hours: f64 = conn.query_row(
            "SELECT COALESCE(SUM(total_hours), 0) FROM skills",
            [],
            |r| r.get(0),
        )?;

        let sql = format!(
            "SELECT {column}, COUNT(*), COALESCE(SUM(total_hours), 0)
             FROM skills GROUP BY {column} ORDER BY SUM(total_hours) DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .map(|(label, skills, hours)| Distribution {
                label,
                skills,
                hours,
                percent: if total_hours > 0.0 {
                    hours / total_hours * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        Ok(rows)
    }

    /// Skill counts for every proficiency level, zero rows included
    pub fn proficiency_counts(&self) -> Result<Vec<(Proficiency, u64)>> {
        let conn = self.db.conn();
        let mut stmt =
            conn.prepare("SELECT proficiency, COUNT(*) FROM skills GROUP BY proficiency")?;
        let counted: Vec<(String, u64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(Proficiency::all()
            .iter()
            .map(|level| {
                let count = counted
                    .iter()
                    .find(|(name, _)| name == level.as_str())
                    .map(|(_, c)| *c)
                    .unwrap_or(0);
                (*level, count)
            })
            .collect())
    }

    /// Daily activity histogram over the last `days` days, newest first
    pub fn recent_activity(&self, days: u32) -> Result<Vec<DailyActivity>> {
        let conn = self.db.conn();
        let cutoff = day_bucket(now_ms() - days as i64 * 24 * 60 * 60 * 1000);

        let mut stmt = conn.prepare(
            "SELECT day_bucket, COALESCE(SUM(duration_hours), 0), COUNT(*)
             FROM practice_sessions WHERE day_bucket >= ?1
             GROUP BY day_bucket ORDER BY day_bucket DESC",
        )?;
        let rows = stmt
            .query_map([cutoff], |row| {
                Ok(DailyActivity {
                    day: row.get(0)?,
                    hours: row.get(1)?,
                    sessions: row.get(2)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    /// One flattened report row per skill, ordered by category then name
    pub fn skill_summaries(&self) -> Result<Vec<SkillSummary>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT s.id, s.name, s.category, s.proficiency, s.total_hours,
                   COUNT(ps.id), s.last_practiced,
                   COALESCE(st.current_streak, 0), COALESCE(st.longest_streak, 0)
            FROM skills s
            LEFT JOIN practice_sessions ps ON s.id = ps.skill_id
            LEFT JOIN streaks st ON s.id = st.skill_id
            GROUP BY s.id
            ORDER BY s.category, s.name
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                let proficiency: String = row.get(3)?;
                let total_hours: f64 = row.get(4)?;
                let sessions: u64 = row.get(5)?;
                let last_practiced: Option<i64> = row.get(6)?;
                Ok(SkillSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    proficiency: Proficiency::from_str(&proficiency).unwrap_or_default(),
                    total_hours,
                    sessions,
                    avg_session_hours: if sessions > 0 {
                        total_hours / sessions as f64
                    } else {
                        0.0
                    },
                    current_streak: row.get(7)?,
                    longest_streak: row.get(8)?,
                    last_practiced,
                    days_since_practice: last_practiced.map(days_since),
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    /// Per-skill hours and session counts inside the last `days` days,
    /// most practiced first. Skills without recent sessions still appear.
    pub fn skill_activity(&self, days: u32) -> Result<Vec<SkillActivity>> {
        let conn = self.db.conn();
        let cutoff = day_bucket(now_ms() - days as i64 * 24 * 60 * 60 * 1000);

        let mut stmt = conn.prepare(
            r#"
            SELECT s.id, s.name, s.category,
                   COALESCE(SUM(ps.duration_hours), 0), COUNT(ps.id)
            FROM skills s
            LEFT JOIN practice_sessions ps
                ON s.id = ps.skill_id AND ps.day_bucket >= ?1
            GROUP BY s.id
            ORDER BY SUM(ps.duration_hours) DESC
            "#,
        )?;
        let rows = stmt
            .query_map([cutoff], |row| {
                Ok(SkillActivity {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    hours: row.get(3)?,
                    sessions: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
