//! Badge engine - evaluation and one-time awards
//!
//! Gathers aggregates fresh at evaluation time, checks the fixed criteria
//! catalog and inserts awards for anything newly satisfied. Awards are
//! never revoked, even when the triggering condition later becomes false.

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use super::checker::{self, BadgeInputs};
use super::definitions::{BadgeCriteria, BadgeScope, Rarity};
use crate::db::TrackerDb;
use crate::error::{Error, Result};
use crate::models::Proficiency;
use crate::time_bucket::now_ms;

/// A badge from the seeded catalog
#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_criteria")]
    pub criteria: BadgeCriteria,
    pub icon: String,
    pub rarity: Rarity,
}

fn serialize_criteria<S: serde::Serializer>(
    c: &BadgeCriteria,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(c.as_str())
}

/// An earned badge joined with its catalog entry and skill attribution
#[derive(Debug, Clone, Serialize)]
pub struct EarnedBadgeView {
    pub badge: Badge,
    /// Absent for globally scoped awards
    pub skill_id: Option<i64>,
    pub skill_name: Option<String>,
    pub earned_at: i64,
}

/// Evaluates badge criteria and records awards
#[derive(Clone)]
pub struct BadgeEngine {
    db: TrackerDb,
}

impl BadgeEngine {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// The fixed badge catalog, in seeding order
    pub fn catalog(&self) -> Result<Vec<Badge>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, criteria, icon, rarity FROM badges ORDER BY id",
        )?;
        let badges = stmt
            .query_map([], badge_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(badges)
    }

    /// Earned badges, newest first. With a skill given, skill-scoped awards
    /// are filtered to that skill; global awards are always included.
    pub fn earned(&self, skill_id: Option<i64>) -> Result<Vec<EarnedBadgeView>> {
        let conn = self.db.conn();
        let sql_base = r#"
            SELECT b.id, b.name, b.description, b.criteria, b.icon, b.rarity,
                   eb.skill_id, s.name, eb.earned_at
            FROM earned_badges eb
            JOIN badges b ON eb.badge_id = b.id
            LEFT JOIN skills s ON eb.skill_id = s.id
        "#;

        let map = |row: &rusqlite::Row<'_>| {
            Ok(EarnedBadgeView {
                badge: badge_from_row(row)?,
                skill_id: row.get(6)?,
                skill_name: row.get(7)?,
                earned_at: row.get(8)?,
            })
        };

        let views = if let Some(id) = skill_id {
            let sql = format!(
                "{sql_base} WHERE eb.skill_id = ?1 OR eb.skill_id IS NULL ORDER BY eb.earned_at DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([id], map)?;
            rows.filter_map(|r| r.ok()).collect()
        } else {
            let sql = format!("{sql_base} ORDER BY eb.earned_at DESC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map)?;
            rows.filter_map(|r| r.ok()).collect()
        };
        Ok(views)
    }

    /// Evaluate all criteria for a skill and award anything newly satisfied.
    ///
    /// Idempotent: repeated calls with unchanged inputs award nothing further.
    pub fn evaluate(&self, skill_id: i64) -> Result<Vec<Badge>> {
        let conn = self.db.conn();
        Self::evaluate_in(&conn, skill_id)
    }

    /// Evaluation inside the caller's connection or transaction.
    /// Used by the recorder so awards commit atomically with the session.
    pub(crate) fn evaluate_in(conn: &Connection, skill_id: i64) -> Result<Vec<Badge>> {
        let inputs = Self::gather_inputs(conn, skill_id)?;
        let mut awarded = Vec::new();

        for criteria in checker::satisfied_criteria(&inputs) {
            let Some(badge) = Self::badge_for_criteria(conn, criteria)? else {
                tracing::warn!("No catalog entry for criteria {}", criteria.as_str());
                continue;
            };

            // Explicit two-case uniqueness lookup: skill-scoped awards key on
            // (badge_id, skill_id); global awards key on (badge_id, NULL).
            let owner = match criteria.scope() {
                BadgeScope::Skill => Some(skill_id),
                BadgeScope::Global => None,
            };
            if Self::already_earned(conn, badge.id, owner)? {
                continue;
            }

            conn.execute(
                "INSERT INTO earned_badges (badge_id, skill_id, earned_at) VALUES (?1, ?2, ?3)",
                params![badge.id, owner, now_ms()],
            )?;
            tracing::info!(badge = badge.name.as_str(), skill_id, "Badge awarded");
            awarded.push(badge);
        }

        Ok(awarded)
    }

    /// Gather evaluation inputs, post streak/hours update
    fn gather_inputs(conn: &Connection, skill_id: i64) -> Result<BadgeInputs> {
        let skill: Option<(f64, String)> = conn
            .query_row(
                "SELECT total_hours, proficiency FROM skills WHERE id = ?1",
                [skill_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        let Some((total_hours, proficiency)) = skill else {
            return Err(Error::not_found("skill", skill_id));
        };

        let current_streak: u32 = conn
            .query_row(
                "SELECT current_streak FROM streaks WHERE skill_id = ?1",
                [skill_id],
                |r| r.get(0),
            )
            .optional()?
            .unwrap_or(0);

        let skills_count: u64 = conn.query_row("SELECT COUNT(*) FROM skills", [], |r| r.get(0))?;

        let sessions_count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM practice_sessions WHERE skill_id = ?1",
            [skill_id],
            |r| r.get(0),
        )?;

        let practice_days: u64 = conn.query_row(
            "SELECT COUNT(DISTINCT day_bucket) FROM practice_sessions",
            [],
            |r| r.get(0),
        )?;

        let total_all_hours: f64 = conn.query_row(
            "SELECT COALESCE(SUM(total_hours), 0) FROM skills",
            [],
            |r| r.get(0),
        )?;

        Ok(BadgeInputs {
            total_hours,
            proficiency: Proficiency::from_str(&proficiency).unwrap_or_default(),
            current_streak,
            skills_count,
            sessions_count,
            practice_days,
            total_all_hours,
        })
    }

    fn badge_for_criteria(conn: &Connection, criteria: BadgeCriteria) -> Result<Option<Badge>> {
        let badge = conn
            .query_row(
                "SELECT id, name, description, criteria, icon, rarity FROM badges WHERE criteria = ?1",
                [criteria.as_str()],
                badge_from_row,
            )
            .optional()?;
        Ok(badge)
    }

    fn already_earned(conn: &Connection, badge_id: i64, skill_id: Option<i64>) -> Result<bool> {
        let found: Option<i64> = match skill_id {
            Some(id) => conn
                .query_row(
                    "SELECT 1 FROM earned_badges WHERE badge_id = ?1 AND skill_id = ?2",
                    params![badge_id, id],
                    |r| r.get(0),
                )
                .optional()?,
            None => conn
                .query_row(
                    "SELECT 1 FROM earned_badges WHERE badge_id = ?1 AND skill_id IS NULL",
                    [badge_id],
                    |r| r.get(0),
                )
                .optional()?,
        };
        Ok(found.is_some())
    }
}

fn badge_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Badge> {
    let criteria: String = row.get(3)?;
    let rarity: String = row.get(5)?;
    Ok(Badge {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        criteria: BadgeCriteria::from_str(&criteria).unwrap_or(BadgeCriteria::FirstPractice),
        icon: row.get(4)?,
        rarity: Rarity::from_str(&rarity).unwrap_or(Rarity::Common),
    })
}
