//! Skill management commands

use anyhow::Result;
use clap::Subcommand;

use praxis::Tracker;
use praxis::models::SkillDraft;

use super::{format_ts, parse_proficiency};

#[derive(Subcommand)]
pub enum SkillCommands {
    /// Add a new skill
    Add {
        name: String,

        #[arg(long)]
        category: String,

        /// beginner, intermediate, advanced or expert
        #[arg(long, default_value = "beginner")]
        proficiency: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List all skills
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one skill with its sessions
    Show {
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a skill's fields (unset fields keep their value)
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        proficiency: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a skill and everything it owns
    Delete { id: i64 },
}

pub fn run(tracker: &Tracker, command: SkillCommands) -> Result<()> {
    match command {
        SkillCommands::Add {
            name,
            category,
            proficiency,
            notes,
        } => {
            let draft = SkillDraft::new(name, category, parse_proficiency(&proficiency)?, notes);
            let skill = tracker.skills().create(&draft)?;
            println!("Added skill #{}: {}", skill.id, skill.name);
        }

        SkillCommands::List { json } => {
            let skills = tracker.skills().list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&skills)?);
                return Ok(());
            }
            if skills.is_empty() {
                println!("No skills yet. Add one with `praxis skill add`.");
                return Ok(());
            }
            println!("Skills ({}):\n", skills.len());
            for skill in skills {
                println!(
                    "  #{} {} [{}] {} - {:.1}h, last practiced {}",
                    skill.id,
                    skill.name,
                    skill.category,
                    skill.proficiency.as_str(),
                    skill.total_hours,
                    skill.last_practiced.map(format_ts).unwrap_or_else(|| "never".into()),
                );
            }
        }

        SkillCommands::Show { id, json } => {
            let skill = tracker.skills().get(id)?;
            let sessions = tracker.sessions().for_skill(id)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "skill": skill,
                        "sessions": sessions,
                    }))?
                );
                return Ok(());
            }
            println!("#{} {} [{}]", skill.id, skill.name, skill.category);
            println!("  proficiency: {}", skill.proficiency.as_str());
            println!("  total hours: {:.1}", skill.total_hours);
            if !skill.notes.is_empty() {
                println!("  notes: {}", skill.notes);
            }
            let streak = tracker.streaks().get(id)?;
            println!("  streak: {} (longest {})", streak.current, streak.longest);
            println!("  sessions ({}):", sessions.len());
            for s in sessions {
                println!(
                    "    {} - {:.1}h {}",
                    format_ts(s.practiced_at),
                    s.duration_hours,
                    s.notes
                );
            }
        }

        SkillCommands::Update {
            id,
            name,
            category,
            proficiency,
            notes,
        } => {
            let current = tracker.skills().get(id)?;
            let draft = SkillDraft::new(
                name.unwrap_or(current.name),
                category.unwrap_or(current.category),
                match proficiency {
                    Some(p) => parse_proficiency(&p)?,
                    None => current.proficiency,
                },
                notes.unwrap_or(current.notes),
            );
            let skill = tracker.skills().update(id, &draft)?;
            println!("Updated skill #{}: {}", skill.id, skill.name);
        }

        SkillCommands::Delete { id } => {
            let skill = tracker.skills().get(id)?;
            tracker.skills().delete(id)?;
            println!("Deleted skill #{}: {}", id, skill.name);
        }
    }
    Ok(())
}
