use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use praxis::Tracker;

mod cli;

#[derive(Parser)]
#[command(name = "praxis")]
#[command(about = "Skill practice tracker - streaks, badges and progress reports")]
#[command(version)]
struct Cli {
    /// Path to the database (defaults to ~/.praxis/practice.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tracked skills
    Skill {
        #[command(subcommand)]
        command: cli::skill::SkillCommands,
    },

    /// Log a practice session (updates streaks and may award badges)
    Log {
        skill_id: i64,

        /// Duration in hours
        #[arg(long)]
        hours: f64,

        /// Session time, "YYYY-MM-DD HH:MM:SS" (defaults to now)
        #[arg(long)]
        at: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show streaks, highest current streak first
    Streaks {
        /// Show a single skill's streak
        skill_id: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show earned badges
    Badges {
        /// Filter skill-scoped badges to this skill (global ones always show)
        #[arg(long)]
        skill: Option<i64>,

        /// Show the whole catalog, earned or not
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent practice history across all skills
    History {
        /// Number of sessions to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show the practice dashboard
    Dashboard,

    /// Export the full progress report as CSV
    Report {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let tracker = match &cli.db {
        Some(path) => Tracker::open(path)?,
        None => Tracker::open_default()?,
    };

    match cli.command {
        Commands::Skill { command } => cli::skill::run(&tracker, command)?,
        Commands::Log {
            skill_id,
            hours,
            at,
            notes,
        } => cli::practice::log_command(&tracker, skill_id, hours, at.as_deref(), &notes)?,
        Commands::Streaks { skill_id, json } => {
            cli::practice::streaks_command(&tracker, skill_id, json)?
        }
        Commands::Badges { skill, all, json } => {
            cli::badges::badges_command(&tracker, skill, all, json)?
        }
        Commands::History { limit } => cli::practice::history_command(&tracker, limit)?,
        Commands::Dashboard => cli::report::dashboard_command(&tracker)?,
        Commands::Report { output } => cli::report::report_command(&tracker, output.as_deref())?,
    }

    Ok(())
}
