//! Badge listing command

use anyhow::Result;

use praxis::Tracker;

use super::format_ts;

pub fn badges_command(
    tracker: &Tracker,
    skill: Option<i64>,
    all: bool,
    json: bool,
) -> Result<()> {
    let earned = tracker.badges().earned(skill)?;

    if json {
        if all {
            let catalog = tracker.badges().catalog()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "earned": earned,
                    "catalog": catalog,
                }))?
            );
        } else {
            println!("{}", serde_json::to_string_pretty(&earned)?);
        }
        return Ok(());
    }

    if earned.is_empty() {
        println!("No badges earned yet.");
    } else {
        println!("Earned badges ({}):\n", earned.len());
        for view in &earned {
            println!(
                "  [{}] {} - {} ({}, {})",
                view.badge.rarity.as_str(),
                view.badge.name,
                view.badge.description,
                view.skill_name.as_deref().unwrap_or("general"),
                format_ts(view.earned_at),
            );
        }
    }

    if all {
        let catalog = tracker.badges().catalog()?;
        let earned_ids: Vec<i64> = earned.iter().map(|v| v.badge.id).collect();
        let locked: Vec<_> = catalog
            .iter()
            .filter(|b| !earned_ids.contains(&b.id))
            .collect();
        if !locked.is_empty() {
            println!("\nStill locked ({}):\n", locked.len());
            for badge in locked {
                println!(
                    "  [{}] {} - {}",
                    badge.rarity.as_str(),
                    badge.name,
                    badge.description
                );
            }
        }
    }
    Ok(())
}
