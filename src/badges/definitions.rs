//! Badge catalog definitions
//!
//! The fixed 12-badge catalog with award criteria. Each criteria key maps to
//! one predicate over practice aggregates; scope decides whether the award is
//! attributed to a single skill or to the whole tracked history.

use serde::{Deserialize, Serialize};

/// Symbolic criteria key for each badge, used for matching (not display)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeCriteria {
    FirstPractice,
    SevenDayStreak,
    ThirtyDayStreak,
    HundredDayStreak,
    TenHours,
    HundredHours,
    ExpertLevel,
    FiveSkills,
    TenSkills,
    TwentyFiveSkills,
    YearOfPractice,
    ThousandHours,
}

/// Whether a badge is earned per skill or once for the whole system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeScope {
    Skill,
    Global,
}

impl BadgeCriteria {
    /// Get the string key for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstPractice => "first_practice",
            Self::SevenDayStreak => "7_day_streak",
            Self::ThirtyDayStreak => "30_day_streak",
            Self::HundredDayStreak => "100_day_streak",
            Self::TenHours => "10_hours",
            Self::HundredHours => "100_hours",
            Self::ExpertLevel => "expert_level",
            Self::FiveSkills => "5_skills",
            Self::TenSkills => "10_skills",
            Self::TwentyFiveSkills => "25_skills",
            Self::YearOfPractice => "365_days",
            Self::ThousandHours => "1000_hours",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_practice" => Some(Self::FirstPractice),
            "7_day_streak" => Some(Self::SevenDayStreak),
            "30_day_streak" => Some(Self::ThirtyDayStreak),
            "100_day_streak" => Some(Self::HundredDayStreak),
            "10_hours" => Some(Self::TenHours),
            "100_hours" => Some(Self::HundredHours),
            "expert_level" => Some(Self::ExpertLevel),
            "5_skills" => Some(Self::FiveSkills),
            "10_skills" => Some(Self::TenSkills),
            "25_skills" => Some(Self::TwentyFiveSkills),
            "365_days" => Some(Self::YearOfPractice),
            "1000_hours" => Some(Self::ThousandHours),
            _ => None,
        }
    }

    /// Skill-scoped criteria attribute the award to the triggering skill;
    /// global criteria store no skill reference at all.
    pub fn scope(&self) -> BadgeScope {
        match self {
            Self::FirstPractice
            | Self::SevenDayStreak
            | Self::ThirtyDayStreak
            | Self::HundredDayStreak
            | Self::TenHours
            | Self::HundredHours
            | Self::ExpertLevel => BadgeScope::Skill,
            Self::FiveSkills
            | Self::TenSkills
            | Self::TwentyFiveSkills
            | Self::YearOfPractice
            | Self::ThousandHours => BadgeScope::Global,
        }
    }

    pub fn all() -> &'static [BadgeCriteria] {
        &[
            Self::FirstPractice,
            Self::SevenDayStreak,
            Self::ThirtyDayStreak,
            Self::HundredDayStreak,
            Self::TenHours,
            Self::HundredHours,
            Self::ExpertLevel,
            Self::FiveSkills,
            Self::TenSkills,
            Self::TwentyFiveSkills,
            Self::YearOfPractice,
            Self::ThousandHours,
        ]
    }
}

/// Badge rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }
}

/// Catalog entry with all badge metadata
#[derive(Debug, Clone)]
pub struct BadgeDef {
    pub criteria: BadgeCriteria,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
}

/// The fixed badge catalog, seeded into the database on first open
pub static CATALOG: &[BadgeDef] = &[
    BadgeDef {
        criteria: BadgeCriteria::FirstPractice,
        name: "First Steps",
        description: "Logged your first practice session",
        icon: "emoji_events",
        rarity: Rarity::Common,
    },
    BadgeDef {
        criteria: BadgeCriteria::SevenDayStreak,
        name: "Consistent Learner",
        description: "Practiced for 7 consecutive days",
        icon: "local_fire_department",
        rarity: Rarity::Uncommon,
    },
    BadgeDef {
        criteria: BadgeCriteria::ThirtyDayStreak,
        name: "Dedicated",
        description: "Practiced for 30 consecutive days",
        icon: "whatshot",
        rarity: Rarity::Rare,
    },
    BadgeDef {
        criteria: BadgeCriteria::HundredDayStreak,
        name: "Marathoner",
        description: "Practiced for 100 consecutive days",
        icon: "directions_run",
        rarity: Rarity::Epic,
    },
    BadgeDef {
        criteria: BadgeCriteria::TenHours,
        name: "Hour Master",
        description: "Logged 10 hours of practice",
        icon: "timer",
        rarity: Rarity::Common,
    },
    BadgeDef {
        criteria: BadgeCriteria::HundredHours,
        name: "Veteran",
        description: "Logged 100 hours of practice",
        icon: "military_tech",
        rarity: Rarity::Rare,
    },
    BadgeDef {
        criteria: BadgeCriteria::ExpertLevel,
        name: "Expert",
        description: "Reached expert proficiency in a skill",
        icon: "school",
        rarity: Rarity::Epic,
    },
    BadgeDef {
        criteria: BadgeCriteria::FiveSkills,
        name: "Jack of All Trades",
        description: "Learned 5 different skills",
        icon: "diversity_3",
        rarity: Rarity::Uncommon,
    },
    BadgeDef {
        criteria: BadgeCriteria::TenSkills,
        name: "Master of Some",
        description: "Learned 10 different skills",
        icon: "workspace_premium",
        rarity: Rarity::Rare,
    },
    BadgeDef {
        criteria: BadgeCriteria::TwentyFiveSkills,
        name: "Skill Collector",
        description: "Learned 25 different skills",
        icon: "collections",
        rarity: Rarity::Epic,
    },
    BadgeDef {
        criteria: BadgeCriteria::YearOfPractice,
        name: "Time Traveler",
        description: "Logged practice sessions for 365 days",
        icon: "history",
        rarity: Rarity::Legendary,
    },
    BadgeDef {
        criteria: BadgeCriteria::ThousandHours,
        name: "Master Craftsman",
        description: "Logged 1000 hours across all skills",
        icon: "construction",
        rarity: Rarity::Legendary,
    },
];

impl BadgeDef {
    /// Get the catalog entry for a criteria key
    pub fn get(criteria: BadgeCriteria) -> &'static BadgeDef {
        CATALOG
            .iter()
            .find(|d| d.criteria == criteria)
            .expect("All criteria should be in the catalog")
    }
}
