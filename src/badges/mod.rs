//! Badge system: fixed catalog, criteria checks and one-time awards

mod checker;
mod definitions;
mod engine;

pub use checker::{BadgeInputs, satisfied, satisfied_criteria};
pub use definitions::{BadgeCriteria, BadgeDef, BadgeScope, CATALOG, Rarity};
pub use engine::{Badge, BadgeEngine, EarnedBadgeView};
