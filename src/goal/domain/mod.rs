//! Domain model for goals and their milestones.

mod error;
mod goal;
mod ids;
mod patch;

pub use error::{GoalDomainError, ParseTimeframeError};
pub use goal::{Goal, Milestone, PersistedGoalData, Timeframe};
pub use ids::{GoalId, MilestoneId};
pub use patch::GoalPatch;
