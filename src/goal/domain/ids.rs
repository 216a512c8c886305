//! Identifier types for the goal domain.

use crate::ids::uuid_id;

uuid_id!(
    /// Unique identifier for a goal record.
    GoalId
);

uuid_id!(
    /// Identifier for a milestone, unique within its parent goal.
    MilestoneId
);
