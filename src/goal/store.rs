//! In-memory ordered goal collection.

use crate::goal::domain::{Goal, GoalId, GoalPatch};
use mockable::Clock;

/// Ordered goal collection; newest goals sit at the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStore {
    goals: Vec<Goal>,
}

impl GoalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `goals` in the given order.
    #[must_use]
    pub const fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    /// Returns every goal.
    #[must_use]
    pub fn all(&self) -> &[Goal] {
        &self.goals
    }

    /// Returns the number of stored goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Finds a goal by identifier.
    #[must_use]
    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id() == id)
    }

    /// Inserts a goal at the head of the collection.
    pub fn insert_front(&mut self, goal: Goal) {
        self.goals.insert(0, goal);
    }

    /// Removes a goal and returns it.
    pub fn remove(&mut self, id: GoalId) -> Option<Goal> {
        let index = self.goals.iter().position(|goal| goal.id() == id)?;
        Some(self.goals.remove(index))
    }

    /// Applies a patch; returns `false` when no goal has the identifier.
    pub fn apply_patch(&mut self, id: GoalId, patch: &GoalPatch, clock: &impl Clock) -> bool {
        self.with_goal_mut(id, |goal| goal.apply(patch, clock))
            .is_some()
    }

    pub(crate) fn with_goal_mut<R>(
        &mut self,
        id: GoalId,
        f: impl FnOnce(&mut Goal) -> R,
    ) -> Option<R> {
        self.goals.iter_mut().find(|goal| goal.id() == id).map(f)
    }
}
