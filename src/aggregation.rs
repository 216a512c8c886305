//! Derived progress figures for nested checklists.
//!
//! Everything here is pure and recomputed on read; empty checklists yield
//! zero rather than an error.

use crate::goal::domain::Milestone;
use crate::task::domain::Subtask;
use serde::Serialize;

/// Completed-versus-total tally of a checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    /// Items checked off.
    pub completed: usize,
    /// All items.
    pub total: usize,
}

impl ChecklistProgress {
    /// Returns completed / total, or 0.0 for an empty checklist.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the completion ratio is a fraction for progress bars"
    )]
    pub fn ratio(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        as_f64(self.completed) / as_f64(self.total)
    }

    /// Returns the rounded percentage, half rounding up, 0 when empty.
    #[must_use]
    pub fn percent(self) -> u8 {
        rounded_percent(self.completed, self.total)
    }

    /// Returns whether every item is checked off. Empty lists are not done.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Tallies a task's subtasks.
#[must_use]
pub fn subtask_progress(subtasks: &[Subtask]) -> ChecklistProgress {
    ChecklistProgress {
        completed: subtasks.iter().filter(|s| s.is_completed()).count(),
        total: subtasks.len(),
    }
}

/// Returns the subtask completion ratio, 0.0 for no subtasks.
#[must_use]
pub fn subtask_ratio(subtasks: &[Subtask]) -> f64 {
    subtask_progress(subtasks).ratio()
}

/// Tallies a goal's milestones.
#[must_use]
pub fn milestone_counts(milestones: &[Milestone]) -> ChecklistProgress {
    ChecklistProgress {
        completed: milestones.iter().filter(|m| m.is_completed()).count(),
        total: milestones.len(),
    }
}

/// Returns `round(100 × completed / total)` over the milestones, 0 when
/// there are none.
#[must_use]
pub fn milestone_progress(milestones: &[Milestone]) -> u8 {
    milestone_counts(milestones).percent()
}

/// Integer half-up rounding of `100 × part / whole`.
fn rounded_percent(part: usize, whole: usize) -> u8 {
    let percent = rounded_div(part.min(whole).saturating_mul(100), whole);
    u8::try_from(percent).map_or(100, |value| value.min(100))
}

/// Integer half-up rounding of `numerator / denominator`, 0 when the
/// denominator is 0.
pub(crate) fn rounded_div(numerator: usize, denominator: usize) -> usize {
    numerator
        .saturating_mul(2)
        .saturating_add(denominator)
        .checked_div(denominator.saturating_mul(2))
        .unwrap_or(0)
}

fn as_f64(value: usize) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}
