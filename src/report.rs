//! Read-only summary statistics for the reports view.

use crate::aggregation::rounded_div;
use crate::goal::domain::Goal;
use crate::task::domain::{Category, Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics over a set of tasks.
///
/// Every breakdown lists each enumerated value, zero when unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    /// Number of tasks considered.
    pub total: usize,
    /// Task count per status.
    pub status_breakdown: BTreeMap<TaskStatus, usize>,
    /// Task count per priority.
    pub priority_breakdown: BTreeMap<Priority, usize>,
    /// Task count per category.
    pub category_breakdown: BTreeMap<Category, usize>,
    /// Open tasks whose due date has passed.
    pub overdue_count: usize,
}

/// Computes a [`TaskReport`] over `tasks`, judging overdue against `now`.
#[must_use]
pub fn report<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> TaskReport {
    let mut status_breakdown: BTreeMap<_, _> =
        TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
    let mut priority_breakdown: BTreeMap<_, _> =
        Priority::ALL.into_iter().map(|priority| (priority, 0)).collect();
    let mut category_breakdown: BTreeMap<_, _> =
        Category::ALL.into_iter().map(|category| (category, 0)).collect();
    let mut total = 0;
    let mut overdue_count = 0;

    for task in tasks {
        total += 1;
        *status_breakdown.entry(task.status()).or_insert(0) += 1;
        *priority_breakdown.entry(task.priority()).or_insert(0) += 1;
        *category_breakdown.entry(task.category()).or_insert(0) += 1;
        if task.is_overdue(now) {
            overdue_count += 1;
        }
    }

    TaskReport {
        total,
        status_breakdown,
        priority_breakdown,
        category_breakdown,
        overdue_count,
    }
}

/// Header figures for the goals view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    /// Number of goals.
    pub total: usize,
    /// Goals not yet achieved.
    pub active: usize,
    /// Goals achieved.
    pub completed: usize,
    /// Mean progress across all goals, rounded half up, with achieved goals
    /// counting as 100; 0 with no goals.
    pub average_progress: u8,
}

/// Summarises `goals` for the goals view header.
#[must_use]
pub fn goal_summary(goals: &[Goal]) -> GoalSummary {
    let completed = goals.iter().filter(|goal| goal.is_completed()).count();
    let progress_sum: usize = goals
        .iter()
        .map(|goal| {
            if goal.is_completed() {
                usize::from(Goal::MAX_PROGRESS)
            } else {
                usize::from(goal.progress())
            }
        })
        .sum();
    let average_progress =
        u8::try_from(rounded_div(progress_sum, goals.len())).unwrap_or(Goal::MAX_PROGRESS);

    GoalSummary {
        total: goals.len(),
        active: goals.len() - completed,
        completed,
        average_progress,
    }
}
