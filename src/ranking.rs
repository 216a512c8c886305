//! Display ordering of tasks under the supported sort policies.
//!
//! Every policy is a stable sort: tasks with equal keys keep their input
//! order. The default policy, [`SortMode::Smart`], blends priority, due-date
//! urgency and status into a single score.

use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Sort policy applied to the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Ascending by the user-maintained `order` field.
    Manual,
    /// Highest priority first.
    Priority,
    /// Overdue open tasks first, then earliest due date.
    DueDate,
    /// In-progress, then to-do, then done.
    Status,
    /// Composite urgency score, highest first.
    #[default]
    Smart,
}

impl SortMode {
    /// Every sort mode.
    pub const ALL: [Self; 5] = [
        Self::Manual,
        Self::Priority,
        Self::DueDate,
        Self::Status,
        Self::Smart,
    ];

    /// Returns the wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::Status => "status",
            Self::Smart => "smart",
        }
    }

    /// Parses a mode name, falling back to [`SortMode::Smart`] for anything
    /// unrecognised.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::try_from(value).unwrap_or_default()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised sort mode name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort mode: {0}")]
pub struct ParseSortModeError(pub String);

impl TryFrom<&str> for SortMode {
    type Error = ParseSortModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseSortModeError(value.to_owned()))
    }
}

/// Orders `tasks` under `mode`, evaluating due dates against `now`.
#[must_use]
pub fn rank<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    mode: SortMode,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let mut ranked: Vec<&Task> = tasks.into_iter().collect();
    match mode {
        SortMode::Manual => ranked.sort_by_key(|task| task.order()),
        SortMode::Priority => ranked.sort_by_key(|task| Reverse(task.priority().weight())),
        SortMode::DueDate => {
            ranked.sort_by_key(|task| (!task.is_overdue(now), task.due_date()));
        }
        SortMode::Status => ranked.sort_by_key(|task| Reverse(task.status().weight())),
        SortMode::Smart => {
            let mut scored: Vec<(i64, &Task)> = ranked
                .into_iter()
                .map(|task| (smart_score(task, now), task))
                .collect();
            scored.sort_by_key(|(score, _)| Reverse(*score));
            ranked = scored.into_iter().map(|(_, task)| task).collect();
        }
    }
    ranked
}

/// Composite urgency score used by [`SortMode::Smart`].
///
/// `priority weight × 10 + urgency bonus + status weight × 3`; finished
/// tasks earn no urgency bonus.
#[must_use]
pub fn smart_score(task: &Task, now: DateTime<Utc>) -> i64 {
    let urgency = if task.status() == TaskStatus::Done {
        0
    } else {
        urgency_bonus(days_until(task.due_date(), now))
    };
    task.priority().weight() * 10 + urgency + task.status().weight() * 3
}

/// Bonus awarded for how soon a task falls due.
#[must_use]
pub fn urgency_bonus(days_until: i64) -> i64 {
    match days_until {
        i64::MIN..=-1 => 50,
        0 => 45,
        1 => 40,
        2..=3 => 30,
        4..=7 => 20,
        _ => 15_i64.saturating_sub(days_until).max(0),
    }
}

/// Whole days from `now` until the due date starts, rounded up.
///
/// A task due later today yields 0; one due yesterday yields -1.
#[must_use]
pub fn days_until(due: NaiveDate, now: DateTime<Utc>) -> i64 {
    let millis = (crate::task::domain::due_instant(due) - now).num_milliseconds();
    let floor = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        floor
    } else {
        floor + 1
    }
}
