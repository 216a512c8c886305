//! Read models handed to the presentation layer.

use crate::goal::domain::Goal;
use crate::report::GoalSummary;
use crate::task::domain::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Which half of the task collection the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewFilter {
    /// Tasks not yet archived.
    #[default]
    Active,
    /// Archived tasks.
    Archived,
}

/// Active tasks grouped by status, each column ranked under the current
/// sort mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    columns: Vec<BoardColumn<'a>>,
}

/// One status column of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    /// Status shared by every task in the column.
    pub status: TaskStatus,
    /// Ranked tasks.
    pub tasks: Vec<&'a Task>,
}

impl<'a> BoardView<'a> {
    pub(crate) fn from_ranked(ranked: &[&'a Task]) -> Self {
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: ranked
                    .iter()
                    .copied()
                    .filter(|task| task.status() == status)
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    /// Returns the columns in workflow order: to do, in progress, done.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn<'a>] {
        &self.columns
    }

    /// Returns the tasks in the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        self.columns
            .iter()
            .find(|column| column.status == status)
            .map_or(&[], |column| column.tasks.as_slice())
    }
}

/// Goals split by completion, with header figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalsView<'a> {
    /// Totals and average progress.
    pub summary: GoalSummary,
    /// Goals still in flight, in collection order.
    pub active: Vec<&'a Goal>,
    /// Achieved goals, in collection order.
    pub completed: Vec<&'a Goal>,
}
