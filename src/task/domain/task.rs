//! Task aggregate root and related lifecycle types.

use super::{
    Category, Comment, CommentId, ParsePriorityError, ParseTaskStatusError, Subtask, SubtaskId,
    TaskDomainError, TaskId, TaskPatch,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Returns the display form used in snapshots and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Ranking weight; active work outranks queued work, finished work last.
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::InProgress => 3,
            Self::ToDo => 2,
            Self::Done => 1,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "to do" | "todo" => Ok(Self::ToDo),
            "in progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Drop everything else.
    Critical,
}

impl Priority {
    /// Every priority, in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the display form used in snapshots and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Ranking weight, 1 for `Low` through 4 for `Critical`.
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParsePriorityError(value.to_owned()))
    }
}

/// Returns the instant a calendar due date starts (midnight UTC).
#[must_use]
pub fn due_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Task aggregate root.
///
/// Fields are private: tasks change only through [`crate::task::TaskStore`]
/// and the hub commands built on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    priority: Priority,
    category: Category,
    due_date: NaiveDate,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    subtasks: Vec<Subtask>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted or imported task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Category.
    pub category: Category,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Whether the task is archived.
    pub archived: bool,
    /// Manual sort position.
    pub order: i64,
    /// Nested checklist.
    pub subtasks: Vec<Subtask>,
    /// Attached comments.
    pub comments: Vec<Comment>,
    /// Free-form description, empty when absent.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with default attributes, due today.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: &str, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let trimmed = non_blank(title).ok_or(TaskDomainError::EmptyTitle)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: trimmed,
            status: TaskStatus::default(),
            priority: Priority::default(),
            category: Category::default(),
            due_date: timestamp.date_naive(),
            archived: false,
            order: 0,
            subtasks: Vec::new(),
            comments: Vec::new(),
            description: String::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            priority: data.priority,
            category: data.category,
            due_date: data.due_date,
            archived: data.archived,
            order: data.order,
            subtasks: data.subtasks,
            comments: data.comments,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the calendar due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the instant the due date starts.
    #[must_use]
    pub fn due_at(&self) -> DateTime<Utc> {
        due_instant(self.due_date)
    }

    /// Returns whether the task is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns the manual sort position.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the comments in insertion order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the description, empty when none was written.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is past due and still open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_at() < now
    }

    /// Applies a partial update and returns the status held before it.
    pub(crate) fn apply(&mut self, patch: &TaskPatch, clock: &impl Clock) -> TaskStatus {
        let previous = self.status;
        if let Some(title) = patch.title.as_deref().and_then(non_blank) {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(description) = &patch.description {
            description.clone_into(&mut self.description);
        }
        if let Some(archived) = patch.archived {
            self.archived = archived;
        }
        self.touch(clock);
        previous
    }

    pub(crate) fn archive(&mut self, clock: &impl Clock) {
        self.archived = true;
        self.touch(clock);
    }

    /// Moves the task to `order`, touching it only when the value changes.
    pub(crate) fn set_order(&mut self, order: i64, clock: &impl Clock) {
        if self.order != order {
            self.order = order;
            self.touch(clock);
        }
    }

    pub(crate) fn add_subtask(
        &mut self,
        title: &str,
        clock: &impl Clock,
    ) -> Result<SubtaskId, TaskDomainError> {
        let trimmed = non_blank(title).ok_or(TaskDomainError::EmptySubtaskTitle)?;
        let subtask = Subtask::new(trimmed);
        let id = subtask.id();
        self.subtasks.push(subtask);
        self.touch(clock);
        Ok(id)
    }

    pub(crate) fn toggle_subtask(&mut self, id: SubtaskId, clock: &impl Clock) -> bool {
        let Some(subtask) = self.subtasks.iter_mut().find(|s| s.id() == id) else {
            return false;
        };
        subtask.toggle();
        self.touch(clock);
        true
    }

    pub(crate) fn remove_subtask(&mut self, id: SubtaskId, clock: &impl Clock) -> bool {
        let before = self.subtasks.len();
        self.subtasks.retain(|s| s.id() != id);
        let removed = self.subtasks.len() != before;
        if removed {
            self.touch(clock);
        }
        removed
    }

    pub(crate) fn rename_subtask(
        &mut self,
        id: SubtaskId,
        title: &str,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        let trimmed = non_blank(title).ok_or(TaskDomainError::EmptySubtaskTitle)?;
        let Some(subtask) = self.subtasks.iter_mut().find(|s| s.id() == id) else {
            return Ok(false);
        };
        subtask.rename(trimmed);
        self.touch(clock);
        Ok(true)
    }

    pub(crate) fn add_comment(
        &mut self,
        text: &str,
        clock: &impl Clock,
    ) -> Result<CommentId, TaskDomainError> {
        let trimmed = non_blank(text).ok_or(TaskDomainError::EmptyComment)?;
        let comment = Comment::new(trimmed, clock.utc());
        let id = comment.id();
        self.comments.push(comment);
        self.touch(clock);
        Ok(id)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Returns the trimmed value, or `None` when nothing but whitespace remains.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
