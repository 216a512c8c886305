//! Child items owned by a task: subtasks and comments.

use super::{CommentId, SubtaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checklist item nested under a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    #[serde(default)]
    completed: bool,
}

impl Subtask {
    /// Creates an open subtask with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SubtaskId::new(),
            title: title.into(),
            completed: false,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask is checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the subtask as completed or open.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub(crate) const fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn rename(&mut self, title: String) {
        self.title = title;
    }
}

/// Free-form note attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with the given time.
    #[must_use]
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new(),
            text: text.into(),
            timestamp,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
