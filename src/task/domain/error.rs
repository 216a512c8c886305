//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or editing task values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyComment,
}

/// Error returned while parsing a task status from its display form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority from its display form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a task category from its display form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseCategoryError(pub String);
