//! Error types for goal domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or editing goal values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GoalDomainError {
    /// The goal title is empty after trimming.
    #[error("goal title must not be empty")]
    EmptyTitle,

    /// The milestone title is empty after trimming.
    #[error("milestone title must not be empty")]
    EmptyMilestoneTitle,
}

/// Error returned while parsing a goal timeframe from its display form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown goal timeframe: {0}")]
pub struct ParseTimeframeError(pub String);
