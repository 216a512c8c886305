//! Timed side effects of task and goal changes.
//!
//! Completing a task schedules its archival, deleting one opens an undo
//! window, and every user-facing confirmation is a notification that
//! dismisses itself. All of it runs off a [`TimerQueue`] that callers pump
//! with the current time, so behaviour is deterministic under a test clock.

mod controller;
mod notifications;
mod timers;
mod undo;

pub use controller::{
    ARCHIVED_MESSAGE, DELETED_MESSAGE, GOAL_ACHIEVED_MESSAGE, LifecycleController,
    LifecyclePolicy, RESTORED_MESSAGE, StatusEffect,
};
pub use notifications::{
    Notification, NotificationAction, NotificationCenter, NotificationId, NotificationKind,
};
pub use timers::{TimerId, TimerQueue};
pub use undo::{DeletedTask, UndoBuffer};

#[cfg(test)]
mod tests;
