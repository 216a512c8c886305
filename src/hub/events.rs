//! Change events published to hub subscribers.

use crate::goal::domain::GoalId;
use crate::lifecycle::NotificationId;
use crate::task::domain::TaskId;
use serde::Serialize;
use thiserror::Error;

/// A committed change to the hub's collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum HubEvent {
    /// A task was created.
    TaskAdded {
        /// New task.
        task_id: TaskId,
    },
    /// A task's fields, subtasks or comments changed.
    TaskUpdated {
        /// Changed task.
        task_id: TaskId,
    },
    /// A task entered `Done` and is due for archival.
    TaskCompleted {
        /// Completed task.
        task_id: TaskId,
    },
    /// A completed task was archived by its timer.
    TaskArchived {
        /// Archived task.
        task_id: TaskId,
    },
    /// A task was removed and can be restored through the notification.
    TaskDeleted {
        /// Removed task.
        task_id: TaskId,
        /// Notification carrying the undo action.
        notification_id: NotificationId,
    },
    /// A deleted task was restored.
    TaskRestored {
        /// Restored task.
        task_id: TaskId,
    },
    /// Manual order changed after an adjacent move.
    TasksReordered {
        /// Task the user moved.
        task_id: TaskId,
    },
    /// A goal was created.
    GoalAdded {
        /// New goal.
        goal_id: GoalId,
    },
    /// A goal's fields or milestones changed.
    GoalUpdated {
        /// Changed goal.
        goal_id: GoalId,
    },
    /// A goal reached 100% for the first time.
    GoalAchieved {
        /// Achieved goal.
        goal_id: GoalId,
    },
    /// A goal was removed.
    GoalDeleted {
        /// Removed goal.
        goal_id: GoalId,
    },
}

impl HubEvent {
    /// Returns the event type as a snake_case string.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "task_added",
            Self::TaskUpdated { .. } => "task_updated",
            Self::TaskCompleted { .. } => "task_completed",
            Self::TaskArchived { .. } => "task_archived",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::TaskRestored { .. } => "task_restored",
            Self::TasksReordered { .. } => "tasks_reordered",
            Self::GoalAdded { .. } => "goal_added",
            Self::GoalUpdated { .. } => "goal_updated",
            Self::GoalAchieved { .. } => "goal_achieved",
            Self::GoalDeleted { .. } => "goal_deleted",
        }
    }
}

/// Failure reported by an [`EventSink`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("event sink {sink} failed: {reason}")]
pub struct EventSinkError {
    /// Name of the failing sink.
    pub sink: String,
    /// Human-readable cause.
    pub reason: String,
}

/// Receiver of hub events.
pub trait EventSink: Send + Sync {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`EventSinkError`] when delivery fails. The hub logs the
    /// failure and carries on.
    fn publish(&self, event: &HubEvent) -> Result<(), EventSinkError>;
}

/// Sink that records every event as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: &HubEvent) -> Result<(), EventSinkError> {
        tracing::info!(event_type = event.event_type(), ?event, "hub event");
        Ok(())
    }
}

/// Fans events out to every registered sink.
#[derive(Default)]
pub(crate) struct EventDispatcher {
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventDispatcher {
    pub(crate) fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Sink failures are logged and never stop delivery to the rest.
    pub(crate) fn dispatch(&self, event: &HubEvent) {
        for sink in &self.sinks {
            if let Err(err) = sink.publish(event) {
                tracing::warn!(event_type = event.event_type(), "event sink error: {err}");
            }
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
