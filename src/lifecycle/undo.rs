//! Bounded buffer of deleted tasks awaiting a possible undo.

use super::NotificationId;
use crate::task::domain::Task;
use std::collections::VecDeque;

/// A deleted task paired with the notification that can restore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTask {
    /// The task exactly as it was when deleted.
    pub task: Task,
    /// Notification carrying the undo action.
    pub notification: NotificationId,
}

/// FIFO of recently deleted tasks, capped at a fixed capacity.
#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    entries: VecDeque<DeletedTask>,
    capacity: usize,
}

impl UndoBuffer {
    /// Creates a buffer holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of buffered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Buffers a deleted task and returns whatever fell out the far end.
    pub fn push(&mut self, task: Task, notification: NotificationId) -> Option<DeletedTask> {
        let entry = DeletedTask { task, notification };
        if self.capacity == 0 {
            return Some(entry);
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Removes and returns the task tied to `notification`.
    pub fn take(&mut self, notification: NotificationId) -> Option<Task> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.notification == notification)?;
        self.entries.remove(index).map(|entry| entry.task)
    }

    /// Returns whether a task tied to `notification` is buffered.
    #[must_use]
    pub fn contains(&self, notification: NotificationId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.notification == notification)
    }
}
