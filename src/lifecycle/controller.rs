//! Side effects attached to task and goal state changes.

use super::notifications::NewNotification;
use super::{
    Notification, NotificationAction, NotificationCenter, NotificationId, NotificationKind,
    TimerId, TimerQueue, UndoBuffer,
};
use crate::config::HubConfig;
use crate::goal::domain::Goal;
use crate::task::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::{HashMap, HashSet};

/// Message raised once a completed task has been archived.
pub const ARCHIVED_MESSAGE: &str = "Task completed and archived!";
/// Message raised when a task is deleted.
pub const DELETED_MESSAGE: &str = "Task deleted";
/// Message raised when a deleted task is restored.
pub const RESTORED_MESSAGE: &str = "Task restored!";
/// Message raised the first time a goal reaches 100%.
pub const GOAL_ACHIEVED_MESSAGE: &str = "Goal achieved!";

/// Timing and capacity rules for lifecycle side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    /// Delay between completing a task and archiving it.
    pub archive_delay: TimeDelta,
    /// Lifetime of the delete notification, and with it the undo action.
    pub undo_window: TimeDelta,
    /// Lifetime of ordinary notifications.
    pub notification_ttl: TimeDelta,
    /// Maximum number of deleted tasks kept for undo.
    pub undo_capacity: usize,
    /// Whether reopening a completed task cancels its pending archival.
    pub cancel_archive_on_reopen: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self::from(&HubConfig::default())
    }
}

impl From<&HubConfig> for LifecyclePolicy {
    fn from(config: &HubConfig) -> Self {
        Self {
            archive_delay: config.archive_delay(),
            undo_window: config.undo_window(),
            notification_ttl: config.notification_ttl(),
            undo_capacity: config.undo_capacity,
            cancel_archive_on_reopen: config.cancel_archive_on_reopen,
        }
    }
}

/// What a status change set in motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffect {
    /// The task entered `Done`; archival is pending on this timer.
    ArchiveScheduled(TimerId),
    /// The task left `Done` and its pending archival was cancelled.
    ArchiveCancelled,
    /// No side effect.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerJob {
    ArchiveTask(TaskId),
    DismissNotification(NotificationId),
}

/// Owns the timers, notifications and undo buffer behind task and goal
/// lifecycle side effects.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    policy: LifecyclePolicy,
    timers: TimerQueue<TimerJob>,
    notifications: NotificationCenter,
    undo: UndoBuffer,
    pending_archives: HashMap<TaskId, TimerId>,
    recently_completed: HashSet<TaskId>,
}

impl LifecycleController {
    /// Creates a controller with no pending work.
    #[must_use]
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self {
            policy,
            timers: TimerQueue::new(),
            notifications: NotificationCenter::new(),
            undo: UndoBuffer::with_capacity(policy.undo_capacity),
            pending_archives: HashMap::new(),
            recently_completed: HashSet::new(),
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Returns live notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    /// Returns whether the task was just completed and awaits archival.
    #[must_use]
    pub fn is_recently_completed(&self, task: TaskId) -> bool {
        self.recently_completed.contains(&task)
    }

    /// Returns whether an archival timer is pending for the task.
    #[must_use]
    pub fn is_archive_pending(&self, task: TaskId) -> bool {
        self.pending_archives.contains_key(&task)
    }

    /// Returns the number of deleted tasks that can still be restored.
    #[must_use]
    pub fn undoable_count(&self) -> usize {
        self.undo.len()
    }

    /// Returns the earliest instant at which [`Self::advance`] has work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_due()
    }

    /// Reacts to a task status change.
    ///
    /// Entering `Done` schedules a one-shot archival and marks the task
    /// recently completed. Leaving `Done` cancels that archival only when the
    /// policy asks for it.
    pub fn status_changed(
        &mut self,
        task: TaskId,
        from: TaskStatus,
        to: TaskStatus,
        now: DateTime<Utc>,
    ) -> StatusEffect {
        if to == TaskStatus::Done && from != TaskStatus::Done {
            self.recently_completed.insert(task);
            if let Some(timer) = self.pending_archives.get(&task) {
                return StatusEffect::ArchiveScheduled(*timer);
            }
            let due = deadline(now, self.policy.archive_delay);
            let timer = self.timers.schedule(due, TimerJob::ArchiveTask(task));
            self.pending_archives.insert(task, timer);
            tracing::debug!(task_id = %task, %timer, "archival scheduled");
            return StatusEffect::ArchiveScheduled(timer);
        }

        if from == TaskStatus::Done && to != TaskStatus::Done && self.policy.cancel_archive_on_reopen
        {
            if let Some(timer) = self.pending_archives.remove(&task) {
                self.timers.cancel(timer);
                self.recently_completed.remove(&task);
                tracing::debug!(task_id = %task, %timer, "archival cancelled");
                return StatusEffect::ArchiveCancelled;
            }
        }

        StatusEffect::Unchanged
    }

    /// Raises an ordinary notification.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> NotificationId {
        self.raise(message.into(), kind, None, self.policy.notification_ttl, now)
    }

    /// Buffers a deleted task and raises the notification carrying its undo
    /// action. The oldest buffered task is dropped when the buffer is full.
    pub fn task_deleted(&mut self, task: Task, now: DateTime<Utc>) -> NotificationId {
        let action = NotificationAction::UndoDelete { task_id: task.id() };
        let notification = self.raise(
            DELETED_MESSAGE.to_owned(),
            NotificationKind::Info,
            Some(action),
            self.policy.undo_window,
            now,
        );
        if let Some(evicted) = self.undo.push(task, notification) {
            tracing::debug!(task_id = %evicted.task.id(), "undo buffer full, dropping oldest entry");
            self.dismiss(evicted.notification);
        }
        notification
    }

    /// Runs the undo action of a live delete notification.
    ///
    /// Returns the original task, or `None` once the notification is gone.
    pub fn undo_delete(
        &mut self,
        notification: NotificationId,
        now: DateTime<Utc>,
    ) -> Option<Task> {
        let task = self.undo.take(notification)?;
        self.dismiss(notification);
        self.notify(RESTORED_MESSAGE, NotificationKind::Success, now);
        Some(task)
    }

    /// Dismisses a notification, closing any undo window it carried.
    pub fn dismiss(&mut self, notification: NotificationId) -> bool {
        let Some(removed) = self.notifications.remove(notification) else {
            return false;
        };
        self.timers.cancel(removed.timer());
        self.undo.take(notification);
        true
    }

    /// Marks a goal achieved the first time its progress reaches 100 and
    /// raises the celebration. Returns `true` only on that first time.
    pub fn settle_goal(&mut self, goal: &mut Goal, clock: &impl Clock) -> bool {
        if !goal.settle_completion(clock) {
            return false;
        }
        tracing::info!(goal_id = %goal.id(), "goal achieved");
        self.notify(GOAL_ACHIEVED_MESSAGE, NotificationKind::Success, clock.utc());
        true
    }

    /// Fires every timer due at `now`.
    ///
    /// Expired notifications are dismissed here. Returns the tasks whose
    /// archival fell due, for the caller to archive.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Vec<TaskId> {
        let mut archivals = Vec::new();
        for (timer, job) in self.timers.drain_due(now) {
            match job {
                TimerJob::ArchiveTask(task) => {
                    if self.pending_archives.get(&task) == Some(&timer) {
                        self.pending_archives.remove(&task);
                    }
                    self.recently_completed.remove(&task);
                    archivals.push(task);
                }
                TimerJob::DismissNotification(notification) => {
                    self.notifications.remove(notification);
                    if self.undo.take(notification).is_some() {
                        tracing::debug!(%notification, "undo window closed");
                    }
                }
            }
        }
        archivals
    }

    fn raise(
        &mut self,
        message: String,
        kind: NotificationKind,
        action: Option<NotificationAction>,
        lifetime: TimeDelta,
        now: DateTime<Utc>,
    ) -> NotificationId {
        let id = self.notifications.reserve_id();
        let expires_at = deadline(now, lifetime);
        let timer = self
            .timers
            .schedule(expires_at, TimerJob::DismissNotification(id));
        self.notifications.insert(
            id,
            timer,
            NewNotification {
                message,
                kind,
                action,
                raised_at: now,
                expires_at,
            },
        );
        id
    }
}

fn deadline(now: DateTime<Utc>, delay: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(delay)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
