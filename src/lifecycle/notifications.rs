//! Transient notifications shown by the presentation layer.

use super::TimerId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Identifier of a live notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Something finished as intended.
    Success,
    /// Something went wrong.
    Error,
    /// Neutral information.
    Info,
}

/// Corrective action offered alongside a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationAction {
    /// Restores a deleted task while the notification is alive.
    UndoDelete {
        /// Task that was deleted.
        task_id: TaskId,
    },
}

/// A live notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    message: String,
    kind: NotificationKind,
    action: Option<NotificationAction>,
    raised_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    #[serde(skip)]
    timer: TimerId,
}

impl Notification {
    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the visual tone.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the attached corrective action, if any.
    #[must_use]
    pub const fn action(&self) -> Option<NotificationAction> {
        self.action
    }

    /// Returns when the notification was raised.
    #[must_use]
    pub const fn raised_at(&self) -> DateTime<Utc> {
        self.raised_at
    }

    /// Returns when the notification dismisses itself.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub(crate) const fn timer(&self) -> TimerId {
        self.timer
    }
}

/// Fields needed to raise a notification.
pub(crate) struct NewNotification {
    pub(crate) message: String,
    pub(crate) kind: NotificationKind,
    pub(crate) action: Option<NotificationAction>,
    pub(crate) raised_at: DateTime<Utc>,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Live notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    active: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    /// Creates an empty centre.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns live notifications, oldest first.
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Finds a live notification.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.active.iter().find(|notification| notification.id == id)
    }

    /// Reserves the identifier the next notification will carry.
    pub(crate) fn reserve_id(&mut self) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub(crate) fn insert(&mut self, id: NotificationId, timer: TimerId, new: NewNotification) {
        self.active.push(Notification {
            id,
            message: new.message,
            kind: new.kind,
            action: new.action,
            raised_at: new.raised_at,
            expires_at: new.expires_at,
            timer,
        });
    }

    pub(crate) fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self
            .active
            .iter()
            .position(|notification| notification.id == id)?;
        Some(self.active.remove(index))
    }
}
