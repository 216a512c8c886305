//! Deterministic one-shot timer queue.
//!
//! Timers never fire on their own: the owner drains due entries with
//! [`TimerQueue::drain_due`] against a clock reading. This keeps the core
//! single-threaded and lets tests step time explicitly.

use chrono::{DateTime, Utc};
use std::fmt;

/// Handle to a scheduled timer, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry<J> {
    id: TimerId,
    due: DateTime<Utc>,
    job: J,
}

/// Pending jobs keyed by due instant.
#[derive(Debug, Clone)]
pub struct TimerQueue<J> {
    entries: Vec<Entry<J>>,
    next_id: u64,
}

impl<J> Default for TimerQueue<J> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<J> TimerQueue<J> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `job` to fire at `due`.
    pub fn schedule(&mut self, due: DateTime<Utc>, job: J) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry { id, due, job });
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Returns whether the timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no timers are pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the earliest pending due instant.
    #[must_use]
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns every job due at or before `now`, earliest first
    /// and in scheduling order among equal instants.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<(TimerId, J)> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due <= now);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| (entry.id, entry.job)).collect()
    }
}
