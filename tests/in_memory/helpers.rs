//! Shared fixtures for in-memory hub integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex, PoisonError};
use taskhub::config::HubConfig;
use taskhub::hub::TaskHub;
use taskhub::persistence::InMemorySnapshotRepository;
use taskhub::task::domain::{
    Category, PersistedTaskData, Priority, Task, TaskId, TaskStatus,
};

/// Hub wired to in-memory storage and a manual clock.
pub type TestHub = TaskHub<InMemorySnapshotRepository, ManualClock>;

/// Clock that moves only when advanced.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed mid-afternoon instant used as "now".
#[fixture]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 8, 15, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Shared manual clock starting at [`now`].
#[fixture]
pub fn clock(now: DateTime<Utc>) -> Arc<ManualClock> {
    Arc::new(ManualClock {
        now: Mutex::new(now),
    })
}

/// A hub together with the clock and repository behind it.
pub struct HubFixture {
    /// Hub under test.
    pub hub: TestHub,
    /// Clock driving the hub.
    pub clock: Arc<ManualClock>,
    /// Repository receiving snapshots.
    pub repository: Arc<InMemorySnapshotRepository>,
}

impl HubFixture {
    /// Builds an empty hub under `config`.
    pub fn with_config(config: HubConfig, clock: Arc<ManualClock>) -> Self {
        let repository = Arc::new(InMemorySnapshotRepository::new());
        let hub = TaskHub::new(config, Arc::clone(&repository), Arc::clone(&clock));
        Self {
            hub,
            clock,
            repository,
        }
    }

    /// Moves time forward and fires due timers.
    pub fn advance(&mut self, millis: i64) -> usize {
        self.clock.advance(TimeDelta::milliseconds(millis));
        self.hub.tick()
    }

    /// Adds a task, failing the test on a rejected title.
    ///
    /// # Errors
    ///
    /// Returns an error when the hub ignores the title.
    pub fn add(&mut self, title: &str) -> Result<TaskId, eyre::Report> {
        self.hub
            .add_task(title)
            .ok_or_else(|| eyre::eyre!("task {title:?} was not added"))
    }

    /// Current notification messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.hub
            .notifications()
            .iter()
            .map(|notification| notification.message().to_owned())
            .collect()
    }
}

/// Empty hub with every feature enabled.
#[fixture]
pub fn fixture(clock: Arc<ManualClock>) -> HubFixture {
    HubFixture::with_config(HubConfig::full(), clock)
}

/// Calendar date `offset` days from `now`.
pub fn day(now: DateTime<Utc>, offset: i64) -> NaiveDate {
    (now + TimeDelta::days(offset)).date_naive()
}

/// Builds a detached task for ranking tests.
pub fn task(
    title: &str,
    priority: Priority,
    status: TaskStatus,
    due_date: NaiveDate,
    created: DateTime<Utc>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        status,
        priority,
        category: Category::Misc,
        due_date,
        archived: false,
        order: 0,
        subtasks: Vec::new(),
        comments: Vec::new(),
        description: String::new(),
        created_at: created,
        updated_at: created,
    })
}

/// Titles of `tasks`, in order.
pub fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}
