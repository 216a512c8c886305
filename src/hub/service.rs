//! The task hub: one explicit store with a fixed command set.

use super::events::EventDispatcher;
use super::{BoardView, EventSink, GoalsView, HubEvent, ViewFilter};
use crate::config::HubConfig;
use crate::export::csv;
use crate::goal::GoalStore;
use crate::goal::domain::{Goal, GoalId, GoalPatch, MilestoneId};
use crate::lifecycle::{
    ARCHIVED_MESSAGE, LifecycleController, LifecyclePolicy, Notification, NotificationId,
    NotificationKind, StatusEffect,
};
use crate::persistence::{Snapshot, SnapshotRepository};
use crate::ranking::{SortMode, rank};
use crate::report::{TaskReport, goal_summary, report};
use crate::task::domain::{CommentId, SubtaskId, Task, TaskId, TaskPatch};
use crate::task::{MoveDirection, TaskStore};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

const TASK_ADDED_MESSAGE: &str = "Task added successfully!";
const GOAL_ADDED_MESSAGE: &str = "Goal added successfully!";
const GOAL_REMOVED_MESSAGE: &str = "Goal removed";

/// Task and goal store with lifecycle side effects, persistence and event
/// publication.
///
/// Every command takes `&mut self` and completes synchronously. Commands that
/// change the collections save a snapshot and publish [`HubEvent`]s; intents
/// that change nothing (blank titles, unknown ids, disabled features) are
/// logged at debug level and ignored.
pub struct TaskHub<R, C>
where
    R: SnapshotRepository,
    C: Clock,
{
    config: HubConfig,
    tasks: TaskStore,
    goals: GoalStore,
    lifecycle: LifecycleController,
    sort_mode: SortMode,
    view_filter: ViewFilter,
    repository: Arc<R>,
    clock: Arc<C>,
    events: EventDispatcher,
}

impl<R, C> TaskHub<R, C>
where
    R: SnapshotRepository,
    C: Clock,
{
    /// Creates an empty hub without reading the repository.
    #[must_use]
    pub fn new(config: HubConfig, repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_snapshot(config, Snapshot::default(), repository, clock)
    }

    /// Creates a hub from whatever the repository holds.
    ///
    /// Absent or unreadable snapshots yield an empty hub; the failure is
    /// logged rather than returned.
    #[must_use]
    pub fn load(config: HubConfig, repository: Arc<R>, clock: Arc<C>) -> Self {
        let snapshot = match repository.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => Snapshot::default(),
            Err(err) => {
                tracing::warn!("failed to load snapshot, starting empty: {err}");
                Snapshot::default()
            }
        };
        tracing::debug!(
            tasks = snapshot.tasks.len(),
            goals = snapshot.goals.len(),
            "hub loaded"
        );
        Self::with_snapshot(config, snapshot, repository, clock)
    }

    fn with_snapshot(
        config: HubConfig,
        snapshot: Snapshot,
        repository: Arc<R>,
        clock: Arc<C>,
    ) -> Self {
        let lifecycle = LifecycleController::new(LifecyclePolicy::from(&config));
        Self {
            sort_mode: config.default_sort,
            config,
            tasks: TaskStore::from_tasks(snapshot.tasks),
            goals: GoalStore::from_goals(snapshot.goals),
            lifecycle,
            view_filter: ViewFilter::default(),
            repository,
            clock,
            events: EventDispatcher::default(),
        }
    }

    /// Registers a receiver for every subsequent [`HubEvent`].
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.events.add_sink(sink);
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Adds a task with default attributes at the head of the collection.
    ///
    /// Under manual sort the task takes order 0 and every other task moves
    /// down one place; otherwise it takes the next free order value.
    pub fn add_task(&mut self, title: &str) -> Option<TaskId> {
        let clock = self.clock.as_ref();
        let mut task = match Task::new(title, clock) {
            Ok(task) => task,
            Err(err) => {
                tracing::debug!("ignoring add_task: {err}");
                return None;
            }
        };
        if self.sort_mode == SortMode::Manual {
            self.tasks.shift_orders(clock);
        } else {
            let next = self
                .tasks
                .max_order()
                .map_or(0, |max| max.saturating_add(1));
            task.set_order(next, clock);
        }

        let id = task.id();
        self.tasks.insert_front(task);
        self.lifecycle
            .notify(TASK_ADDED_MESSAGE, NotificationKind::Success, clock.utc());
        self.publish(HubEvent::TaskAdded { task_id: id });
        self.commit();
        Some(id)
    }

    /// Applies a partial update to a task.
    ///
    /// Moving the task into `Done` schedules its archival; moving it out
    /// again cancels that when the configuration asks for it. Returns `false`
    /// for an unknown id.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> bool {
        let clock = self.clock.as_ref();
        let Some(previous) = self.tasks.apply_patch(id, &patch, clock) else {
            tracing::debug!(task_id = %id, "ignoring update of unknown task");
            return false;
        };
        let current = self.tasks.get(id).map_or(previous, Task::status);
        self.publish(HubEvent::TaskUpdated { task_id: id });

        match self
            .lifecycle
            .status_changed(id, previous, current, clock.utc())
        {
            StatusEffect::ArchiveScheduled(timer) => {
                tracing::info!(task_id = %id, %timer, "task completed");
                self.publish(HubEvent::TaskCompleted { task_id: id });
            }
            StatusEffect::ArchiveCancelled => {
                tracing::info!(task_id = %id, "task reopened before archival");
            }
            StatusEffect::Unchanged => {}
        }
        self.commit();
        true
    }

    /// Removes a task and opens its undo window.
    ///
    /// Returns the notification whose action restores the task.
    pub fn delete_task(&mut self, id: TaskId) -> Option<NotificationId> {
        let Some(task) = self.tasks.remove(id) else {
            tracing::debug!(task_id = %id, "ignoring delete of unknown task");
            return None;
        };
        let notification = self.lifecycle.task_deleted(task, self.clock.utc());
        self.publish(HubEvent::TaskDeleted {
            task_id: id,
            notification_id: notification,
        });
        self.commit();
        Some(notification)
    }

    /// Restores the task behind a live delete notification at the head of
    /// the collection. A no-op once the notification is gone.
    pub fn undo_delete(&mut self, notification: NotificationId) -> Option<TaskId> {
        let Some(task) = self.lifecycle.undo_delete(notification, self.clock.utc()) else {
            tracing::debug!(%notification, "undo window already closed");
            return None;
        };
        let id = task.id();
        self.tasks.insert_front(task);
        self.publish(HubEvent::TaskRestored { task_id: id });
        self.commit();
        Some(id)
    }

    /// Swaps an active task with its neighbour in manual order.
    ///
    /// Only meaningful under [`SortMode::Manual`]; other modes ignore it.
    pub fn move_adjacent(&mut self, id: TaskId, direction: MoveDirection) -> bool {
        if self.sort_mode != SortMode::Manual {
            tracing::debug!(task_id = %id, sort_mode = %self.sort_mode, "ignoring move outside manual sort");
            return false;
        }
        if !self.tasks.move_adjacent(id, direction, self.clock.as_ref()) {
            return false;
        }
        self.publish(HubEvent::TasksReordered { task_id: id });
        self.commit();
        true
    }

    /// Appends a subtask to a task.
    pub fn add_subtask(&mut self, task: TaskId, title: &str) -> Option<SubtaskId> {
        let clock = self.clock.as_ref();
        match self
            .tasks
            .with_task_mut(task, |target| target.add_subtask(title, clock))
        {
            Some(Ok(subtask)) => {
                self.task_changed(task);
                Some(subtask)
            }
            Some(Err(err)) => {
                tracing::debug!(task_id = %task, "ignoring add_subtask: {err}");
                None
            }
            None => None,
        }
    }

    /// Flips a subtask between open and completed.
    pub fn toggle_subtask(&mut self, task: TaskId, subtask: SubtaskId) -> bool {
        let clock = self.clock.as_ref();
        let toggled = self
            .tasks
            .with_task_mut(task, |target| target.toggle_subtask(subtask, clock))
            .unwrap_or(false);
        if toggled {
            self.task_changed(task);
        }
        toggled
    }

    /// Removes a subtask.
    pub fn delete_subtask(&mut self, task: TaskId, subtask: SubtaskId) -> bool {
        let clock = self.clock.as_ref();
        let removed = self
            .tasks
            .with_task_mut(task, |target| target.remove_subtask(subtask, clock))
            .unwrap_or(false);
        if removed {
            self.task_changed(task);
        }
        removed
    }

    /// Renames a subtask. Blank titles are ignored.
    pub fn rename_subtask(&mut self, task: TaskId, subtask: SubtaskId, title: &str) -> bool {
        let clock = self.clock.as_ref();
        let renamed = match self
            .tasks
            .with_task_mut(task, |target| target.rename_subtask(subtask, title, clock))
        {
            Some(Ok(renamed)) => renamed,
            Some(Err(err)) => {
                tracing::debug!(task_id = %task, "ignoring rename_subtask: {err}");
                false
            }
            None => false,
        };
        if renamed {
            self.task_changed(task);
        }
        renamed
    }

    /// Appends a timestamped comment to a task.
    pub fn add_comment(&mut self, task: TaskId, text: &str) -> Option<CommentId> {
        let clock = self.clock.as_ref();
        match self
            .tasks
            .with_task_mut(task, |target| target.add_comment(text, clock))
        {
            Some(Ok(comment)) => {
                self.task_changed(task);
                Some(comment)
            }
            Some(Err(err)) => {
                tracing::debug!(task_id = %task, "ignoring add_comment: {err}");
                None
            }
            None => None,
        }
    }

    /// Adds a goal with default attributes at the head of the collection.
    pub fn add_goal(&mut self, title: &str) -> Option<GoalId> {
        if !self.goals_enabled("add_goal") {
            return None;
        }
        let clock = self.clock.as_ref();
        let goal = match Goal::new(title, clock) {
            Ok(goal) => goal,
            Err(err) => {
                tracing::debug!("ignoring add_goal: {err}");
                return None;
            }
        };
        let id = goal.id();
        self.goals.insert_front(goal);
        self.lifecycle
            .notify(GOAL_ADDED_MESSAGE, NotificationKind::Success, clock.utc());
        self.publish(HubEvent::GoalAdded { goal_id: id });
        self.commit();
        Some(id)
    }

    /// Applies a partial update to a goal. A patch setting progress that
    /// reaches 100% for the first time marks the goal achieved.
    pub fn update_goal(&mut self, id: GoalId, patch: GoalPatch) -> bool {
        if !self.goals_enabled("update_goal") {
            return false;
        }
        if !self.goals.apply_patch(id, &patch, self.clock.as_ref()) {
            tracing::debug!(goal_id = %id, "ignoring update of unknown goal");
            return false;
        }
        if patch.sets_progress() {
            self.goal_progressed(id);
        } else {
            self.goal_changed(id);
        }
        true
    }

    /// Removes a goal. Goal deletion has no undo.
    pub fn delete_goal(&mut self, id: GoalId) -> bool {
        if !self.goals_enabled("delete_goal") {
            return false;
        }
        if self.goals.remove(id).is_none() {
            return false;
        }
        self.lifecycle
            .notify(GOAL_REMOVED_MESSAGE, NotificationKind::Info, self.clock.utc());
        self.publish(HubEvent::GoalDeleted { goal_id: id });
        self.commit();
        true
    }

    /// Appends a milestone to a goal; progress reflows over the new total.
    pub fn add_milestone(&mut self, goal: GoalId, title: &str) -> Option<MilestoneId> {
        if !self.goals_enabled("add_milestone") {
            return None;
        }
        let clock = self.clock.as_ref();
        match self
            .goals
            .with_goal_mut(goal, |target| target.add_milestone(title, clock))
        {
            Some(Ok(milestone)) => {
                self.goal_changed(goal);
                Some(milestone)
            }
            Some(Err(err)) => {
                tracing::debug!(goal_id = %goal, "ignoring add_milestone: {err}");
                None
            }
            None => None,
        }
    }

    /// Flips a milestone and recomputes the goal's progress from its
    /// milestones.
    pub fn toggle_milestone(&mut self, goal: GoalId, milestone: MilestoneId) -> bool {
        if !self.goals_enabled("toggle_milestone") {
            return false;
        }
        let clock = self.clock.as_ref();
        let toggled = self
            .goals
            .with_goal_mut(goal, |target| target.toggle_milestone(milestone, clock))
            .unwrap_or(false);
        if toggled {
            self.goal_progressed(goal);
        }
        toggled
    }

    /// Selects the sort policy for every ranked query.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Returns the current sort policy.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Chooses between the active and archived list.
    pub fn set_view_filter(&mut self, filter: ViewFilter) {
        self.view_filter = filter;
    }

    /// Returns the current list filter.
    #[must_use]
    pub const fn view_filter(&self) -> ViewFilter {
        self.view_filter
    }

    /// Dismisses a notification. Dismissing a delete notification closes its
    /// undo window.
    pub fn dismiss_notification(&mut self, notification: NotificationId) -> bool {
        self.lifecycle.dismiss(notification)
    }

    /// Fires every timer due at the clock's current time.
    ///
    /// Returns how many tasks were archived.
    pub fn tick(&mut self) -> usize {
        let clock = self.clock.as_ref();
        let now = clock.utc();
        let mut archived = 0;
        for id in self.lifecycle.advance(now) {
            let archived_now = self
                .tasks
                .with_task_mut(id, |task| {
                    if task.is_archived() {
                        return false;
                    }
                    task.archive(clock);
                    true
                })
                .unwrap_or(false);
            if !archived_now {
                tracing::debug!(task_id = %id, "archival skipped, task gone or already archived");
                continue;
            }
            tracing::info!(task_id = %id, "task archived");
            self.lifecycle
                .notify(ARCHIVED_MESSAGE, NotificationKind::Success, now);
            self.publish(HubEvent::TaskArchived { task_id: id });
            archived += 1;
        }
        if archived > 0 {
            self.commit();
        }
        archived
    }

    /// Returns when the next timer falls due, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.lifecycle.next_deadline()
    }

    /// Returns the list view: tasks under the current filter, ranked under
    /// the current sort mode.
    #[must_use]
    pub fn view(&self) -> Vec<&Task> {
        let now = self.clock.utc();
        match self.view_filter {
            ViewFilter::Active => rank(self.tasks.active(), self.sort_mode, now),
            ViewFilter::Archived => rank(self.tasks.archived(), self.sort_mode, now),
        }
    }

    /// Returns the board view, or `None` when the board is disabled.
    #[must_use]
    pub fn board(&self) -> Option<BoardView<'_>> {
        if !self.config.features.board {
            return None;
        }
        let ranked = rank(self.tasks.active(), self.sort_mode, self.clock.utc());
        Some(BoardView::from_ranked(&ranked))
    }

    /// Returns statistics over the active tasks, or `None` when reports are
    /// disabled.
    #[must_use]
    pub fn report(&self) -> Option<TaskReport> {
        self.config
            .features
            .reports
            .then(|| report(self.tasks.active(), self.clock.utc()))
    }

    /// Returns goals split by completion, or `None` when goals are disabled.
    #[must_use]
    pub fn goals_view(&self) -> Option<GoalsView<'_>> {
        if !self.config.features.goals {
            return None;
        }
        let goals = self.goals.all();
        let (completed, active): (Vec<&Goal>, Vec<&Goal>) =
            goals.iter().partition(|goal| goal.is_completed());
        Some(GoalsView {
            summary: goal_summary(goals),
            active,
            completed,
        })
    }

    /// Returns every task in collection order, archived ones included.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    /// Returns every goal in collection order.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        self.goals.all()
    }

    /// Finds a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Finds a goal.
    #[must_use]
    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(id)
    }

    /// Returns live notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.lifecycle.notifications()
    }

    /// Returns whether the task was just completed and awaits archival.
    #[must_use]
    pub fn is_recently_completed(&self, id: TaskId) -> bool {
        self.lifecycle.is_recently_completed(id)
    }

    /// Renders active and archived tasks as CSV, each section ranked under
    /// the current sort mode.
    #[must_use]
    pub fn export_csv(&self) -> String {
        let now = self.clock.utc();
        let active = rank(self.tasks.active(), self.sort_mode, now);
        let archived = rank(self.tasks.archived(), self.sort_mode, now);
        csv::render(&active, &archived)
    }

    /// Returns the persisted image of the collections.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.all().to_vec(),
            goals: self.goals.all().to_vec(),
        }
    }

    fn task_changed(&mut self, id: TaskId) {
        self.publish(HubEvent::TaskUpdated { task_id: id });
        self.commit();
    }

    fn goal_changed(&mut self, id: GoalId) {
        self.publish(HubEvent::GoalUpdated { goal_id: id });
        self.commit();
    }

    fn goal_progressed(&mut self, id: GoalId) {
        self.publish(HubEvent::GoalUpdated { goal_id: id });
        let clock = self.clock.as_ref();
        let lifecycle = &mut self.lifecycle;
        let achieved = self
            .goals
            .with_goal_mut(id, |goal| lifecycle.settle_goal(goal, clock))
            .unwrap_or(false);
        if achieved {
            self.publish(HubEvent::GoalAchieved { goal_id: id });
        }
        self.commit();
    }

    fn goals_enabled(&self, intent: &str) -> bool {
        let enabled = self.config.features.goals;
        if !enabled {
            tracing::debug!(intent, "ignoring goal intent, goals are disabled");
        }
        enabled
    }

    fn publish(&self, event: HubEvent) {
        self.events.dispatch(&event);
    }

    fn commit(&self) {
        if let Err(err) = self.repository.save(&self.snapshot()) {
            tracing::warn!("failed to save snapshot: {err}");
        }
    }
}

impl<R, C> std::fmt::Debug for TaskHub<R, C>
where
    R: SnapshotRepository,
    C: Clock,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHub")
            .field("config", &self.config)
            .field("tasks", &self.tasks.len())
            .field("goals", &self.goals.len())
            .field("sort_mode", &self.sort_mode)
            .field("view_filter", &self.view_filter)
            .finish_non_exhaustive()
    }
}
