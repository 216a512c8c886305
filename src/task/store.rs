//! In-memory ordered task collection.

use crate::task::domain::{Task, TaskId, TaskPatch, TaskStatus};
use mockable::Clock;
use std::collections::HashMap;

/// Direction for a manual adjacent swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards the head of the list.
    Up,
    /// Towards the tail of the list.
    Down,
}

/// Ordered task collection owning every live task.
///
/// Position in the collection is the insertion order used to break ranking
/// ties; the `order` field only matters under manual sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks` in the given order.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns every task, archived ones included.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns tasks that are not archived, in collection order.
    pub fn active(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.is_archived())
    }

    /// Returns archived tasks, in collection order.
    pub fn archived(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_archived())
    }

    /// Returns the largest `order` value, if any task exists.
    #[must_use]
    pub fn max_order(&self) -> Option<i64> {
        self.tasks.iter().map(Task::order).max()
    }

    /// Inserts a task at the head of the collection.
    pub fn insert_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Removes a task and returns it.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    /// Applies a patch and returns the status the task held before it.
    ///
    /// Returns `None` when no task has the identifier.
    pub fn apply_patch(
        &mut self,
        id: TaskId,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Option<TaskStatus> {
        self.with_task_mut(id, |task| task.apply(patch, clock))
    }

    /// Runs `f` against the task with the identifier.
    pub(crate) fn with_task_mut<R>(
        &mut self,
        id: TaskId,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Option<R> {
        self.tasks.iter_mut().find(|task| task.id() == id).map(f)
    }

    /// Pushes every task one slot down to make room for a new head at 0.
    pub(crate) fn shift_orders(&mut self, clock: &impl Clock) {
        for task in &mut self.tasks {
            task.set_order(task.order().saturating_add(1), clock);
        }
    }

    /// Swaps an active task with its neighbour under manual order.
    ///
    /// Active tasks are renumbered densely from 0 and placed ahead of the
    /// archived ones, which keep their order values. Returns `false` when the
    /// task is unknown, archived, or already at the boundary.
    pub fn move_adjacent(
        &mut self,
        id: TaskId,
        direction: MoveDirection,
        clock: &impl Clock,
    ) -> bool {
        let mut ranked: Vec<TaskId> = {
            let mut active: Vec<&Task> = self.active().collect();
            active.sort_by_key(|task| task.order());
            active.iter().map(|task| task.id()).collect()
        };

        let Some(position) = ranked.iter().position(|candidate| *candidate == id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => position
                .checked_add(1)
                .filter(|next| *next < ranked.len()),
        };
        let Some(neighbour) = target else {
            return false;
        };
        ranked.swap(position, neighbour);

        let (active, archived): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| !task.is_archived());
        let mut by_id: HashMap<TaskId, Task> =
            active.into_iter().map(|task| (task.id(), task)).collect();

        let mut reordered = Vec::with_capacity(by_id.len() + archived.len());
        for (index, task_id) in ranked.iter().enumerate() {
            if let Some(mut task) = by_id.remove(task_id) {
                task.set_order(i64::try_from(index).unwrap_or(i64::MAX), clock);
                reordered.push(task);
            }
        }
        reordered.extend(archived);
        self.tasks = reordered;
        true
    }
}
