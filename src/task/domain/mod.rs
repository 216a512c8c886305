//! Domain model for tasks.
//!
//! Tasks carry status, priority, category, a due date and nested subtasks
//! and comments. All infrastructure concerns stay outside this boundary.

mod category;
mod checklist;
mod error;
mod ids;
mod patch;
mod task;

pub use category::Category;
pub use checklist::{Comment, Subtask};
pub use error::{ParseCategoryError, ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, SubtaskId, TaskId};
pub use patch::TaskPatch;
pub use task::{PersistedTaskData, Priority, Task, TaskStatus, due_instant};

pub(crate) use task::non_blank;
