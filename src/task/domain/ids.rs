//! Identifier types for the task domain.

use crate::ids::uuid_id;

uuid_id!(
    /// Unique identifier for a task record.
    TaskId
);

uuid_id!(
    /// Identifier for a subtask, unique within its parent task.
    SubtaskId
);

uuid_id!(
    /// Identifier for a comment, unique within its parent task.
    CommentId
);
