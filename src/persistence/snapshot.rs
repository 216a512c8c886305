//! Serialisable image of every task and goal.

use super::{SnapshotError, SnapshotResult};
use crate::goal::domain::Goal;
use crate::task::domain::Task;
use serde::{Deserialize, Serialize};

/// Everything the hub persists. Carries no schema version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Tasks in collection order, archived ones included.
    pub tasks: Vec<Task>,
    /// Goals in collection order.
    pub goals: Vec<Goal>,
}

impl Snapshot {
    /// Parses a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns [`super::SnapshotError::Malformed`] when the document is not a
    /// JSON object describing a snapshot.
    pub fn from_json(document: &str) -> SnapshotResult<Self> {
        let value: serde_json::Value = serde_json::from_str(document)?;
        if !value.is_object() {
            let shape = <serde_json::Error as serde::de::Error>::custom(
                "snapshot document must be a JSON object",
            );
            return Err(SnapshotError::from(shape));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Renders the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`super::SnapshotError::Malformed`] if serialisation fails.
    pub fn to_json(&self) -> SnapshotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
