//! Port through which the hub loads and saves its snapshot.

use super::Snapshot;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot repository operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot persistence contract.
///
/// Saves are whole-snapshot and last-write-wins.
pub trait SnapshotRepository: Send + Sync {
    /// Loads the stored snapshot, or `None` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] for unreadable content and
    /// [`SnapshotError::Persistence`] for storage failures.
    fn load(&self) -> SnapshotResult<Option<Snapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Persistence`] when the write fails.
    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()>;
}

/// Errors returned by snapshot repositories.
#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    /// Stored content is not a valid snapshot.
    #[error("malformed snapshot: {0}")]
    Malformed(Arc<serde_json::Error>),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(err))
    }
}
