//! In-memory snapshot repository for tests and ephemeral hubs.

use crate::persistence::{Snapshot, SnapshotError, SnapshotRepository, SnapshotResult};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory snapshot store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    state: Arc<RwLock<InMemorySnapshotState>>,
}

#[derive(Debug, Default)]
struct InMemorySnapshotState {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl InMemorySnapshotRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository already holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemorySnapshotState {
                snapshot: Some(snapshot),
                saves: 0,
            })),
        }
    }

    /// Returns the most recently saved snapshot.
    #[must_use]
    pub fn stored(&self) -> Option<Snapshot> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.snapshot.clone())
    }

    /// Returns how many times [`SnapshotRepository::save`] succeeded.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.saves)
    }
}

fn poisoned(err: impl std::fmt::Display) -> SnapshotError {
    SnapshotError::persistence(std::io::Error::other(err.to_string()))
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.snapshot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.snapshot = Some(snapshot.clone());
        state.saves += 1;
        Ok(())
    }
}
