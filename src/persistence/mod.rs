//! Snapshot persistence: the port the hub saves through and its adapters.

pub mod adapters;
mod ports;
mod snapshot;

pub use adapters::{InMemorySnapshotRepository, JsonFileSnapshotRepository};
pub use ports::{SnapshotError, SnapshotRepository, SnapshotResult};
pub use snapshot::Snapshot;
