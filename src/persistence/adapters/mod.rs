//! Snapshot repository adapters.

mod json_file;
mod memory;

pub use json_file::JsonFileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
