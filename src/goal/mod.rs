//! Goals with milestone-driven progress.

pub mod domain;
pub mod store;

pub use store::GoalStore;

#[cfg(test)]
mod tests;
