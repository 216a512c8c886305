//! Task records and their in-memory store.
//!
//! - Domain types in [`domain`]
//! - The ordered collection in [`store`]

pub mod domain;
pub mod store;

pub use store::{MoveDirection, TaskStore};

#[cfg(test)]
mod tests;
