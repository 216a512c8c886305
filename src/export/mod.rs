//! Export formats for the task collection.

pub mod csv;
