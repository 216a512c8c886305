//! Store facade exposing the command set used by the presentation layer.
//!
//! [`TaskHub`] owns the task and goal collections together with their
//! lifecycle side effects, saves a [`crate::persistence::Snapshot`] after
//! every committed change and publishes [`HubEvent`]s to subscribers.

mod events;
mod service;
mod views;

pub use events::{EventSink, EventSinkError, HubEvent, TracingSink};
pub use service::TaskHub;
pub use views::{BoardColumn, BoardView, GoalsView, ViewFilter};

#[cfg(test)]
mod tests;
