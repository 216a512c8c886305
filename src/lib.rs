//! TaskHub: task and goal tracking core.
//!
//! This crate ranks tasks under several sort policies, runs the timed side
//! effects of task changes (archival after completion, undo after deletion)
//! and derives progress and report figures from nested checklists.
//!
//! # Architecture
//!
//! - **Domain**: tasks and goals with private state ([`task`], [`goal`])
//! - **Pure engines**: [`ranking`], [`aggregation`] and [`report`]
//! - **Side effects**: timers, notifications and undo in [`lifecycle`]
//! - **Facade**: [`hub::TaskHub`], the single store with a fixed command set
//! - **Ports and adapters**: snapshot persistence in [`persistence`]
//!
//! # Modules
//!
//! - [`config`]: feature toggles and lifecycle timings
//! - [`export`]: CSV rendering
//! - [`runtime`]: tokio driver for hub timers

pub mod aggregation;
pub mod config;
pub mod export;
pub mod goal;
pub mod hub;
mod ids;
pub mod lifecycle;
pub mod persistence;
pub mod ranking;
pub mod report;
pub mod runtime;
pub mod task;

#[cfg(test)]
mod test_support;
