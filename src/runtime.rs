//! Background driver that fires hub timers on a tokio interval.

use crate::hub::TaskHub;
use crate::persistence::SnapshotRepository;
use mockable::Clock;
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors raised while starting the timer driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TickerError {
    /// The hub lock was poisoned before the driver could read its period.
    #[error("hub lock poisoned")]
    LockPoisoned,
}

/// Spawns a task calling [`TaskHub::tick`] every
/// [`crate::config::HubConfig::tick_interval`].
///
/// The driver holds only a weak reference and stops once the hub is dropped
/// or its lock is poisoned. Abort the returned handle to stop it earlier.
///
/// # Errors
///
/// Returns [`TickerError::LockPoisoned`] when the hub lock is poisoned.
pub fn spawn_ticker<R, C>(hub: &Arc<Mutex<TaskHub<R, C>>>) -> Result<JoinHandle<()>, TickerError>
where
    R: SnapshotRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let period = hub
        .lock()
        .map_err(|_| TickerError::LockPoisoned)?
        .config()
        .tick_interval();
    let weak = Arc::downgrade(hub);
    tracing::debug!(period_ms = period.as_millis(), "hub ticker started");
    Ok(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if !tick_once(&weak) {
                break;
            }
        }
        tracing::debug!("hub ticker stopped");
    }))
}

fn tick_once<R, C>(hub: &Weak<Mutex<TaskHub<R, C>>>) -> bool
where
    R: SnapshotRepository,
    C: Clock,
{
    let Some(shared) = hub.upgrade() else {
        return false;
    };
    let Ok(mut guard) = shared.lock() else {
        tracing::warn!("hub lock poisoned, stopping ticker");
        return false;
    };
    let archived = guard.tick();
    if archived > 0 {
        tracing::debug!(archived, "ticker archived tasks");
    }
    true
}
