//! Hub configuration: feature toggles, default sort and lifecycle timings.
//!
//! The three application variants (full, tasks only, tasks with reports)
//! are presets over one [`HubConfig`].

use crate::ranking::SortMode;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Optional views enabled on a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// Goals, milestones and the goals view.
    pub goals: bool,
    /// Board view grouping active tasks by status.
    pub board: bool,
    /// Reports view.
    pub reports: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            goals: true,
            board: true,
            reports: true,
        }
    }
}

/// Hub configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HubConfig {
    /// Enabled optional views.
    pub features: FeatureToggles,
    /// Sort mode a fresh hub starts with.
    pub default_sort: SortMode,
    /// Delay between completing a task and archiving it.
    pub archive_delay_ms: u64,
    /// How long a deleted task can be restored.
    pub undo_window_ms: u64,
    /// Lifetime of ordinary notifications.
    pub notification_ttl_ms: u64,
    /// Deleted tasks kept for undo at once.
    pub undo_capacity: usize,
    /// Whether reopening a completed task cancels its pending archival.
    pub cancel_archive_on_reopen: bool,
    /// Period of the background timer driver.
    pub tick_interval_ms: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            features: FeatureToggles::default(),
            default_sort: SortMode::Smart,
            archive_delay_ms: 1000,
            undo_window_ms: 5000,
            notification_ttl_ms: 5000,
            undo_capacity: 16,
            cancel_archive_on_reopen: true,
            tick_interval_ms: 250,
        }
    }
}

/// Errors raised while loading a [`HubConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The timer driver period must be positive.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

impl HubConfig {
    /// Every view enabled.
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    /// Task list only, with no goals, board or reports.
    #[must_use]
    pub fn tasks_only() -> Self {
        Self {
            features: FeatureToggles {
                goals: false,
                board: false,
                reports: false,
            },
            ..Self::default()
        }
    }

    /// Task list and board with reports, but no goals.
    #[must_use]
    pub fn tasks_with_reports() -> Self {
        Self {
            features: FeatureToggles {
                goals: false,
                board: true,
                reports: true,
            },
            ..Self::default()
        }
    }

    /// Parses a configuration document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] for invalid JSON or mistyped
    /// values and [`ConfigError::ZeroTickInterval`] for a zero tick period.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        if config.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(config)
    }

    /// Archival delay as a signed duration.
    #[must_use]
    pub fn archive_delay(&self) -> TimeDelta {
        millis(self.archive_delay_ms)
    }

    /// Undo window as a signed duration.
    #[must_use]
    pub fn undo_window(&self) -> TimeDelta {
        millis(self.undo_window_ms)
    }

    /// Notification lifetime as a signed duration.
    #[must_use]
    pub fn notification_ttl(&self) -> TimeDelta {
        millis(self.notification_ttl_ms)
    }

    /// Timer driver period, never shorter than one millisecond.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

fn millis(value: u64) -> TimeDelta {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::MAX)
}
