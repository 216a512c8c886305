//! Goal aggregate root and milestone checklist.

use super::{GoalDomainError, GoalId, GoalPatch, MilestoneId, ParseTimeframeError};
use crate::aggregation::milestone_progress;
use crate::task::domain::{Category, non_blank};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Horizon a goal is planned against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Current calendar month.
    #[serde(rename = "This Month")]
    ThisMonth,
    /// Current quarter.
    #[default]
    #[serde(rename = "This Quarter")]
    ThisQuarter,
    /// Current year.
    #[serde(rename = "This Year")]
    ThisYear,
    /// No fixed horizon.
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl Timeframe {
    /// Every timeframe, shortest first.
    pub const ALL: [Self; 4] = [
        Self::ThisMonth,
        Self::ThisQuarter,
        Self::ThisYear,
        Self::LongTerm,
    ];

    /// Returns the display form used in snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisMonth => "This Month",
            Self::ThisQuarter => "This Quarter",
            Self::ThisYear => "This Year",
            Self::LongTerm => "Long-term",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Timeframe {
    type Error = ParseTimeframeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|timeframe| timeframe.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseTimeframeError(value.to_owned()))
    }
}

/// Checklist item nested under a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    id: MilestoneId,
    title: String,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Milestone {
    /// Creates an open milestone.
    #[must_use]
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: MilestoneId::new(),
            title: title.into(),
            completed: false,
            created_at,
        }
    }

    /// Returns the milestone identifier.
    #[must_use]
    pub const fn id(&self) -> MilestoneId {
        self.id
    }

    /// Returns the milestone title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the milestone has been reached.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns when the milestone was added.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the milestone as reached or open.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Goal aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    id: GoalId,
    title: String,
    category: Category,
    timeframe: Timeframe,
    #[serde(default, deserialize_with = "clamped_progress")]
    progress: u8,
    #[serde(default)]
    milestones: Vec<Milestone>,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGoalData {
    /// Persisted goal identifier.
    pub id: GoalId,
    /// Goal title.
    pub title: String,
    /// Category.
    pub category: Category,
    /// Planning horizon.
    pub timeframe: Timeframe,
    /// Progress percentage, 0 to 100.
    pub progress: u8,
    /// Milestone checklist.
    pub milestones: Vec<Milestone>,
    /// Whether the goal has been achieved.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Largest progress value.
    pub const MAX_PROGRESS: u8 = 100;

    /// Creates a goal with default attributes and no progress.
    ///
    /// # Errors
    ///
    /// Returns [`GoalDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: &str, clock: &impl Clock) -> Result<Self, GoalDomainError> {
        let trimmed = non_blank(title).ok_or(GoalDomainError::EmptyTitle)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: GoalId::new(),
            title: trimmed,
            category: Category::default(),
            timeframe: Timeframe::default(),
            progress: 0,
            milestones: Vec::new(),
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a goal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGoalData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            category: data.category,
            timeframe: data.timeframe,
            progress: data.progress.min(Self::MAX_PROGRESS),
            milestones: data.milestones,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the goal identifier.
    #[must_use]
    pub const fn id(&self) -> GoalId {
        self.id
    }

    /// Returns the goal title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the planning horizon.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns progress as a percentage.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns the milestones in insertion order.
    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Returns whether the goal has been achieved.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn apply(&mut self, patch: &GoalPatch, clock: &impl Clock) {
        if let Some(title) = patch.title.as_deref().and_then(non_blank) {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(timeframe) = patch.timeframe {
            self.timeframe = timeframe;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress.min(Self::MAX_PROGRESS);
        }
        self.touch(clock);
    }

    /// Appends a milestone; the larger denominator reflows progress.
    pub(crate) fn add_milestone(
        &mut self,
        title: &str,
        clock: &impl Clock,
    ) -> Result<MilestoneId, GoalDomainError> {
        let trimmed = non_blank(title).ok_or(GoalDomainError::EmptyMilestoneTitle)?;
        let milestone = Milestone::new(trimmed, clock.utc());
        let id = milestone.id();
        self.milestones.push(milestone);
        self.reflow_progress();
        self.touch(clock);
        Ok(id)
    }

    pub(crate) fn toggle_milestone(&mut self, id: MilestoneId, clock: &impl Clock) -> bool {
        let Some(milestone) = self.milestones.iter_mut().find(|m| m.id() == id) else {
            return false;
        };
        milestone.completed = !milestone.completed;
        self.reflow_progress();
        self.touch(clock);
        true
    }

    /// Flags the goal achieved the first time progress reaches 100.
    ///
    /// Returns `true` only on that first transition.
    pub(crate) fn settle_completion(&mut self, clock: &impl Clock) -> bool {
        if self.completed || self.progress < Self::MAX_PROGRESS {
            return false;
        }
        self.completed = true;
        self.touch(clock);
        true
    }

    fn reflow_progress(&mut self) {
        if !self.milestones.is_empty() {
            self.progress = milestone_progress(&self.milestones);
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn clamped_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(|progress| progress.min(Goal::MAX_PROGRESS))
}
