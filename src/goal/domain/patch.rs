//! Partial goal updates.

use super::Timeframe;
use crate::task::domain::Category;

/// Partial goal update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub(crate) title: Option<String>,
    pub(crate) category: Option<Category>,
    pub(crate) timeframe: Option<Timeframe>,
    pub(crate) progress: Option<u8>,
}

impl GoalPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title. Blank titles are ignored when the patch is applied.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the timeframe.
    #[must_use]
    pub const fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    /// Sets progress directly. Values above 100 are clamped.
    #[must_use]
    pub const fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Returns whether the patch sets progress.
    #[must_use]
    pub const fn sets_progress(&self) -> bool {
        self.progress.is_some()
    }
}
