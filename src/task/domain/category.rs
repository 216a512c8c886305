//! Work categories shared by tasks and goals.

use super::ParseCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of work categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// Paid and organic digital campaigns.
    #[default]
    #[serde(rename = "Digital Marketing")]
    DigitalMarketing,
    /// Search engine optimisation.
    #[serde(rename = "SEO")]
    Seo,
    /// Business intelligence work.
    #[serde(rename = "Business Intelligence")]
    BusinessIntelligence,
    /// Analytics and measurement.
    Analytics,
    /// Website builds and maintenance.
    Websites,
    /// Administrative chores.
    Admin,
    /// Anything else.
    Misc,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::DigitalMarketing,
        Self::Seo,
        Self::BusinessIntelligence,
        Self::Analytics,
        Self::Websites,
        Self::Admin,
        Self::Misc,
    ];

    /// Returns the display form used in snapshots and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DigitalMarketing => "Digital Marketing",
            Self::Seo => "SEO",
            Self::BusinessIntelligence => "Business Intelligence",
            Self::Analytics => "Analytics",
            Self::Websites => "Websites",
            Self::Admin => "Admin",
            Self::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseCategoryError(value.to_owned()))
    }
}
