pub mod category;
pub mod ecosystem;

pub use category::Category;
pub use ecosystem::{Ecosystem, EcosystemKind, UnknownEcosystemPolicy, OTHER_ECOSYSTEM_KEY};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One public contribution, as supplied by a fetch collaborator.
///
/// Records are never mutated by the pipeline; each stage wraps them in a new
/// view ([`TimelineEntry`], [`ClassifiedEntry`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Unique per source and action, e.g. `github-pr-42`
    pub id: String,
    pub ecosystem: Ecosystem,
    /// Source-specific subtype: `commit`, `pr`, `edit`, `changeset`...
    pub raw_type: String,
    /// ISO-8601 timestamp, parsed by the aggregator
    pub timestamp: String,
    pub title: String,
    pub url: String,
    /// Enclosing repository or wiki name
    pub project: String,
    /// Favicon domain overriding the ecosystem default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_hint: Option<String>,
}

impl ContributionRecord {
    pub fn new(
        id: impl Into<String>,
        ecosystem: Ecosystem,
        raw_type: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ecosystem,
            raw_type: raw_type.into(),
            timestamp: timestamp.into(),
            title: String::new(),
            url: String::new(),
            project: String::new(),
            icon_hint: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_icon_hint(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        self.icon_hint = (!icon.is_empty()).then_some(icon);
        self
    }
}

/// A record whose timestamp has been parsed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub record: ContributionRecord,
    /// Parsed instant, keeping the offset the source reported
    pub at: DateTime<FixedOffset>,
}

/// A timeline entry with its derived category and display ecosystem.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassifiedEntry {
    pub entry: TimelineEntry,
    pub category: Category,
    /// Ecosystem used for filters and tallies after the unknown-ecosystem
    /// policy has been applied
    pub display_ecosystem: Ecosystem,
}

impl ClassifiedEntry {
    pub fn record(&self) -> &ContributionRecord {
        &self.entry.record
    }

    pub fn at(&self) -> DateTime<FixedOffset> {
        self.entry.at
    }
}
