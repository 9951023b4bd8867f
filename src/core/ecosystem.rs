//! Origin platforms of contributions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level platform a contribution came from.
///
/// Tags outside the known set are preserved in [`Ecosystem::Unknown`] so they
/// round-trip through the record table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ecosystem {
    GitHub,
    Wikimedia,
    OpenStreetMap,
    ExplainXkcd,
    Fandom,
    Unknown(String),
}

/// Broad family of an ecosystem; drives classifier dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcosystemKind {
    CodeHosting,
    WikiFederation,
    MapEditing,
    Wiki,
    Unknown,
}

static KNOWN_ECOSYSTEMS: [Ecosystem; 5] = [
    Ecosystem::Wikimedia,
    Ecosystem::OpenStreetMap,
    Ecosystem::GitHub,
    Ecosystem::ExplainXkcd,
    Ecosystem::Fandom,
];

/// Display key used for every ecosystem outside the known set.
pub const OTHER_ECOSYSTEM_KEY: &str = "other";

impl Ecosystem {
    /// Parse a tag as written by the fetchers. Matching is case-insensitive.
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "github" => Self::GitHub,
            "wikimedia" => Self::Wikimedia,
            "osm" | "openstreetmap" => Self::OpenStreetMap,
            "explainxkcd" => Self::ExplainXkcd,
            "fandom" => Self::Fandom,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }

    /// Known ecosystems, in their default display order.
    pub fn known() -> &'static [Ecosystem] {
        &KNOWN_ECOSYSTEMS
    }

    /// Stable key used for filters, data attributes and config tables.
    pub fn key(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::Wikimedia => "wikimedia",
            Self::OpenStreetMap => "osm",
            Self::ExplainXkcd => "explainxkcd",
            Self::Fandom => "fandom",
            Self::Unknown(_) => OTHER_ECOSYSTEM_KEY,
        }
    }

    /// Tag as it should be written back to a record table.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Unknown(tag) => tag,
            known => known.key(),
        }
    }

    pub fn kind(&self) -> EcosystemKind {
        match self {
            Self::GitHub => EcosystemKind::CodeHosting,
            Self::Wikimedia => EcosystemKind::WikiFederation,
            Self::OpenStreetMap => EcosystemKind::MapEditing,
            Self::ExplainXkcd | Self::Fandom => EcosystemKind::Wiki,
            Self::Unknown(_) => EcosystemKind::Unknown,
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Wikimedia => "Wikimedia",
            Self::OpenStreetMap => "OpenStreetMap",
            Self::ExplainXkcd => "explain xkcd",
            Self::Fandom => "Fandom",
            Self::Unknown(_) => "Other",
        }
    }

    /// Favicon domain used when a record carries no icon hint.
    pub fn default_icon_domain(&self) -> Option<&'static str> {
        match self {
            Self::GitHub => Some("github.com"),
            Self::Wikimedia => Some("wikipedia.org"),
            Self::OpenStreetMap => Some("openstreetmap.org"),
            Self::ExplainXkcd => Some("explainxkcd.com"),
            Self::Fandom => Some("fandom.com"),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// How ecosystems outside the known set are shown in filters and tallies.
///
/// Classification always sees the record's own ecosystem; this only affects
/// display grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownEcosystemPolicy {
    /// Keep them apart under the `other` key
    #[default]
    Other,
    /// Fold them into the given ecosystem
    Absorb(Ecosystem),
}

impl UnknownEcosystemPolicy {
    pub fn resolve(&self, ecosystem: &Ecosystem) -> Ecosystem {
        match self {
            _ if ecosystem.is_known() => ecosystem.clone(),
            Self::Other => ecosystem.clone(),
            Self::Absorb(target) => target.clone(),
        }
    }

    /// Whether an `other` filter and tally line are needed.
    pub fn shows_other(&self) -> bool {
        match self {
            Self::Other => true,
            Self::Absorb(target) => !target.is_known(),
        }
    }
}

impl From<String> for Ecosystem {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<Ecosystem> for String {
    fn from(ecosystem: Ecosystem) -> Self {
        ecosystem.as_tag().to_string()
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
