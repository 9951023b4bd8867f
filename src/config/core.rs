use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::bucket::{WindowPolicy, DEFAULT_LOOKBACK_MONTHS};
use crate::classify::{Classifier, DEFAULT_TRANSLATION_PROJECTS};
use crate::core::{Category, ContributionRecord, Ecosystem, UnknownEcosystemPolicy};
use crate::errors::{Result, TimelineError};

/// Root configuration structure, read from `.timeline.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub site: SiteConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub bucketing: BucketingConfig,
    pub classification: ClassificationConfig,
    pub icons: IconConfig,
    pub ecosystems: EcosystemConfig,
    pub labels: LabelConfig,
}

impl TimelineConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.bucketing.mode == BucketMode::Month && self.bucketing.lookback_months == 0 {
            return Err(TimelineError::config(
                "bucketing.lookback_months must be positive in month mode",
            ));
        }
        if self.icons.service.trim().is_empty() {
            return Err(TimelineError::config("icons.service must not be empty"));
        }

        let mut seen = HashSet::new();
        for ecosystem in &self.ecosystems.order {
            if !ecosystem.is_known() {
                return Err(TimelineError::config(format!(
                    "ecosystems.order contains unknown ecosystem `{ecosystem}`"
                )));
            }
            if !seen.insert(ecosystem.key()) {
                return Err(TimelineError::config(format!(
                    "ecosystems.order lists `{ecosystem}` twice"
                )));
            }
        }

        if let Some(unknown) = self
            .labels
            .categories
            .keys()
            .find(|key| Category::from_key(key).is_none())
        {
            return Err(TimelineError::config(format!(
                "labels.categories has unknown category `{unknown}`"
            )));
        }
        Ok(())
    }

    pub fn window_policy(&self) -> WindowPolicy {
        self.bucketing.window_policy()
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.classification.translation_projects.iter().cloned())
    }

    pub fn ecosystem_label(&self, ecosystem: &Ecosystem) -> String {
        self.labels
            .ecosystems
            .get(ecosystem.key())
            .cloned()
            .unwrap_or_else(|| ecosystem.default_label().to_string())
    }

    pub fn category_label(&self, category: Category) -> String {
        self.labels
            .categories
            .get(category.key())
            .cloned()
            .unwrap_or_else(|| category.default_label().to_string())
    }

    /// Ecosystems shown as filters and footer lines, in display order.
    ///
    /// Known ecosystems left out of `ecosystems.order` follow the listed ones
    /// in their default order, so every record stays filterable.
    pub fn display_ecosystems(&self) -> Vec<Ecosystem> {
        let mut ecosystems = self.ecosystems.order.clone();
        for known in Ecosystem::known() {
            if !ecosystems.contains(known) {
                ecosystems.push(known.clone());
            }
        }
        if self.ecosystems.unknown_policy.shows_other() {
            ecosystems.push(Ecosystem::Unknown(String::new()));
        }
        ecosystems
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub subtitle: String,
    pub lang: String,
    /// Link to the generator's source code, shown in the footer
    pub source_url: Option<String>,
    /// Extra stylesheet linked after the inline styles
    pub stylesheet: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Open Contributions".to_string(),
            subtitle: "Small contributions add up over time.".to_string(),
            lang: "en".to_string(),
            source_url: None,
            stylesheet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Record tables read when no inputs are given on the command line
    pub files: Vec<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from("data/timeline.tsv")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("site/index.xhtml"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BucketMode {
    /// One section per calendar year, full history
    #[default]
    Year,
    /// One section per month within the lookback window
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketingConfig {
    pub mode: BucketMode,
    pub lookback_months: u32,
}

impl Default for BucketingConfig {
    fn default() -> Self {
        Self {
            mode: BucketMode::Year,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
        }
    }
}

impl BucketingConfig {
    pub fn window_policy(&self) -> WindowPolicy {
        match self.mode {
            BucketMode::Year => WindowPolicy::Year,
            BucketMode::Month => WindowPolicy::MonthLookback {
                months: self.lookback_months,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Wikis whose language subpages count as translations
    pub translation_projects: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            translation_projects: DEFAULT_TRANSLATION_PROJECTS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Favicon service; the domain and `.ico` are appended
    pub service: String,
    /// Domain used when neither the record nor its ecosystem has one
    pub fallback: String,
    /// Per-ecosystem overrides keyed by ecosystem key
    pub ecosystems: BTreeMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            service: "https://icons.duckduckgo.com/ip3/".to_string(),
            fallback: "example.com".to_string(),
            ecosystems: BTreeMap::new(),
        }
    }
}

impl IconConfig {
    /// Icon domain: record hint first, then any configured override before the
    /// ecosystem default. Falls back to `fallback`.
    pub fn domain_for<'a>(&'a self, record: &'a ContributionRecord) -> &'a str {
        record
            .icon_hint
            .as_deref()
            .filter(|hint| !hint.trim().is_empty())
            .or_else(|| self.ecosystems.get(record.ecosystem.key()).map(String::as_str))
            .or_else(|| record.ecosystem.default_icon_domain())
            .unwrap_or(&self.fallback)
    }

    pub fn url_for(&self, record: &ContributionRecord) -> String {
        format!("{}{}.ico", self.service, self.domain_for(record))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemConfig {
    pub unknown_policy: UnknownEcosystemPolicy,
    /// Preferred display order; unlisted known ecosystems are appended
    pub order: Vec<Ecosystem>,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            unknown_policy: UnknownEcosystemPolicy::default(),
            order: Ecosystem::known().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub ecosystems: BTreeMap<String, String>,
    pub categories: BTreeMap<String, String>,
}
