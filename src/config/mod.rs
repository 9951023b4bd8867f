//! Configuration loaded from `.timeline.toml`.
//!
//! Every field has a default, so an absent or partial file is fine. Tables
//! are built once at start-up and only read afterwards.

mod core;
mod loader;

pub use self::core::{
    BucketMode, BucketingConfig, ClassificationConfig, EcosystemConfig, IconConfig, InputConfig,
    LabelConfig, OutputConfig, SiteConfig, TimelineConfig,
};
pub use loader::{
    discover_config, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

/// Written by `contrib-timeline init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# contrib-timeline configuration

[site]
title = "Open Contributions"
subtitle = "Small contributions add up over time."
# source_url = "https://example.org/my-timeline"
# stylesheet = "style.css"

[input]
files = ["data/timeline.tsv"]

[output]
path = "site/index.xhtml"

[bucketing]
# "year" keeps full history; "month" keeps the last `lookback_months`
mode = "year"
lookback_months = 36

[classification]
translation_projects = ["translatewiki.net"]

[icons]
service = "https://icons.duckduckgo.com/ip3/"
fallback = "example.com"

[ecosystems]
# "other" or { absorb = "wikimedia" }
unknown_policy = "other"
order = ["wikimedia", "osm", "github", "explainxkcd", "fandom"]
"#;
