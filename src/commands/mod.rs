//! CLI command implementations.
//!
//! - **build**: read record tables and write the timeline page
//! - **merge**: combine per-source tables into one recency-ordered table
//! - **stats**: print counts without rendering
//! - **init**: write a default `.timeline.toml`
//!
//! Commands return `anyhow::Result`; library errors are wrapped with the
//! path or step that failed.

pub mod build;
pub mod init;
pub mod merge;
pub mod stats;

pub use build::{run_build, BuildConfig};
pub use init::init_config;
pub use merge::run_merge;
pub use stats::{collect_stats, print_stats, StatsReport};

use crate::config::{load_config, load_config_from, TimelineConfig};
use crate::core::ContributionRecord;
use crate::errors::RecordIssue;
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Explicit `--config` is fatal on error; discovery falls back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<TimelineConfig> {
    match explicit {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(load_config()),
    }
}

/// Record lists read from disk, one per table, plus skipped rows.
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub sources: Vec<Vec<ContributionRecord>>,
    pub issues: Vec<RecordIssue>,
    pub missing: Vec<PathBuf>,
}

/// Read every table in `paths`.
///
/// With `skip_missing`, absent files are logged and recorded instead of
/// failing the command.
pub fn load_sources(paths: &[PathBuf], skip_missing: bool) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();

    for path in paths {
        if skip_missing && !path.exists() {
            tracing::warn!(path = %path.display(), "Input table not found, skipping");
            loaded.missing.push(path.clone());
            continue;
        }

        let report = io::read_table(path)
            .with_context(|| format!("Failed to read record table {}", path.display()))?;
        loaded.issues.extend(report.issues);
        loaded.sources.push(report.records);
    }

    Ok(loaded)
}

/// CLI inputs win over `input.files` from config.
pub(crate) fn input_paths(cli_inputs: Vec<PathBuf>, config: &TimelineConfig) -> Vec<PathBuf> {
    if cli_inputs.is_empty() {
        config.input.files.clone()
    } else {
        cli_inputs
    }
}
