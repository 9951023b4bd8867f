use super::{input_paths, load_sources};
use crate::config::{BucketMode, TimelineConfig};
use crate::io;
use crate::pipeline::{Pipeline, PipelineOutcome};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Command-line overrides for `build`.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub mode: Option<BucketMode>,
    pub lookback_months: Option<u32>,
}

impl BuildConfig {
    /// Fold the overrides into a copy of the loaded config.
    fn apply(&self, config: &TimelineConfig) -> Result<TimelineConfig> {
        let mut effective = config.clone();
        if let Some(mode) = self.mode {
            effective.bucketing.mode = mode;
        }
        if let Some(months) = self.lookback_months {
            effective.bucketing.lookback_months = months;
        }
        if let Some(output) = &self.output {
            effective.output.path = output.clone();
        }
        effective.validate()?;
        Ok(effective)
    }
}

/// Read, classify, bucket and render, then write the page.
pub fn run_build(options: BuildConfig, config: &TimelineConfig) -> Result<PipelineOutcome> {
    run_build_at(options, config, Utc::now())
}

/// Same as [`run_build`] with a fixed clock.
pub fn run_build_at(
    options: BuildConfig,
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> Result<PipelineOutcome> {
    let effective = options.apply(config)?;
    let paths = input_paths(options.inputs, &effective);
    let loaded = load_sources(&paths, false)?;

    let mut outcome = Pipeline::new(&effective, now).run(loaded.sources);
    let mut issues = loaded.issues;
    issues.append(&mut outcome.issues);
    outcome.issues = issues;

    let output = &effective.output.path;
    io::write_file(output, outcome.document.as_str())
        .with_context(|| format!("Failed to write timeline to {}", output.display()))?;

    if !outcome.issues.is_empty() {
        tracing::warn!(
            skipped = outcome.issues.len(),
            "Some records were skipped; rerun with -v for details"
        );
    }
    tracing::info!(
        path = %output.display(),
        records = outcome.document.record_count,
        sections = outcome.document.section_count,
        "Generated timeline"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use indoc::indoc;
    use tempfile::TempDir;

    const TABLE: &str = indoc! {"
        id\tecosystem\ttype\tdate\ttitle\turl\tproject
        A\tgithub\tpr\t2024-01-02\tOpened PR: Fix bug\thttps://github.com/o/r/pull/1\to/r
        B\tgithub\treview\t2024-01-02\tReviewed PR: X\thttps://github.com/o/r/pull/2\to/r
        C\tosm\tchangeset\tnot a date\tChangeset\thttps://osm.org/changeset/1\tosm
    "};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_build_writes_document() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("timeline.tsv");
        std::fs::write(&input, TABLE).unwrap();
        let output = dir.path().join("site").join("index.xhtml");

        let options = BuildConfig {
            inputs: vec![input],
            output: Some(output.clone()),
            ..Default::default()
        };
        let outcome = run_build_at(options, &TimelineConfig::default(), now()).unwrap();

        assert_eq!(outcome.document.record_count, 2);
        assert_eq!(outcome.issues.len(), 1);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("id=\"year-2024\""));
    }

    #[test]
    fn test_build_rejects_zero_lookback() {
        let options = BuildConfig {
            mode: Some(BucketMode::Month),
            lookback_months: Some(0),
            ..Default::default()
        };
        assert!(run_build_at(options, &TimelineConfig::default(), now()).is_err());
    }
}
