//! End-to-end pipeline: Classifier → Aggregator → Bucketizer → Renderer.
//!
//! Input is already-normalized record lists, one per source. Every stage is
//! pure and in-memory; reading tables and writing the page happen outside.

use crate::aggregate::merge_with_report;
use crate::bucket::{Bucketing, Bucketizer};
use crate::classify::Classifier;
use crate::config::TimelineConfig;
use crate::core::ContributionRecord;
use crate::errors::RecordIssue;
use crate::render::{Renderer, StaticDocument};
use chrono::{DateTime, Utc};
use tracing::{info, info_span};

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub bucketing: Bucketing,
    pub document: StaticDocument,
    /// Records dropped along the way
    pub issues: Vec<RecordIssue>,
}

pub struct Pipeline<'a> {
    config: &'a TimelineConfig,
    classifier: Classifier,
    now: DateTime<Utc>,
}

impl<'a> Pipeline<'a> {
    /// `now` anchors the lookback window and stamps the page.
    pub fn new(config: &'a TimelineConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            classifier: config.classifier(),
            now,
        }
    }

    /// Merge and bucket without rendering.
    pub fn bucket(&self, sources: Vec<Vec<ContributionRecord>>) -> (Bucketing, Vec<RecordIssue>) {
        let input_count: usize = sources.iter().map(Vec::len).sum();

        let report = {
            let _span = info_span!("merge", sources = sources.len(), records = input_count).entered();
            merge_with_report(sources)
        };
        info!(
            kept = report.entries.len(),
            dropped = report.issues.len(),
            "Merged contribution records"
        );

        let bucketing = {
            let policy = self.config.window_policy();
            let _span = info_span!("bucket", policy = ?policy).entered();
            Bucketizer::new(
                policy,
                &self.classifier,
                &self.config.ecosystems.unknown_policy,
            )
            .bucket(report.entries, self.now)
        };
        info!(
            buckets = bucketing.buckets.len(),
            records = bucketing.tallies.total,
            outside_window = bucketing.discarded,
            "Bucketed timeline"
        );

        (bucketing, report.issues)
    }

    pub fn run(&self, sources: Vec<Vec<ContributionRecord>>) -> PipelineOutcome {
        let (bucketing, issues) = self.bucket(sources);

        let document = {
            let _span = info_span!("render").entered();
            Renderer::new(self.config).render(&bucketing, self.now)
        };

        PipelineOutcome {
            bucketing,
            document,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BucketMode;
    use crate::core::{Category, Ecosystem};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_run_combines_sources() {
        let config = TimelineConfig::default();
        let github = vec![
            ContributionRecord::new("g1", Ecosystem::GitHub, "pr", "2024-01-02")
                .with_title("Opened PR: Fix bug"),
            ContributionRecord::new("g2", Ecosystem::GitHub, "review", "2024-01-02")
                .with_title("Reviewed PR: X"),
        ];
        let osm = vec![ContributionRecord::new("o1", Ecosystem::OpenStreetMap, "changeset", "garbage")];

        let outcome = Pipeline::new(&config, now()).run(vec![github, osm]);

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.bucketing.buckets.len(), 1);
        let bucket = &outcome.bucketing.buckets[0];
        assert_eq!(bucket.key.to_string(), "2024");
        assert_eq!(bucket.count(), 2);
        let categories: Vec<_> = bucket.entries.iter().map(|e| e.category).collect();
        assert_eq!(categories, vec![Category::Code, Category::Discussion]);
        assert_eq!(outcome.document.record_count, 2);
    }

    #[test]
    fn test_month_mode_from_config() {
        let mut config = TimelineConfig::default();
        config.bucketing.mode = BucketMode::Month;
        config.bucketing.lookback_months = 12;
        let records = vec![
            ContributionRecord::new("new", Ecosystem::Wikimedia, "edit", "2026-05-01"),
            ContributionRecord::new("old", Ecosystem::Wikimedia, "edit", "2020-05-01"),
        ];

        let outcome = Pipeline::new(&config, now()).run(vec![records]);

        assert_eq!(outcome.bucketing.discarded, 1);
        assert!(outcome.document.as_str().contains("id=\"month-2026-05\""));
    }

    #[test]
    fn test_empty_run_produces_document() {
        let config = TimelineConfig::default();
        let outcome = Pipeline::new(&config, now()).run(Vec::new());

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.document.section_count, 0);
        assert!(outcome.document.as_str().contains("Total: 0 contributions"));
    }
}
