use super::{input_paths, load_sources};
use crate::bucket::Bucketing;
use crate::config::TimelineConfig;
use crate::core::Category;
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledCount {
    pub key: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: String,
    pub count: usize,
}

/// Counts shown by `stats`, in the page's display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total: usize,
    pub skipped: usize,
    pub outside_window: usize,
    pub ecosystems: Vec<LabeledCount>,
    pub categories: Vec<LabeledCount>,
    pub buckets: Vec<BucketCount>,
}

impl StatsReport {
    pub fn from_bucketing(bucketing: &Bucketing, config: &TimelineConfig, skipped: usize) -> Self {
        let ecosystems = config
            .display_ecosystems()
            .iter()
            .map(|ecosystem| LabeledCount {
                key: ecosystem.key().to_string(),
                label: config.ecosystem_label(ecosystem),
                count: bucketing.tallies.ecosystem(ecosystem.key()),
            })
            .collect();

        let categories = Category::ALL
            .iter()
            .map(|&category| LabeledCount {
                key: category.key().to_string(),
                label: config.category_label(category),
                count: bucketing.tallies.category(category),
            })
            .collect();

        let buckets = bucketing
            .buckets
            .iter()
            .map(|bucket| BucketCount {
                bucket: bucket.key.to_string(),
                count: bucket.count(),
            })
            .collect();

        Self {
            total: bucketing.tallies.total,
            skipped,
            outside_window: bucketing.discarded,
            ecosystems,
            categories,
            buckets,
        }
    }
}

/// Read the inputs and tally them without rendering.
pub fn collect_stats(
    inputs: Vec<PathBuf>,
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> Result<StatsReport> {
    let paths = input_paths(inputs, config);
    let loaded = load_sources(&paths, false)?;
    let (bucketing, issues) = Pipeline::new(config, now).bucket(loaded.sources);

    Ok(StatsReport::from_bucketing(
        &bucketing,
        config,
        loaded.issues.len() + issues.len(),
    ))
}

pub fn print_stats(report: &StatsReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to serialize stats")?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", counts_table("Ecosystem", &report.ecosystems));
    println!("{}", counts_table("Category", &report.categories));

    let mut buckets = Table::new();
    buckets.set_header(vec!["Bucket", "Records"]);
    for bucket in &report.buckets {
        buckets.add_row(vec![bucket.bucket.clone(), bucket.count.to_string()]);
    }
    println!("{buckets}");

    println!("Total: {} contributions", report.total);
    if report.skipped > 0 {
        println!("Skipped: {} malformed records", report.skipped);
    }
    if report.outside_window > 0 {
        println!("Outside lookback window: {}", report.outside_window);
    }

    Ok(())
}

fn counts_table(heading: &str, rows: &[LabeledCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![heading, "Records"]);
    for row in rows {
        table.add_row(vec![row.label.clone(), row.count.to_string()]);
    }
    table
}
