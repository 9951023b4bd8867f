//! Property-based tests for the timeline stages
//!
//! These tests verify invariants that should hold for all inputs:
//! - Classification is total and deterministic
//! - Merge output is sorted newest first and only drops malformed timestamps
//! - Records sharing a timestamp keep their input order
//! - Categories do not depend on when classification happens
//! - Bucket counts add up to the records that survive the window

use chrono::{DateTime, TimeZone, Utc};
use contrib_timeline::aggregate::parse_timestamp;
use contrib_timeline::core::{ContributionRecord, Ecosystem, UnknownEcosystemPolicy};
use contrib_timeline::{merge, Bucketizer, Classifier, WindowPolicy};
use proptest::prelude::*;
use std::collections::HashMap;

const ECOSYSTEM_TAGS: &[&str] = &[
    "github",
    "wikimedia",
    "osm",
    "explainxkcd",
    "fandom",
    "gitlab",
    "",
];

const RAW_TYPES: &[&str] = &[
    "pr", "review", "issue", "comment", "commit", "edit", "changeset", "",
];

const PROJECTS: &[&str] = &["translatewiki.net", "en.wikipedia.org", "o/r"];

const TITLES: &[&str] = &[
    "Talk:Foo",
    "User_talk:Bar",
    "Module:Bar/qqq",
    "Module:Bar",
    "Template:Infobox/de",
    "MediaWiki:Common.css",
    "Main Page/pt-br",
    "Opened PR: Fix bug",
    "<b>bold</b>",
    "",
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
}

/// Valid RFC 3339 timestamp between 2015 and 2026
fn valid_timestamp() -> impl Strategy<Value = String> {
    (2015i32..=2026, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(
        |(year, month, day, hour, minute)| {
            format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:00Z")
        },
    )
}

/// Mostly valid timestamps with the occasional unparseable one
fn any_timestamp() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => valid_timestamp(),
        1 => Just("not a date".to_string()),
        1 => Just(String::new()),
    ]
}

fn record_with(timestamp: impl Strategy<Value = String>) -> impl Strategy<Value = ContributionRecord> {
    (
        prop::sample::select(ECOSYSTEM_TAGS),
        prop::sample::select(RAW_TYPES),
        prop::sample::select(TITLES),
        prop::sample::select(PROJECTS),
        timestamp,
    )
        .prop_map(|(ecosystem, raw_type, title, project, timestamp)| {
            ContributionRecord::new("", Ecosystem::parse(ecosystem), raw_type, timestamp)
                .with_title(title)
                .with_project(project)
        })
}

/// Source lists with unique ids across all lists
fn sources(
    timestamp: impl Strategy<Value = String>,
) -> impl Strategy<Value = Vec<Vec<ContributionRecord>>> {
    prop::collection::vec(prop::collection::vec(record_with(timestamp), 0..12), 0..4).prop_map(
        |lists| {
            let mut next = 0usize;
            lists
                .into_iter()
                .map(|list| {
                    list.into_iter()
                        .map(|mut record| {
                            record.id = format!("r{next}");
                            next += 1;
                            record
                        })
                        .collect()
                })
                .collect()
        },
    )
}

proptest! {
    /// Property: classification is total and deterministic
    #[test]
    fn prop_classify_is_deterministic(record in record_with(any_timestamp())) {
        let first = Classifier::default().classify(&record);
        let second = Classifier::default().classify(&record);
        prop_assert_eq!(first, second);
    }

    /// Property: merge keeps every parseable record and sorts newest first
    #[test]
    fn prop_merge_sorted_and_complete(lists in sources(any_timestamp())) {
        let parseable = lists
            .iter()
            .flatten()
            .filter(|r| parse_timestamp(&r.timestamp).is_some())
            .count();
        let total: usize = lists.iter().map(Vec::len).sum();

        let merged = merge(lists);

        prop_assert!(merged.len() <= total);
        prop_assert_eq!(merged.len(), parseable);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].at >= pair[1].at);
        }
    }

    /// Property: identical timestamps keep concatenated input order
    #[test]
    fn prop_ties_keep_input_order(lists in sources(Just("2024-01-02T00:00:00Z".to_string()))) {
        let expected: Vec<String> = lists.iter().flatten().map(|r| r.id.clone()).collect();

        let merged = merge(lists);
        let actual: Vec<String> = merged.iter().map(|e| e.record.id.clone()).collect();

        prop_assert_eq!(actual, expected);
    }

    /// Property: categories are the same before and after merge and bucketing
    #[test]
    fn prop_category_independent_of_stage(lists in sources(valid_timestamp())) {
        let classifier = Classifier::default();
        let before: HashMap<String, _> = lists
            .iter()
            .flatten()
            .map(|r| (r.id.clone(), classifier.classify(r)))
            .collect();

        let bucketing = Bucketizer::new(WindowPolicy::Year, &classifier, &UnknownEcosystemPolicy::default())
            .bucket(merge(lists), now());

        for entry in bucketing.buckets.iter().flat_map(|b| b.entries.iter()) {
            prop_assert_eq!(Some(&entry.category), before.get(&entry.record().id));
        }
    }

    /// Property: bucket counts sum to the records kept by the window
    #[test]
    fn prop_bucket_totals(lists in sources(valid_timestamp()), months in prop::option::of(1u32..60)) {
        let policy = match months {
            Some(months) => WindowPolicy::MonthLookback { months },
            None => WindowPolicy::Year,
        };
        let entries = merge(lists);
        let count = entries.len();
        let classifier = Classifier::default();

        let bucketing = Bucketizer::new(policy, &classifier, &UnknownEcosystemPolicy::default())
            .bucket(entries, now());

        prop_assert_eq!(bucketing.bucketed_count(), bucketing.tallies.total);
        prop_assert_eq!(bucketing.bucketed_count() + bucketing.discarded, count);
        if policy == WindowPolicy::Year {
            prop_assert_eq!(bucketing.discarded, 0);
        }
        for pair in bucketing.buckets.windows(2) {
            prop_assert!(pair[0].key > pair[1].key);
        }
    }
}
