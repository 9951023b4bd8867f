//! Bucketizer: groups timeline entries into display buckets.
//!
//! Two window policies exist. [`WindowPolicy::Year`] keys buckets by
//! calendar year and keeps everything. [`WindowPolicy::MonthLookback`] first
//! discards entries older than the lookback window, then keys by `YYYY-MM`.
//! Buckets come out newest first, and the [`Tallies`] are computed over
//! exactly the entries that were bucketed.

use crate::classify::Classifier;
use crate::core::{Category, ClassifiedEntry, TimelineEntry, UnknownEcosystemPolicy};
use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default lookback for month buckets: three years.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 36;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum WindowPolicy {
    #[default]
    Year,
    MonthLookback { months: u32 },
}

impl WindowPolicy {
    /// Oldest instant still kept, if the policy has a window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match *self {
            Self::Year => None,
            Self::MonthLookback { months } => Some(
                now.checked_sub_months(Months::new(months))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        }
    }

    pub fn key_for(&self, entry: &TimelineEntry) -> BucketKey {
        match self {
            Self::Year => BucketKey::Year(entry.at.year()),
            Self::MonthLookback { .. } => BucketKey::Month {
                year: entry.at.year(),
                month: entry.at.month(),
            },
        }
    }
}

/// Grouping key of a bucket. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketKey {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl BucketKey {
    /// Anchor id of the bucket's section: `year-2024` or `month-2024-01`.
    pub fn anchor(&self) -> String {
        match self {
            Self::Year(_) => format!("year-{self}"),
            Self::Month { .. } => format!("month-{self}"),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

/// Entries sharing a key, newest first, plus links to neighbouring buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub entries: Vec<ClassifiedEntry>,
    /// Bucket displayed before this one (newer)
    pub previous: Option<BucketKey>,
    /// Bucket displayed after this one (older)
    pub next: Option<BucketKey>,
}

impl Bucket {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Record counts per ecosystem key and per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tallies {
    pub total: usize,
    pub by_ecosystem: BTreeMap<String, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl Tallies {
    fn add(&mut self, entry: &ClassifiedEntry) {
        self.total += 1;
        *self
            .by_ecosystem
            .entry(entry.display_ecosystem.key().to_string())
            .or_default() += 1;
        *self.by_category.entry(entry.category).or_default() += 1;
    }

    pub fn ecosystem(&self, key: &str) -> usize {
        self.by_ecosystem.get(key).copied().unwrap_or(0)
    }

    pub fn category(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Result of bucketing one timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bucketing {
    pub policy: WindowPolicy,
    pub buckets: Vec<Bucket>,
    pub tallies: Tallies,
    /// Entries dropped by the lookback window
    pub discarded: usize,
}

impl Bucketing {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucketed_count(&self) -> usize {
        self.buckets.iter().map(Bucket::count).sum()
    }
}

/// Classifies and groups entries under one window policy.
#[derive(Debug, Clone)]
pub struct Bucketizer<'a> {
    policy: WindowPolicy,
    classifier: &'a Classifier,
    unknown_policy: &'a UnknownEcosystemPolicy,
}

impl<'a> Bucketizer<'a> {
    pub fn new(
        policy: WindowPolicy,
        classifier: &'a Classifier,
        unknown_policy: &'a UnknownEcosystemPolicy,
    ) -> Self {
        Self {
            policy,
            classifier,
            unknown_policy,
        }
    }

    /// Bucket `entries`; `now` anchors the lookback window.
    pub fn bucket(&self, entries: Vec<TimelineEntry>, now: DateTime<Utc>) -> Bucketing {
        let cutoff = self.policy.cutoff(now);
        let mut discarded = 0;
        let mut tallies = Tallies::default();
        let mut groups: BTreeMap<BucketKey, Vec<ClassifiedEntry>> = BTreeMap::new();

        for entry in entries {
            if cutoff.is_some_and(|cutoff| entry.at.with_timezone(&Utc) < cutoff) {
                discarded += 1;
                continue;
            }
            let key = self.policy.key_for(&entry);
            let classified = self.classify(entry);
            tallies.add(&classified);
            groups.entry(key).or_default().push(classified);
        }

        let keys: Vec<BucketKey> = groups.keys().rev().copied().collect();
        let buckets = groups
            .into_iter()
            .rev()
            .enumerate()
            .map(|(idx, (key, mut entries))| {
                entries.sort_by(|a, b| b.at().cmp(&a.at()));
                Bucket {
                    key,
                    entries,
                    previous: idx.checked_sub(1).map(|i| keys[i]),
                    next: keys.get(idx + 1).copied(),
                }
            })
            .collect();

        Bucketing {
            policy: self.policy,
            buckets,
            tallies,
            discarded,
        }
    }

    fn classify(&self, entry: TimelineEntry) -> ClassifiedEntry {
        let category = self.classifier.classify(&entry.record);
        let display_ecosystem = self.unknown_policy.resolve(&entry.record.ecosystem);
        ClassifiedEntry {
            entry,
            category,
            display_ecosystem,
        }
    }
}
