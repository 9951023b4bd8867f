//! Aggregator: merges per-source record lists into one recency-ordered list.
//!
//! Records whose timestamp cannot be parsed are dropped and reported. The
//! sort is stable, so records sharing a timestamp keep the order in which
//! they appeared across the concatenated inputs. Repeated ids are kept as
//! repeated entries; de-duplication belongs to the fetchers.

use crate::core::{ContributionRecord, TimelineEntry};
use crate::errors::RecordIssue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::{debug, warn};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Outcome of a merge, including dropped records.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeReport {
    pub entries: Vec<TimelineEntry>,
    pub issues: Vec<RecordIssue>,
}

/// Parse an ISO-8601 timestamp.
///
/// Zoned timestamps keep their offset; naive date-times and bare dates are
/// taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Merge source lists, most recent first.
pub fn merge<I>(source_lists: I) -> Vec<TimelineEntry>
where
    I: IntoIterator<Item = Vec<ContributionRecord>>,
{
    merge_with_report(source_lists).entries
}

/// Like [`merge`], also returning the records that were dropped.
pub fn merge_with_report<I>(source_lists: I) -> MergeReport
where
    I: IntoIterator<Item = Vec<ContributionRecord>>,
{
    let mut report = MergeReport::default();

    for record in source_lists.into_iter().flatten() {
        match parse_timestamp(&record.timestamp) {
            Some(at) => report.entries.push(TimelineEntry { record, at }),
            None => {
                warn!(
                    id = %record.id,
                    value = %record.timestamp,
                    "Dropping record with unparseable timestamp"
                );
                report.issues.push(RecordIssue::MalformedTimestamp {
                    id: record.id,
                    value: record.timestamp,
                });
            }
        }
    }

    // `sort_by` is stable: equal instants keep their input order.
    report.entries.sort_by(|a, b| b.at.cmp(&a.at));

    let repeated = count_repeated_ids(&report.entries);
    if repeated > 0 {
        debug!(repeated, "Merged timeline contains repeated record ids");
    }

    report
}

/// Number of entries whose id already appeared earlier in the list.
pub fn count_repeated_ids(entries: &[TimelineEntry]) -> usize {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .filter(|entry| !seen.insert(entry.record.id.as_str()))
        .count()
}
