//! Record Normalizer: the tab-separated table exchanged with fetchers.
//!
//! Columns are positional: `id, ecosystem, type, date, title, url, project`
//! and an optional trailing `icon`. Header names are never interpreted, so
//! the older `platform`/`source` header reads exactly like the newer one.

use crate::core::{ContributionRecord, Ecosystem};
use crate::errors::{RecordIssue, Result, TimelineError};

/// Header written by [`write_table`].
pub const TABLE_HEADER: [&str; 8] = [
    "id", "ecosystem", "type", "date", "title", "url", "project", "icon",
];

/// Columns every table must declare; `icon` is optional.
const REQUIRED_COLUMNS: usize = 7;

/// Records read from one table plus the rows that were skipped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableReport {
    pub records: Vec<ContributionRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Parse a record table.
///
/// Empty input yields an empty report. Short rows are padded with empty
/// fields; rows with neither ecosystem nor type are skipped and reported.
pub fn parse_table(text: &str) -> Result<TableReport> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(TableReport::default());
    };

    let columns = header.split('\t').count();
    if columns < REQUIRED_COLUMNS {
        return Err(TimelineError::table(format!(
            "header declares {columns} columns, expected at least {REQUIRED_COLUMNS}"
        )));
    }

    let mut report = TableReport::default();
    for (line_no, line) in lines {
        match parse_row(line_no, line) {
            Ok(record) => report.records.push(record),
            Err(issue) => {
                log::warn!("Skipping row: {issue}");
                report.issues.push(issue);
            }
        }
    }
    Ok(report)
}

fn parse_row(line_no: usize, line: &str) -> std::result::Result<ContributionRecord, RecordIssue> {
    let fields: Vec<&str> = line.split('\t').collect();
    let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

    let ecosystem = field(1).trim();
    let raw_type = field(2).trim();
    if ecosystem.is_empty() && raw_type.is_empty() {
        return Err(RecordIssue::MissingOrigin { line: line_no });
    }

    Ok(ContributionRecord {
        id: field(0).to_string(),
        ecosystem: Ecosystem::parse(ecosystem),
        raw_type: raw_type.to_string(),
        timestamp: field(3).trim().to_string(),
        title: field(4).to_string(),
        url: field(5).to_string(),
        project: field(6).to_string(),
        icon_hint: Some(field(7).trim())
            .filter(|icon| !icon.is_empty())
            .map(str::to_string),
    })
}

/// Serialize records as an eight-column table, header included.
pub fn write_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ContributionRecord>,
{
    let mut out = TABLE_HEADER.join("\t");
    out.push('\n');
    for record in records {
        let row = [
            record.id.as_str(),
            record.ecosystem.as_tag(),
            record.raw_type.as_str(),
            record.timestamp.as_str(),
            record.title.as_str(),
            record.url.as_str(),
            record.project.as_str(),
            record.icon_hint.as_deref().unwrap_or(""),
        ]
        .map(sanitize_field);
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Tabs and newlines would break the row structure.
fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\n'], " ").replace('\r', "")
}
