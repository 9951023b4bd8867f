use super::load_sources;
use crate::aggregate::merge_with_report;
use crate::io;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Merge per-source tables into one table, newest first.
///
/// Missing inputs are skipped with a warning so a failed fetcher does not
/// block the others. Returns the number of records written.
pub fn run_merge(inputs: &[PathBuf], output: Option<&Path>) -> Result<usize> {
    let loaded = load_sources(inputs, true)?;
    let report = merge_with_report(loaded.sources);

    let table = io::write_table(report.entries.iter().map(|entry| &entry.record));

    match output {
        Some(path) => io::write_file(path, &table)
            .with_context(|| format!("Failed to write merged table to {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(table.as_bytes())
                .context("Failed to write merged table to stdout")?;
        }
    }

    let skipped = loaded.issues.len() + report.issues.len();
    tracing::info!(
        records = report.entries.len(),
        skipped,
        missing = loaded.missing.len(),
        "Merged record tables"
    );

    Ok(report.entries.len())
}
