pub mod tsv;

pub use tsv::{parse_table, write_table, TableReport, TABLE_HEADER};

use crate::errors::{Result, TimelineError};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| TimelineError::io(path, e))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| TimelineError::io(parent, e))
        }
        _ => Ok(()),
    }
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Read and normalize one record table from disk.
pub fn read_table(path: &Path) -> Result<TableReport> {
    let text = read_file(path)?;
    let report = parse_table(&text)?;
    log::debug!(
        "Read {} records from {} ({} skipped)",
        report.records.len(),
        path.display(),
        report.issues.len()
    );
    Ok(report)
}
