use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::core::TimelineConfig;
use crate::errors::{Result, TimelineError};

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".timeline.toml";

/// Directories inspected during discovery, the starting one included.
const SEARCH_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<TimelineConfig> {
    let config = toml::from_str::<TimelineConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file. Any failure is fatal.
pub fn load_config_from(path: &Path) -> Result<TimelineConfig> {
    let contents = fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
    let config = parse_and_validate_config(&contents)
        .map_err(|e| TimelineError::config(format!("{}: {}", path.display(), e)))?;
    log::debug!("Using timeline config {}", path.display());
    Ok(config)
}

/// Config at `path` if it exists and is usable. Unreadable or invalid files
/// are reported and skipped so discovery can keep climbing.
fn candidate_config(path: &Path) -> Option<TimelineConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Using timeline config {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Nearest usable `.timeline.toml` at or above `start`; defaults otherwise.
pub fn discover_config(start: &Path) -> TimelineConfig {
    start
        .ancestors()
        .take(SEARCH_DEPTH)
        .find_map(|dir| candidate_config(&dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| {
            log::debug!("No {CONFIG_FILE_NAME} near {}, using defaults", start.display());
            TimelineConfig::default()
        })
}

/// Discover config from the working directory.
pub fn load_config() -> TimelineConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!("Working directory unavailable ({e}), using default timeline config");
            TimelineConfig::default()
        }
    }
}
