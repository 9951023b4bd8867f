// Export modules for library usage
pub mod aggregate;
pub mod bucket;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Category, ClassifiedEntry, ContributionRecord, Ecosystem, EcosystemKind, TimelineEntry,
    UnknownEcosystemPolicy,
};

pub use crate::errors::{RecordIssue, Result, TimelineError};

pub use crate::io::{parse_table, read_table, write_table, TableReport};

pub use crate::classify::Classifier;

pub use crate::aggregate::{merge, merge_with_report, parse_timestamp, MergeReport};

pub use crate::bucket::{
    Bucket, BucketKey, Bucketing, Bucketizer, Tallies, WindowPolicy, DEFAULT_LOOKBACK_MONTHS,
};

pub use crate::render::{render, Renderer, StaticDocument};

pub use crate::pipeline::{Pipeline, PipelineOutcome};

pub use crate::config::{load_config, TimelineConfig};
