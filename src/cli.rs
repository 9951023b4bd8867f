use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BucketMode;

#[derive(Parser, Debug)]
#[command(name = "contrib-timeline")]
#[command(about = "Merge public contribution records into a filterable static timeline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .timeline.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the timeline page from one or more record tables
    Build {
        /// Record tables to read (defaults to `input.files` from config)
        inputs: Vec<PathBuf>,

        /// Output file (defaults to `output.path` from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bucketing mode
        #[arg(long, value_enum)]
        mode: Option<BucketMode>,

        /// Months kept in month mode
        #[arg(long = "lookback-months")]
        lookback_months: Option<u32>,
    },

    /// Merge per-source record tables into one recency-ordered table
    Merge {
        /// Record tables to merge; missing files are skipped with a warning
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print record counts per ecosystem, category and bucket
    Stats {
        /// Record tables to read (defaults to `input.files` from config)
        inputs: Vec<PathBuf>,

        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from([
            "contrib-timeline",
            "-v",
            "build",
            "data/github.tsv",
            "data/wikis.tsv",
            "--mode",
            "month",
            "--lookback-months",
            "24",
            "-o",
            "out/index.xhtml",
        ]);

        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Commands::Build {
                inputs,
                output,
                mode,
                lookback_months,
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out/index.xhtml")));
                assert_eq!(mode, Some(BucketMode::Month));
                assert_eq!(lookback_months, Some(24));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_merge_requires_inputs() {
        assert!(Cli::try_parse_from(["contrib-timeline", "merge"]).is_err());
    }
}
