use anyhow::Result;
use clap::Parser;
use contrib_timeline::cli::{Cli, Commands};
use contrib_timeline::commands::{self, BuildConfig};
use contrib_timeline::config::CONFIG_FILE_NAME;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity, cli.quiet);

    let config = commands::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            inputs,
            output,
            mode,
            lookback_months,
        } => {
            let options = BuildConfig {
                inputs,
                output,
                mode,
                lookback_months,
            };
            commands::run_build(options, &config)?;
        }
        Commands::Merge { inputs, output } => {
            commands::run_merge(&inputs, output.as_deref())?;
        }
        Commands::Stats { inputs, json } => {
            let report = commands::collect_stats(inputs, &config, chrono::Utc::now())?;
            commands::print_stats(&report, json)?;
        }
        Commands::Init { force } => {
            commands::init_config(Path::new(CONFIG_FILE_NAME), force)?;
        }
    }

    Ok(())
}

/// Log to stderr so `merge` can write its table to stdout.
///
/// `-v`/`-q` take precedence over `RUST_LOG`. `log` records from the config
/// loader are bridged into the same subscriber.
fn init_logging(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => EnvFilter::new("warn"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
