//! dogfinder-match: relevance engine harness
//!
//! Scores, ranks and runs alert checks on sightings stored as JSON files,
//! using the same engine and configuration as the service.

use clap::{Parser, Subcommand, ValueEnum};
use dogfinder_core::config::Config;
use dogfinder_core::error::exit_codes;
use dogfinder_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod input;

/// Relevance engine for lost-dog sightings
#[derive(Parser)]
#[command(name = "dogfinder-match")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path (defaults to .dogfinder.toml discovery)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print collected metrics as JSON on stderr before exiting
    #[arg(long, global = true)]
    metrics: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one sighting against a query
    Score {
        /// Search query JSON file ("-" for stdin)
        #[arg(short, long)]
        query: PathBuf,

        /// Sighting record JSON file ("-" for stdin)
        #[arg(short, long)]
        sighting: PathBuf,

        /// Show every term of the score
        #[arg(short, long)]
        explain: bool,
    },

    /// Rank sightings for a query
    Rank {
        /// Search query JSON file ("-" for stdin)
        #[arg(short, long)]
        query: PathBuf,

        /// JSON array of sighting records ("-" for stdin)
        #[arg(short, long)]
        sightings: PathBuf,

        /// Keep at most this many results (overrides ranking.max_results)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check whether the newest sighting should alert an owner
    Alert {
        /// Alert profile JSON file ("-" for stdin)
        #[arg(short, long)]
        profile: PathBuf,

        /// JSON array of sighting records, newest first ("-" for stdin)
        #[arg(short, long)]
        sightings: PathBuf,

        /// JSON array of already notified sighting ids (missing file = none)
        #[arg(short, long)]
        notified: Option<PathBuf>,

        /// Write the updated notified ids back to --notified
        #[arg(short, long, requires = "notified")]
        write: bool,
    },

    /// Check whether two breed labels are similar
    Similar {
        /// First breed label
        a: String,

        /// Second breed label
        b: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let code = match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => report_error(&err, cli.format),
    };

    if cli.metrics {
        eprintln!("{}", dogfinder_telemetry::metrics().export_json());
    }

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &config)?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path, "Loaded configuration");
    }

    match &cli.command {
        Commands::Score {
            query,
            sighting,
            explain,
        } => commands::score::run(&config, query, sighting, *explain, cli.format),

        Commands::Rank {
            query,
            sightings,
            limit,
        } => commands::rank::run(&config, query, sightings, *limit, cli.format),

        Commands::Alert {
            profile,
            sightings,
            notified,
            write,
        } => commands::alert::run(
            &config,
            profile,
            sightings,
            notified.as_deref(),
            *write,
            cli.format,
        ),

        Commands::Similar { a, b } => commands::similar::run(a, b, cli.format),
    }
}

fn init_logging(verbose: u8, config: &Config) -> anyhow::Result<()> {
    let log_level = match verbose {
        0 => config.schema.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    dogfinder_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    })
}

/// Print `err` and pick the exit code for it.
fn report_error(err: &anyhow::Error, format: OutputFormat) -> i32 {
    match err.downcast_ref::<dogfinder_core::Error>() {
        Some(core) => {
            if format == OutputFormat::Json {
                let report = serde_json::to_string_pretty(&core.to_report())
                    .unwrap_or_else(|_| core.message.clone());
                eprintln!("{}", report);
            } else {
                eprintln!("{} {}", "error:".red().bold(), core);
            }
            core.code.exit_code()
        }
        None => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            exit_codes::FAILURE
        }
    }
}
