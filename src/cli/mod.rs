//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod inspect;
mod upscale;

use clap::{ArgAction, Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::codec::OutputFormat;
use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::upscale::FallbackFilter;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Scale3x - edge-preserving 3x upscaler for pixel art
#[derive(Parser)]
#[command(name = "scale3x")]
#[command(about = "Scale3x - upscale pixel art by 3x while keeping edges sharp")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the discovered scale3x.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upscale images by 3x
    Upscale {
        /// Input images or directories (searched recursively)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory.
        /// If omitted: {input}_3x.{ext} next to each input
        /// If file (single input): output.png
        /// If file (multiple): output_{input}.png
        /// If directory (ends with /): dir/{input}_3x.{ext}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from output extension, else png)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Filter for pre-scaling images smaller than 3x3 pixels
        #[arg(long, value_enum)]
        filter: Option<FallbackFilter>,

        /// Skip the small-image pre-scale and rely on edge clamping alone
        #[arg(long)]
        no_fallback: bool,

        /// Process pixels on a single thread
        #[arg(long)]
        sequential: bool,

        /// Suffix for generated output names (default: _3x)
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Show image dimensions and the size an upscale would produce
    Inspect {
        /// Input image
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Report sizes without the small-image pre-scale
        #[arg(long)]
        no_fallback: bool,
    },
}

/// Start the stderr logger at `level`.
///
/// The returned handle must stay alive for as long as logging is needed.
pub fn init_logging(level: &str) -> Option<LoggerHandle> {
    match Logger::try_with_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    }
}

/// Log level for a `-v` count, falling back to the configured level.
fn log_level(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_ascii_lowercase(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = match &cli.command {
        Commands::Upscale { format, filter, no_fallback, sequential, suffix, .. } => {
            CliOverrides {
                format: *format,
                filter: *filter,
                fallback: no_fallback.then_some(false),
                parallel: sequential.then_some(false),
                suffix: suffix.clone(),
                ..Default::default()
            }
        }
        Commands::Inspect { no_fallback, .. } => {
            CliOverrides { fallback: no_fallback.then_some(false), ..Default::default() }
        }
    };

    if let Err(e) = merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let _logger = init_logging(&log_level(cli.verbose, &config.log.level));

    match cli.command {
        Commands::Upscale { inputs, output, .. } => {
            upscale::run_upscale(&inputs, output.as_deref(), &config)
        }
        Commands::Inspect { input, json, .. } => inspect::run_inspect(&input, json, &config),
    }
}
