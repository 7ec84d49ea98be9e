//! HexLayer CLI - Command-line interface
//!
//! Offline front end to the HexLayer library: compute overlays for a
//! viewport, sample entities from a polling snapshot, and assemble full
//! render plans as JSON.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hexlayer::config::ConfigFile;
use hexlayer::logging::init_logging;

use commands::badges::BadgesArgs;
use commands::common::ViewportArgs;
use commands::config::ConfigCommands;
use commands::filter::FilterArgs;
use commands::overlay::OverlayArgs;
use commands::plan::PlanArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "hexlayer", version, about = "Hex coverage overlays for live operations maps")]
struct Cli {
    /// Use this configuration file instead of ~/.hexlayer/config.ini
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the hex overlay for a viewport as GeoJSON
    Overlay {
        #[command(flatten)]
        viewport: ViewportArgs,

        /// Viewport margin in degrees (default from config)
        #[arg(long)]
        margin: Option<f64>,

        /// Fixed H3 resolution, ignoring the zoom table
        #[arg(long)]
        resolution: Option<u8>,
    },

    /// Print the detected entities that should be drawn
    Filter {
        /// Polling snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Sampling threshold between 0 and 1
        #[arg(long, conflicts_with = "dense")]
        threshold: Option<f64>,

        /// Use the dense-context threshold
        #[arg(long)]
        dense: bool,
    },

    /// Print badge positions for each cluster
    Badges {
        /// Polling snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Distance north of the cluster marker in meters
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },

    /// Print a full render plan (overlay, visible entities, badges)
    Plan {
        /// Polling snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Use the dense-context threshold
        #[arg(long)]
        dense: bool,
    },

    /// Show the deterministic sampling value for a coordinate
    Sample {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Sampling threshold (default from config)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config_file {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    // A failed logger install should not stop the command itself
    let _guard = init_logging(&logging)
        .map_err(|e| eprintln!("Warning: {}", e))
        .ok();
    tracing::debug!(command = ?cli.command, "Starting hexlayer");

    match cli.command {
        Commands::Overlay {
            viewport,
            margin,
            resolution,
        } => commands::overlay::run(
            OverlayArgs {
                viewport,
                margin,
                resolution,
            },
            &config,
        ),
        Commands::Filter {
            snapshot,
            threshold,
            dense,
        } => commands::filter::run(
            FilterArgs {
                snapshot,
                threshold,
                dense,
            },
            &config,
        ),
        Commands::Badges { snapshot, offset } => {
            commands::badges::run(BadgesArgs { snapshot, offset }, &config)
        }
        Commands::Plan {
            snapshot,
            viewport,
            dense,
        } => commands::plan::run(
            PlanArgs {
                snapshot,
                viewport,
                dense,
            },
            &config,
        ),
        Commands::Sample {
            lat,
            lon,
            threshold,
        } => commands::sample::run(lat, lon, threshold, &config),
        Commands::Config { command } => {
            commands::config::run(command, &config, cli.config_file.as_deref())
        }
    }
}
