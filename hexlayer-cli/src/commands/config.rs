//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use hexlayer::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
///
/// `config_file` is the global `--config` override; `path` and `init` act on
/// it instead of the default location when given.
pub fn run(
    command: ConfigCommands,
    config: &ConfigFile,
    config_file: Option<&Path>,
) -> Result<(), CliError> {
    let path = resolve_path(config_file);
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Init { force } => run_init(&path, force),
    }
}

fn resolve_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Print the effective configuration in INI form.
fn run_show(config: &ConfigFile) -> Result<(), CliError> {
    let mut out = Vec::new();
    config
        .to_ini()
        .write_to(&mut out)
        .map_err(|e| CliError::Config(e.into()))?;
    print!("{}", String::from_utf8_lossy(&out));
    Ok(())
}

/// Write the default configuration.
fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path.display().to_string()));
    }
    ConfigFile::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
