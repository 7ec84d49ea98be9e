//! CLI error type.

use thiserror::Error;

use hexlayer::config::ConfigError;
use hexlayer::hexgrid::ResolutionError;
use hexlayer::snapshot::SnapshotError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot file could not be read.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Explicit resolution argument was invalid.
    #[error("{0}")]
    Resolution(#[from] ResolutionError),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Refusing to overwrite an existing file.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::AlreadyExists("/tmp/config.ini".to_string());
        assert!(err.to_string().contains("--force"));

        let err: CliError = ResolutionError::InvalidResolution(20).into();
        assert!(err.to_string().contains("20"));
    }
}
