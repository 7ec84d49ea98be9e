//! Configuration file handling.
//!
//! Settings live in an INI file at `~/.hexlayer/config.ini`:
//!
//! ```ini
//! [overlay]
//! margin_degrees = 0.005
//! max_cells = 50000
//!
//! [grid]
//! resolution_table = 7=0,8=1,...,18=11,19=12
//!
//! [visibility]
//! threshold = 0.3
//! dense_threshold = 0.1
//!
//! [annotation]
//! badge_offset_meters = 20
//!
//! [logging]
//! level = info
//! directory = /var/log/hexlayer
//! ```
//!
//! Missing files and missing keys fall back to defaults. Present but invalid
//! values are errors.

mod settings;

pub use settings::{
    AnnotationSettings, LoggingSettings, OverlaySettings, VisibilitySettings, LOG_LEVELS,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::hexgrid::ZoomResolutionTable;

/// Directory name under the user's home directory.
pub const CONFIG_DIR_NAME: &str = ".hexlayer";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI.
    #[error("Failed to parse config file: {0}")]
    Parse(String),

    /// A key has a value that cannot be used.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Full path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// All settings, one struct per INI section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// `[overlay]` and `[grid]`.
    pub overlay: OverlaySettings,
    /// `[visibility]`.
    pub visibility: VisibilitySettings,
    /// `[annotation]`.
    pub annotation: AnnotationSettings,
    /// `[logging]`.
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default path, or defaults if the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse INI text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(v) = parse_value::<f64>(&ini, "overlay", "margin_degrees")? {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid("overlay.margin_degrees", v, "must be a non-negative number"));
            }
            config.overlay.margin_degrees = v;
        }
        if let Some(v) = parse_value::<usize>(&ini, "overlay", "max_cells")? {
            if v == 0 {
                return Err(invalid("overlay.max_cells", v, "must be at least 1"));
            }
            config.overlay.max_cells = v;
        }
        if let Some(raw) = ini.get_from(Some("grid"), "resolution_table") {
            config.overlay.resolution_table = ZoomResolutionTable::from_str(raw)
                .map_err(|e| invalid("grid.resolution_table", raw, e))?;
        }

        if let Some(v) = parse_value::<f64>(&ini, "visibility", "threshold")? {
            config.visibility.threshold = check_unit("visibility.threshold", v)?;
        }
        if let Some(v) = parse_value::<f64>(&ini, "visibility", "dense_threshold")? {
            config.visibility.dense_threshold = check_unit("visibility.dense_threshold", v)?;
        }

        if let Some(v) = parse_value::<f64>(&ini, "annotation", "badge_offset_meters")? {
            if !v.is_finite() {
                return Err(invalid("annotation.badge_offset_meters", v, "must be finite"));
            }
            config.annotation.badge_offset_meters = v;
        }

        if let Some(level) = ini.get_from(Some("logging"), "level") {
            let level = level.trim().to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid(
                    "logging.level",
                    &level,
                    format!("expected one of {}", LOG_LEVELS.join(", ")),
                ));
            }
            config.logging.level = level;
        }
        if let Some(dir) = ini.get_from(Some("logging"), "directory") {
            let dir = dir.trim();
            config.logging.directory = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Render as INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("overlay"))
            .set("margin_degrees", self.overlay.margin_degrees.to_string())
            .set("max_cells", self.overlay.max_cells.to_string());
        ini.with_section(Some("grid"))
            .set("resolution_table", self.overlay.resolution_table.to_string());
        ini.with_section(Some("visibility"))
            .set("threshold", self.visibility.threshold.to_string())
            .set("dense_threshold", self.visibility.dense_threshold.to_string());
        ini.with_section(Some("annotation")).set(
            "badge_offset_meters",
            self.annotation.badge_offset_meters.to_string(),
        );
        {
            let mut logging = ini.with_section(Some("logging"));
            logging.set("level", self.logging.level.clone());
            if let Some(dir) = &self.logging.directory {
                logging.set("directory", dir.to_string_lossy().to_string());
            }
        }
        ini
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }
}

fn parse_value<T: FromStr>(ini: &Ini, section: &str, key: &str) -> Result<Option<T>, ConfigError> {
    match ini.get_from(Some(section), key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(&format!("{}.{}", section, key), raw, "not a number")),
    }
}

fn check_unit(key: &str, value: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(key, value, "must be between 0 and 1"))
    }
}

fn invalid(key: &str, value: impl ToString, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexgrid::ResolutionPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.overlay.margin_degrees, 0.005);
        assert_eq!(config.overlay.max_cells, 50_000);
        assert_eq!(config.visibility.threshold, 0.3);
        assert_eq!(config.visibility.dense_threshold, 0.1);
        assert_eq!(config.annotation.badge_offset_meters, 20.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = ConfigFile::parse("[visibility]\nthreshold = 0.5\n").unwrap();
        assert_eq!(config.visibility.threshold, 0.5);
        assert_eq!(config.visibility.dense_threshold, 0.1);
        assert_eq!(config.overlay, OverlaySettings::default());
    }

    #[test]
    fn test_parse_resolution_table() {
        let config = ConfigFile::parse("[grid]\nresolution_table = 16=9,18=11\n").unwrap();
        let table = &config.overlay.resolution_table;
        assert_eq!(u8::from(table.resolution_for_zoom(17)), 9);
        assert_eq!(u8::from(table.resolution_for_zoom(20)), 11);
    }

    #[test]
    fn test_parse_rejects_bad_threshold() {
        let err = ConfigFile::parse("[visibility]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "visibility.threshold"));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = ConfigFile::parse("[overlay]\nmax_cells = lots\n").unwrap_err();
        assert!(err.to_string().contains("overlay.max_cells"));
    }

    #[test]
    fn test_parse_rejects_bad_resolution_table() {
        let err = ConfigFile::parse("[grid]\nresolution_table = 18=99\n").unwrap_err();
        assert!(err.to_string().contains("grid.resolution_table"));
    }

    #[test]
    fn test_parse_rejects_unknown_log_level() {
        assert!(ConfigFile::parse("[logging]\nlevel = loud\n").is_err());
        let config = ConfigFile::parse("[logging]\nlevel = DEBUG\n").unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("missing.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ConfigFile::default();
        config.overlay.margin_degrees = 0.01;
        config.visibility.threshold = 0.25;
        config.annotation.badge_offset_meters = 35.0;
        config.logging.directory = Some(PathBuf::from("/tmp/hexlayer-logs"));
        config.overlay.resolution_table = "10=5,18=11".parse().unwrap();

        config.save_to(&path).unwrap();
        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_config_file_path_name() {
        let path = config_file_path();
        assert!(path.ends_with(Path::new(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)));
    }
}
