//! Per-section settings structs.

use std::path::PathBuf;

use crate::annotation::DEFAULT_BADGE_OFFSET_METERS;
use crate::hexgrid::{ZoomResolutionTable, DEFAULT_MAX_CELLS};
use crate::viewport::DEFAULT_MARGIN_DEGREES;
use crate::visibility::{DENSE_THRESHOLD, DEFAULT_THRESHOLD};

/// Accepted values for `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Overlay grid settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Padding around the viewport in degrees.
    pub margin_degrees: f64,
    /// Upper bound on cells per overlay.
    pub max_cells: usize,
    /// Zoom → H3 resolution policy.
    pub resolution_table: ZoomResolutionTable,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            margin_degrees: DEFAULT_MARGIN_DEGREES,
            max_cells: DEFAULT_MAX_CELLS,
            resolution_table: ZoomResolutionTable::default(),
        }
    }
}

/// Entity sampling settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySettings {
    /// General sampling threshold.
    pub threshold: f64,
    /// Threshold in dense contexts.
    pub dense_threshold: f64,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            dense_threshold: DENSE_THRESHOLD,
        }
    }
}

impl VisibilitySettings {
    /// Threshold for the given context.
    pub fn threshold_for(&self, dense: bool) -> f64 {
        if dense {
            self.dense_threshold
        } else {
            self.threshold
        }
    }
}

/// Badge placement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationSettings {
    /// Distance north of the cluster marker, in meters.
    pub badge_offset_meters: f64,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            badge_offset_meters: DEFAULT_BADGE_OFFSET_METERS,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default filter level when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for a log file; stderr only when `None`.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
