//! Editor configuration.
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Storage key holding the encoded editor state.
pub const STATE_KEY: &str = "figma-state";
/// Storage key holding the theme name.
pub const THEME_KEY: &str = "editor-theme";
/// Storage key holding the layer note.
pub const NOTE_KEY: &str = "layer-info";

/// Smallest width or height an element may have, in pixels.
pub const MIN_ELEMENT_SIZE: f64 = 40.0;
/// Distance an arrow key moves the selected element, in pixels.
pub const NUDGE_STEP: f64 = 5.0;
/// Exported page canvas width.
pub const EXPORT_WIDTH: f64 = 1000.0;
/// Exported page canvas height.
pub const EXPORT_HEIGHT: f64 = 600.0;
/// Distance from the top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;
/// Pointer tolerance when hitting a handle.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Rotation snapping step in degrees (used while Shift is held).
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key under which the element list is persisted.
    pub state_key: String,
    /// Key under which the theme name is persisted.
    pub theme_key: String,
    /// Key under which the layer note is persisted.
    pub note_key: String,
    pub nudge_step: f64,
    pub min_size: f64,
    pub export_width: f64,
    pub export_height: f64,
    pub rotate_handle_offset: f64,
    pub handle_tolerance: f64,
    pub rotation_snap_degrees: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            state_key: STATE_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
            note_key: NOTE_KEY.to_string(),
            nudge_step: NUDGE_STEP,
            min_size: MIN_ELEMENT_SIZE,
            export_width: EXPORT_WIDTH,
            export_height: EXPORT_HEIGHT,
            rotate_handle_offset: ROTATE_HANDLE_OFFSET,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            rotation_snap_degrees: ROTATION_SNAP_DEGREES,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_key.is_empty() || self.theme_key.is_empty() || self.note_key.is_empty() {
            return Err(ConfigError::Invalid("storage keys must not be empty".to_string()));
        }
        let positive = [
            ("min_size", self.min_size),
            ("nudge_step", self.nudge_step),
            ("export_width", self.export_width),
            ("export_height", self.export_height),
            ("rotation_snap_degrees", self.rotation_snap_degrees),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("rotate_handle_offset", self.rotate_handle_offset),
            ("handle_tolerance", self.handle_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
