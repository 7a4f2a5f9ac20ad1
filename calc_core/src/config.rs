//! # Settings
//!
//! User-level calculator settings, read from a TOML file. Every field has a
//! default, so an empty file (or no file) is valid.
//!
//! ```toml
//! angle_mode = "rad"
//! notation = "engineering"
//! log_level = "debug"
//! ```
//!
//! ```rust
//! use calc_core::angle::AngleMode;
//! use calc_core::config::Settings;
//!
//! let settings = Settings::from_toml_str("angle_mode = \"grad\"").unwrap();
//! assert_eq!(settings.angle_mode, AngleMode::Gradians);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::angle::AngleMode;
use crate::errors::{CalcError, CalcResult};
use crate::format::Notation;

/// Calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Angle mode for new sessions
    pub angle_mode: AngleMode,

    /// Display notation for new sessions
    pub notation: Notation,

    /// Log filter used when RUST_LOG is not set (e.g. "warn", "calc_core=debug")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            angle_mode: AngleMode::Degrees,
            notation: Notation::Normal,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// * `FileError` - the file cannot be read
    /// * `SerializationError` - the file is not valid settings TOML
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            angle_mode = settings.angle_mode.code(),
            notation = settings.notation.name(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }
}
