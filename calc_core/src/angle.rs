//! # Angle Modes
//!
//! The unit in which angular values are read and produced. An [`AngleMode`]
//! is a plain value passed into every trigonometric operation; there is no
//! ambient "current mode".
//!
//! ```rust
//! use calc_core::angle::AngleMode;
//!
//! let rad = AngleMode::Degrees.to_radians(180.0);
//! assert!((rad - std::f64::consts::PI).abs() < 1e-12);
//! assert!((AngleMode::Gradians.from_radians(rad) - 200.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Angular unit used to interpret trig inputs and inverse-trig outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AngleMode {
    /// 360 per turn
    #[default]
    #[serde(rename = "deg")]
    Degrees,
    /// 2π per turn
    #[serde(rename = "rad")]
    Radians,
    /// 400 per turn
    #[serde(rename = "grad")]
    Gradians,
}

impl AngleMode {
    /// All angle modes, in keypad cycling order
    pub const ALL: [AngleMode; 3] = [AngleMode::Degrees, AngleMode::Radians, AngleMode::Gradians];

    /// Size of a half turn in this unit
    fn half_turn(self) -> f64 {
        match self {
            AngleMode::Degrees => 180.0,
            AngleMode::Radians => PI,
            AngleMode::Gradians => 200.0,
        }
    }

    /// Convert a value in this unit to radians
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            _ => value * PI / self.half_turn(),
        }
    }

    /// Convert a value in radians to this unit
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            _ => value * self.half_turn() / PI,
        }
    }

    /// Whether `value` lands exactly on an odd multiple of a quarter turn.
    ///
    /// Only meaningful for degrees and gradians, where such inputs are exact.
    pub fn is_odd_quarter_turn(self, value: f64) -> bool {
        if self == AngleMode::Radians || !value.is_finite() {
            return false;
        }
        let quarters = value / (self.half_turn() / 2.0);
        quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0
    }

    /// Wire code ("deg", "rad", "grad")
    pub fn code(&self) -> &'static str {
        match self {
            AngleMode::Degrees => "deg",
            AngleMode::Radians => "rad",
            AngleMode::Gradians => "grad",
        }
    }

    /// Next mode in the deg -> rad -> grad cycle
    pub fn next(self) -> Self {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Gradians,
            AngleMode::Gradians => AngleMode::Degrees,
        }
    }

    /// Parse from common string representations
    pub fn from_name(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            "grad" | "gradian" | "gradians" | "gon" => Ok(AngleMode::Gradians),
            _ => Err(CalcError::invalid_input(
                "angleMode",
                s,
                "expected one of deg, rad, grad",
            )),
        }
    }
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}
