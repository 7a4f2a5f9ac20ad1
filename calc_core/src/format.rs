//! # Number Formatting
//!
//! Renders a result for display. Formatting happens only at the presentation
//! boundary; computations always work on raw `f64` values.
//!
//! | notation | exponential when | otherwise |
//! |---|---|---|
//! | normal | `abs >= 1e10` or `abs < 1e-6` | integer, or 12 significant digits |
//! | scientific | `abs >= 1e6` or `abs < 1e-3` | 10 significant digits |
//! | engineering | `abs >= 1000` or `abs < 1e-3` | plain decimal |
//!
//! Exact zero is always `0`; NaN and infinities render as [`ERROR_MARKER`].
//!
//! ```rust
//! use calc_core::format::{format, Notation};
//!
//! assert_eq!(format(0.0, Notation::Scientific), "0");
//! assert_eq!(format(1234567.0, Notation::Scientific), "1.234567e+6");
//! assert_eq!(format(1234567.0, Notation::Engineering), "1.235E6");
//! assert_eq!(format(0.1 + 0.2, Notation::Normal), "0.3");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Rendered in place of NaN and infinities
pub const ERROR_MARKER: &str = "Error";

/// Display notation for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Normal,
    Scientific,
    Engineering,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::Normal, Notation::Scientific, Notation::Engineering];

    pub fn name(&self) -> &'static str {
        match self {
            Notation::Normal => "normal",
            Notation::Scientific => "scientific",
            Notation::Engineering => "engineering",
        }
    }

    /// Next notation in the normal -> scientific -> engineering cycle
    pub fn next(self) -> Self {
        match self {
            Notation::Normal => Notation::Scientific,
            Notation::Scientific => Notation::Engineering,
            Notation::Engineering => Notation::Normal,
        }
    }

    /// Parse from common string representations
    pub fn from_name(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "norm" | "fix" => Ok(Notation::Normal),
            "scientific" | "sci" => Ok(Notation::Scientific),
            "engineering" | "eng" => Ok(Notation::Engineering),
            _ => Err(CalcError::invalid_input(
                "notation",
                s,
                "expected one of normal, scientific, engineering",
            )),
        }
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format `value` under `notation`
pub fn format(value: f64, notation: Notation) -> String {
    if !value.is_finite() {
        return ERROR_MARKER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    match notation {
        Notation::Normal => {
            if abs >= 1e10 || abs < 1e-6 {
                to_exponential(value, 6)
            } else if value.fract() == 0.0 {
                format!("{}", value)
            } else {
                // Round to 12 significant digits, then print the shortest form
                let rounded = format!("{:.11e}", value).parse::<f64>().unwrap_or(value);
                format!("{}", rounded)
            }
        }
        Notation::Scientific => {
            if abs >= 1e6 || abs < 1e-3 {
                to_exponential(value, 6)
            } else {
                trim_fraction_zeros(to_precision(value, 10))
            }
        }
        Notation::Engineering => {
            if abs >= 1000.0 || abs < 1e-3 {
                to_engineering(value)
            } else {
                format!("{}", value)
            }
        }
    }
}

/// `d.dddddde+x` with `digits` fractional mantissa digits
fn to_exponential(value: f64, digits: usize) -> String {
    let (mantissa, exponent) = split_exponential(value, digits);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{}", mantissa, sign, exponent.abs())
}

/// Rust's `{:e}` output split into mantissa text and exponent
fn split_exponential(value: f64, digits: usize) -> (String, i32) {
    let text = format!("{:.*e}", digits, value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

/// Fixed-point rendering with `significant` significant digits
fn to_precision(value: f64, significant: usize) -> String {
    let (_, exponent) = split_exponential(value, significant - 1);
    let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}

fn trim_fraction_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Mantissa with 3 decimals and an exponent that is a multiple of 3.
///
/// Digits are taken from exponential formatting and the decimal point is
/// shifted, so subnormal inputs never divide by an underflowed power of ten.
fn to_engineering(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let mut exponent = decimal_exponent(value);
    loop {
        let eng = exponent.div_euclid(3) * 3;
        let shift = (exponent - eng) as usize;
        let (mantissa, rounded) = split_exponential(value, shift + 3);

        if rounded == exponent {
            let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
            let (whole, fraction) = digits.split_at(shift + 1);
            return format!("{}{}.{}E{}", sign, whole, fraction, eng);
        }
        if rounded > exponent {
            // Rounding carried into the next power of ten: 1 followed by zeros
            let eng = rounded.div_euclid(3) * 3;
            let zeros = "0".repeat((rounded - eng) as usize);
            return format!("{}1{}.000E{}", sign, zeros, eng);
        }
        // The shortest form of a subnormal can overstate its magnitude
        exponent = rounded;
    }
}

/// Exponent of the shortest exponential representation
fn decimal_exponent(value: f64) -> i32 {
    let text = format!("{:e}", value);
    text.split_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite() {
        for notation in Notation::ALL {
            assert_eq!(format(f64::NAN, notation), ERROR_MARKER);
            assert_eq!(format(f64::INFINITY, notation), ERROR_MARKER);
            assert_eq!(format(f64::NEG_INFINITY, notation), ERROR_MARKER);
        }
    }

    #[test]
    fn test_zero() {
        for notation in Notation::ALL {
            assert_eq!(format(0.0, notation), "0");
            assert_eq!(format(-0.0, notation), "0");
        }
    }

    #[test]
    fn test_normal() {
        assert_eq!(format(42.0, Notation::Normal), "42");
        assert_eq!(format(-7.0, Notation::Normal), "-7");
        assert_eq!(format(1234567.0, Notation::Normal), "1234567");
        assert_eq!(format(0.1 + 0.2, Notation::Normal), "0.3");
        assert_eq!(format(1.0 / 3.0, Notation::Normal), "0.333333333333");
        assert_eq!(format(2.5e-6, Notation::Normal), "0.0000025");
        assert_eq!(format(1.5e10, Notation::Normal), "1.500000e+10");
        assert_eq!(format(1.5e-7, Notation::Normal), "1.500000e-7");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format(1234567.0, Notation::Scientific), "1.234567e+6");
        assert_eq!(format(-0.000123, Notation::Scientific), "-1.230000e-4");
        assert_eq!(format(12.5, Notation::Scientific), "12.5");
        assert_eq!(format(100.0, Notation::Scientific), "100");
        assert_eq!(format(2.0 / 3.0, Notation::Scientific), "0.6666666667");
        assert_eq!(format(999999.0, Notation::Scientific), "999999");
    }

    #[test]
    fn test_engineering() {
        assert_eq!(format(1234567.0, Notation::Engineering), "1.235E6");
        assert_eq!(format(1000.0, Notation::Engineering), "1.000E3");
        assert_eq!(format(-45600.0, Notation::Engineering), "-45.600E3");
        assert_eq!(format(0.000047, Notation::Engineering), "47.000E-6");
        assert_eq!(format(12.5, Notation::Engineering), "12.5");
        // Rounds up into the next group instead of printing 1000.000E3
        assert_eq!(format(999999.9, Notation::Engineering), "1.000E6");
        assert_eq!(format(99999.96, Notation::Engineering), "100.000E3");
    }

    #[test]
    fn test_engineering_extremes() {
        assert_eq!(format(5e-324, Notation::Engineering), "4.941E-324");
        assert_eq!(format(1e-310, Notation::Engineering), "100.000E-312");
        assert_eq!(format(-2.5e-320, Notation::Engineering), "-25.000E-321");
        assert_eq!(format(1e-308, Notation::Engineering), "10.000E-309");
        assert_eq!(format(f64::MAX, Notation::Engineering), "179.769E306");
        // Stored value is 9.99989e-321 although it prints as 1e-320
        assert_eq!(format(1e-320, Notation::Engineering), "10.000E-321");

        for v in [f64::MIN_POSITIVE, 1e-320, 3e-315, f64::MAX] {
            let text = format(v, Notation::Engineering);
            let (mantissa, exponent) = text.split_once('E').unwrap();
            let mantissa: f64 = mantissa.parse().unwrap();
            assert!((1.0..1000.0).contains(&mantissa), "{} -> {}", v, text);
            assert_eq!(exponent.parse::<i32>().unwrap().rem_euclid(3), 0);
        }
    }

    #[test]
    fn test_notation_names() {
        assert_eq!(Notation::from_name("SCI").unwrap(), Notation::Scientific);
        assert_eq!(Notation::from_name("eng").unwrap(), Notation::Engineering);
        assert!(Notation::from_name("roman").is_err());
        assert_eq!(Notation::Engineering.next(), Notation::Normal);
        assert_eq!(serde_json::to_string(&Notation::Scientific).unwrap(), "\"scientific\"");
    }
}
