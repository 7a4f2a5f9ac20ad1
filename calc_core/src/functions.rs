//! # Function Evaluator
//!
//! Single-operand scientific functions (the calculator's function keys).
//! Names are resolved once into the closed [`Function`] enum; evaluation is
//! an exhaustive match with explicit domain checks.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::angle::AngleMode;
//! use calc_core::functions::{apply, Function};
//!
//! let one = apply("sin", 90.0, AngleMode::Degrees).unwrap();
//! assert!((one - 1.0).abs() < 1e-12);
//!
//! assert_eq!(Function::Factorial.apply(5.0, AngleMode::Degrees).unwrap(), 120.0);
//! assert!(apply("n!", -1.0, AngleMode::Degrees).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::angle::AngleMode;
use crate::errors::{CalcError, CalcResult};

/// Supported single-operand functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    #[serde(rename = "sin")]
    Sin,
    #[serde(rename = "cos")]
    Cos,
    #[serde(rename = "tan")]
    Tan,
    #[serde(rename = "asin")]
    Asin,
    #[serde(rename = "acos")]
    Acos,
    #[serde(rename = "atan")]
    Atan,
    /// Natural logarithm
    #[serde(rename = "ln")]
    Ln,
    /// Base-10 logarithm
    #[serde(rename = "log")]
    Log,
    #[serde(rename = "sqrt")]
    Sqrt,
    /// x²
    #[serde(rename = "x²")]
    Square,
    /// x³
    #[serde(rename = "x³")]
    Cube,
    /// 10^x
    #[serde(rename = "10^x")]
    PowTen,
    /// e^x
    #[serde(rename = "e^x")]
    Exp,
    /// n!
    #[serde(rename = "n!")]
    Factorial,
}

impl Function {
    /// All functions, in keypad order
    pub const ALL: [Function; 14] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Ln,
        Function::Log,
        Function::Sqrt,
        Function::Square,
        Function::Cube,
        Function::PowTen,
        Function::Exp,
        Function::Factorial,
    ];

    /// Canonical (keypad) name
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Square => "x²",
            Function::Cube => "x³",
            Function::PowTen => "10^x",
            Function::Exp => "e^x",
            Function::Factorial => "n!",
        }
    }

    /// Parse from keypad names and common ASCII aliases (case-insensitive)
    pub fn from_name(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "sin" => Ok(Function::Sin),
            "cos" => Ok(Function::Cos),
            "tan" => Ok(Function::Tan),
            "asin" | "arcsin" => Ok(Function::Asin),
            "acos" | "arccos" => Ok(Function::Acos),
            "atan" | "arctan" => Ok(Function::Atan),
            "ln" => Ok(Function::Ln),
            "log" | "log10" => Ok(Function::Log),
            "sqrt" | "√" => Ok(Function::Sqrt),
            "x²" | "x^2" | "sqr" => Ok(Function::Square),
            "x³" | "x^3" | "cube" => Ok(Function::Cube),
            "10^x" | "pow10" => Ok(Function::PowTen),
            "e^x" | "exp" => Ok(Function::Exp),
            "n!" | "fact" => Ok(Function::Factorial),
            _ => Err(CalcError::unknown_function(s)),
        }
    }

    /// Whether the angle mode affects this function
    pub fn uses_angle(&self) -> bool {
        matches!(
            self,
            Function::Sin | Function::Cos | Function::Tan | Function::Asin | Function::Acos | Function::Atan
        )
    }

    /// Evaluate the function at `value`.
    ///
    /// Trig inputs are read in `angle_mode`; inverse trig results are
    /// returned in `angle_mode`.
    ///
    /// # Errors
    ///
    /// `DomainError` when `value` is outside the function's domain.
    pub fn apply(self, value: f64, angle_mode: AngleMode) -> CalcResult<f64> {
        match self {
            Function::Sin => Ok(angle_mode.to_radians(value).sin()),
            Function::Cos => Ok(angle_mode.to_radians(value).cos()),
            Function::Tan => {
                if angle_mode.is_odd_quarter_turn(value) {
                    return Err(CalcError::domain(
                        "tan",
                        format!("tangent is undefined at {} {}", value, angle_mode.code()),
                    ));
                }
                Ok(angle_mode.to_radians(value).tan())
            }
            Function::Asin => {
                check_unit_interval("asin", value)?;
                Ok(angle_mode.from_radians(value.asin()))
            }
            Function::Acos => {
                check_unit_interval("acos", value)?;
                Ok(angle_mode.from_radians(value.acos()))
            }
            Function::Atan => Ok(angle_mode.from_radians(value.atan())),
            Function::Ln => {
                check_positive("ln", value)?;
                Ok(value.ln())
            }
            Function::Log => {
                check_positive("log", value)?;
                Ok(value.log10())
            }
            Function::Sqrt => sqrt(value),
            Function::Square => Ok(value * value),
            Function::Cube => Ok(value * value * value),
            Function::PowTen => Ok(10f64.powf(value)),
            Function::Exp => Ok(value.exp()),
            Function::Factorial => factorial(value),
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Apply a function by name.
///
/// # Errors
///
/// * `UnknownFunction` - `function_name` is not supported
/// * `DomainError` - `value` is outside the function's domain
pub fn apply(function_name: &str, value: f64, angle_mode: AngleMode) -> CalcResult<f64> {
    Function::from_name(function_name)?.apply(value, angle_mode)
}

/// Square root, rejecting negative operands
pub fn sqrt(value: f64) -> CalcResult<f64> {
    if value < 0.0 {
        return Err(CalcError::domain("sqrt", "argument must not be negative"));
    }
    Ok(value.sqrt())
}

/// Integer factorial by repeated multiplication.
///
/// Overflow is accepted: once the product reaches infinity the loop stops and
/// infinity is returned.
pub fn factorial(value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(CalcError::domain("n!", "argument must be a non-negative integer"));
    }
    if value < 0.0 {
        return Err(CalcError::domain("n!", "argument must not be negative"));
    }

    let mut result = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= value && result.is_finite() {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

fn check_unit_interval(op: &str, value: f64) -> CalcResult<()> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::domain(op, "argument must be within [-1, 1]"));
    }
    Ok(())
}

fn check_positive(op: &str, value: f64) -> CalcResult<()> {
    if value <= 0.0 {
        return Err(CalcError::domain(op, "argument must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, PI};

    const EPS: f64 = 1e-10;

    #[test]
    fn test_sin_degrees_and_radians() {
        assert!((apply("sin", 90.0, AngleMode::Degrees).unwrap() - 1.0).abs() < EPS);
        assert!((apply("sin", PI / 2.0, AngleMode::Radians).unwrap() - 1.0).abs() < EPS);
        assert!((apply("cos", 200.0, AngleMode::Gradians).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_tan_undefined_points() {
        assert!(matches!(
            apply("tan", 90.0, AngleMode::Degrees),
            Err(CalcError::DomainError { .. })
        ));
        assert!(apply("tan", 100.0, AngleMode::Gradians).is_err());
        assert!((apply("tan", 45.0, AngleMode::Degrees).unwrap() - 1.0).abs() < EPS);
        // Radians cannot hit pi/2 exactly, so a large finite value comes back
        assert!(apply("tan", PI / 2.0, AngleMode::Radians).unwrap().abs() > 1e15);
    }

    #[test]
    fn test_inverse_trig() {
        assert!((apply("asin", 1.0, AngleMode::Degrees).unwrap() - 90.0).abs() < EPS);
        assert!((apply("acos", -1.0, AngleMode::Gradians).unwrap() - 200.0).abs() < EPS);
        assert!((apply("atan", 1.0, AngleMode::Radians).unwrap() - PI / 4.0).abs() < EPS);
        assert!(apply("asin", 1.5, AngleMode::Degrees).is_err());
        assert!(apply("acos", -1.0001, AngleMode::Radians).is_err());
    }

    #[test]
    fn test_logs() {
        assert!((apply("ln", E, AngleMode::Degrees).unwrap() - 1.0).abs() < EPS);
        assert_eq!(apply("log", 1000.0, AngleMode::Degrees).unwrap(), 3.0);
        assert!(apply("ln", 0.0, AngleMode::Degrees).is_err());
        assert!(apply("log", -10.0, AngleMode::Degrees).is_err());
    }

    #[test]
    fn test_powers_and_roots() {
        assert_eq!(apply("sqrt", 16.0, AngleMode::Degrees).unwrap(), 4.0);
        assert!(apply("sqrt", -4.0, AngleMode::Degrees).is_err());
        assert_eq!(apply("x²", -3.0, AngleMode::Degrees).unwrap(), 9.0);
        assert_eq!(apply("x³", -2.0, AngleMode::Degrees).unwrap(), -8.0);
        assert_eq!(apply("10^x", 3.0, AngleMode::Degrees).unwrap(), 1000.0);
        assert!((apply("e^x", 1.0, AngleMode::Degrees).unwrap() - E).abs() < EPS);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(apply("n!", 5.0, AngleMode::Degrees).unwrap(), 120.0);
        assert_eq!(apply("n!", 0.0, AngleMode::Degrees).unwrap(), 1.0);
        assert!(matches!(
            apply("n!", -1.0, AngleMode::Degrees),
            Err(CalcError::DomainError { .. })
        ));
        assert!(matches!(
            apply("n!", 3.5, AngleMode::Degrees),
            Err(CalcError::DomainError { .. })
        ));
        assert!(factorial(f64::NAN).is_err());
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(factorial(170.0).unwrap().is_finite());
        assert_eq!(factorial(171.0).unwrap(), f64::INFINITY);
        // Terminates early instead of looping 1e300 times
        assert_eq!(factorial(1e300).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            apply("sinh", 1.0, AngleMode::Radians),
            Err(CalcError::unknown_function("sinh"))
        );
    }

    #[test]
    fn test_names_roundtrip() {
        for f in Function::ALL {
            assert_eq!(Function::from_name(f.name()).unwrap(), f);
        }
        assert_eq!(Function::from_name("SIN").unwrap(), Function::Sin);
        assert_eq!(Function::from_name("x^2").unwrap(), Function::Square);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Function::PowTen).unwrap();
        assert_eq!(json, "\"10^x\"");
        let roundtrip: Function = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Function::PowTen);
    }
}
