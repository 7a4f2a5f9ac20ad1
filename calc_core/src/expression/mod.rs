//! # Expression Evaluator
//!
//! Parses and evaluates infix arithmetic text into an `f64`.
//!
//! ## Pipeline
//!
//! 1. [`lexer::preprocess`] - strip whitespace, normalize `÷ × −` glyphs
//! 2. [`lexer::tokenize`] - numbers, operators, parentheses, names
//! 3. [`parser::parse`] - recursive descent into an [`ast::Expr`]
//! 4. [`ast::Expr::eval`] - IEEE-754 evaluation with domain checks
//!
//! ## Operators (lowest to highest precedence)
//!
//! - `+`, `-`
//! - `*`, `/` (division by exactly zero is an error)
//! - `^` (right-associative: `2^3^2` is `2^9`)
//! - unary `-` / `+`
//! - postfix `%` (divide by 100) and `!` (factorial)
//!
//! Function names (`sqrt`, `√`, `sin`, `ln`, ...) apply to the following
//! primary, so `sqrt(16)`, `√16` and `sin30` all work. Constants from
//! [`crate::constants`] (`π`, `pi`, `e`, `c`, ...) are usable by symbol.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::angle::AngleMode;
//! use calc_core::expression::{evaluate, evaluate_with};
//! use calc_core::errors::CalcError;
//!
//! assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
//! assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
//! assert_eq!(evaluate("5/(2-2)"), Err(CalcError::DivisionByZero));
//!
//! let half = evaluate_with("sin(π/6)", AngleMode::Radians).unwrap();
//! assert!((half - 0.5).abs() < 1e-12);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, Expr};
pub use lexer::{Op, Spanned, Token};

use crate::angle::AngleMode;
use crate::errors::CalcResult;

/// Evaluate `text` with trig functions in the default angle mode (degrees)
pub fn evaluate(text: &str) -> CalcResult<f64> {
    evaluate_with(text, AngleMode::default())
}

/// Evaluate `text`, reading trig arguments in `angle_mode`.
///
/// # Errors
///
/// * `SyntaxError` - bad characters, unbalanced parentheses, missing
///   operands, trailing tokens (with a character position)
/// * `DivisionByZero` - right operand of `/` is exactly zero
/// * `DomainError` - e.g. `sqrt` of a negative, `(-8)^(1/3)`
/// * `UnknownFunction` - `name(...)` with an unrecognized name
pub fn evaluate_with(text: &str, angle_mode: AngleMode) -> CalcResult<f64> {
    parse(text)?.eval(angle_mode)
}

/// Parse `text` into an expression tree without evaluating it
pub fn parse(text: &str) -> CalcResult<Expr> {
    let chars = lexer::preprocess(text);
    let tokens = lexer::tokenize(&chars)?;
    parser::parse(&tokens, text.chars().count())
}
