//! # Error Types
//!
//! Structured error types for calc_core. Every public operation returns a
//! [`CalcResult`]; the request boundary in [`crate::api`] turns any of these
//! into a `success: false` response, so no error is ever fatal.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn checked_ln(x: f64) -> CalcResult<f64> {
//!     if x <= 0.0 {
//!         return Err(CalcError::domain("ln", "argument must be greater than zero"));
//!     }
//!     Ok(x.ln())
//! }
//!
//! assert_eq!(checked_ln(-1.0).unwrap_err().error_code(), "DOMAIN_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
///
/// Each variant carries enough context to render a human-readable message
/// and to be handled programmatically via [`CalcError::error_code`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Expression text could not be tokenized or parsed
    #[error("Syntax error at position {pos}: {detail}")]
    SyntaxError { pos: usize, detail: String },

    /// Right-hand operand of `/` was exactly zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Argument outside the domain of an operation
    #[error("Domain error in '{op}': {reason}")]
    DomainError { op: String, reason: String },

    /// Function name is not one of the supported functions
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    /// Unit (or unit category) is not known
    #[error("Unknown unit '{unit}' in category '{category}'")]
    UnknownUnit { category: String, unit: String },

    /// Memory slot has never been stored or was cleared
    #[error("Memory slot {slot} is empty")]
    EmptySlot { slot: String },

    /// Memory action code is not one of MS, MR, MC, M+, M-
    #[error("Unknown memory action: {action}")]
    UnknownMemoryAction { action: String },

    /// An input value is invalid (unrecognized name, blank slot, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// TOML/JSON deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a SyntaxError
    pub fn syntax(pos: usize, detail: impl Into<String>) -> Self {
        CalcError::SyntaxError {
            pos,
            detail: detail.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(op: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownFunction error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        CalcError::UnknownFunction { name: name.into() }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }

    /// Create an EmptySlot error
    pub fn empty_slot(slot: impl Into<String>) -> Self {
        CalcError::EmptySlot { slot: slot.into() }
    }

    /// Create an UnknownMemoryAction error
    pub fn unknown_memory_action(action: impl Into<String>) -> Self {
        CalcError::UnknownMemoryAction {
            action: action.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Position in the input text, for errors that have one
    pub fn position(&self) -> Option<usize> {
        match self {
            CalcError::SyntaxError { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::SyntaxError { .. } => "SYNTAX_ERROR",
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::UnknownFunction { .. } => "UNKNOWN_FUNCTION",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::EmptySlot { .. } => "EMPTY_SLOT",
            CalcError::UnknownMemoryAction { .. } => "UNKNOWN_MEMORY_ACTION",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::syntax(3, "unexpected ')'");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"SyntaxError\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&CalcError::DivisionByZero).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, CalcError::DivisionByZero);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::empty_slot("M1").error_code(), "EMPTY_SLOT");
        assert_eq!(CalcError::unknown_unit("length", "parsec").error_code(), "UNKNOWN_UNIT");
        assert_eq!(CalcError::unknown_memory_action("MX").error_code(), "UNKNOWN_MEMORY_ACTION");
    }

    #[test]
    fn test_messages() {
        assert_eq!(CalcError::empty_slot("M2").to_string(), "Memory slot M2 is empty");
        assert_eq!(
            CalcError::syntax(4, "unbalanced parenthesis").to_string(),
            "Syntax error at position 4: unbalanced parenthesis"
        );
        assert_eq!(CalcError::syntax(4, "x").position(), Some(4));
        assert_eq!(CalcError::DivisionByZero.position(), None);
    }
}
