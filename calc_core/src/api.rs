//! # Request/Response Boundary
//!
//! The JSON shapes the calculator is consumed through, and the handlers that
//! map them onto the core. Transport (routing, CORS, health checks) lives
//! outside this crate; it only needs to (de)serialize these types.
//!
//! Handlers never fail: any [`CalcError`] becomes `success: false` with the
//! error's message in `error` and its [`CalcError::error_code`] in `code`.
//!
//! ## JSON Example
//!
//! ```json
//! // request
//! { "expression": "2^3^2", "angleMode": "deg" }
//! // response
//! { "success": true, "result": 512.0 }
//! ```
//!
//! ```rust
//! use calc_core::api::{evaluate, EvaluateRequest};
//!
//! let response = evaluate(&EvaluateRequest::new("5/0"));
//! assert!(!response.success);
//! assert_eq!(response.error.as_deref(), Some("Division by zero"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::angle::AngleMode;
use crate::constants::constants_map;
use crate::errors::{CalcError, CalcResult};
use crate::expression;
use crate::functions::Function;
use crate::memory::{MemoryAction, MemoryStore, DEFAULT_SLOT};
use crate::units;

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

// ============================================================================
// Requests
// ============================================================================

/// Evaluate an infix expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub expression: String,
    /// Omitted: the session's mode, or degrees outside a session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_mode: Option<String>,
}

impl EvaluateRequest {
    pub fn new(expression: impl Into<String>) -> Self {
        EvaluateRequest {
            expression: expression.into(),
            angle_mode: None,
        }
    }
}

/// Apply one named function to a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub function: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_mode: Option<String>,
}

/// Memory keypad action ("MS", "MR", "MC", "M+", "M-")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRequest {
    pub action: String,
    #[serde(default = "default_slot")]
    pub slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Convert between two units of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub value: f64,
}

// ============================================================================
// Responses
// ============================================================================

/// Result of an evaluate or function request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<CalcResult<f64>> for CalculationResponse {
    fn from(outcome: CalcResult<f64>) -> Self {
        match outcome {
            Ok(result) => CalculationResponse {
                success: true,
                result: Some(result),
                error: None,
                code: None,
            },
            Err(e) => CalculationResponse {
                success: false,
                result: None,
                error: Some(e.to_string()),
                code: Some(e.error_code().to_string()),
            },
        }
    }
}

/// Result of a memory request; `memory` is always the current bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryResponse {
    pub success: bool,
    pub memory: BTreeMap<String, f64>,
    /// Slot value after the action (the recalled value for MR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Result of a conversion request (`result` is 0 on failure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub success: bool,
    pub result: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Evaluate an expression request (degrees unless the request says otherwise)
pub fn evaluate(request: &EvaluateRequest) -> CalculationResponse {
    evaluate_in(request, AngleMode::default())
}

/// Evaluate an expression request, using `fallback` when it names no angle mode
pub fn evaluate_in(request: &EvaluateRequest, fallback: AngleMode) -> CalculationResponse {
    let outcome = angle_mode_or(request.angle_mode.as_deref(), fallback)
        .and_then(|mode| expression::evaluate_with(&request.expression, mode));
    log_failure("evaluate", &request.expression, &outcome);
    outcome.into()
}

/// Apply a function request (degrees unless the request says otherwise)
pub fn function(request: &FunctionRequest) -> CalculationResponse {
    function_in(request, AngleMode::default())
}

/// Apply a function request, using `fallback` when it names no angle mode
pub fn function_in(request: &FunctionRequest, fallback: AngleMode) -> CalculationResponse {
    let outcome = Function::from_name(&request.function).and_then(|f| {
        let mode = angle_mode_or(request.angle_mode.as_deref(), fallback)?;
        f.apply(request.value, mode)
    });
    log_failure("function", &request.function, &outcome);
    outcome.into()
}

/// Run a memory request against `memory`
pub fn memory(memory: &MemoryStore, request: &MemoryRequest) -> MemoryResponse {
    let outcome = MemoryAction::from_code(&request.action)
        .and_then(|action| memory.execute(action, &request.slot, request.value));
    log_failure("memory", &request.action, &outcome);

    let snapshot = memory.snapshot();
    match outcome {
        Ok(result) => MemoryResponse {
            success: true,
            memory: snapshot,
            result,
            error: None,
            code: None,
        },
        Err(e) => MemoryResponse {
            success: false,
            memory: snapshot,
            result: None,
            error: Some(e.to_string()),
            code: Some(e.error_code().to_string()),
        },
    }
}

/// Run a unit conversion request
pub fn convert(request: &ConvertRequest) -> ConversionResponse {
    let outcome = units::convert_named(&request.category, &request.from_unit, &request.to_unit, request.value);
    log_failure("convert", &request.category, &outcome);

    match outcome {
        Ok(result) => ConversionResponse {
            success: true,
            result,
            error: None,
            code: None,
        },
        Err(e) => ConversionResponse {
            success: false,
            result: 0.0,
            error: Some(e.to_string()),
            code: Some(e.error_code().to_string()),
        },
    }
}

/// Constants query: symbol -> value
pub fn constants() -> BTreeMap<String, f64> {
    constants_map()
}

fn angle_mode_or(name: Option<&str>, fallback: AngleMode) -> CalcResult<AngleMode> {
    name.map_or(Ok(fallback), AngleMode::from_name)
}

fn log_failure<T>(operation: &str, input: &str, outcome: &Result<T, CalcError>) {
    if let Err(e) = outcome {
        tracing::debug!(operation, input, code = e.error_code(), error = %e, "request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_success() {
        let response = evaluate(&EvaluateRequest::new("2+3*4"));
        assert!(response.success);
        assert_eq!(response.result, Some(14.0));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_evaluate_uses_angle_mode() {
        let request: EvaluateRequest =
            serde_json::from_str(r#"{"expression": "sin(100)", "angleMode": "grad"}"#).unwrap();
        let response = evaluate(&request);
        assert!((response.result.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_failure() {
        let response = evaluate(&EvaluateRequest::new("(1+"));
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("SYNTAX_ERROR"));

        let bad_mode = EvaluateRequest {
            expression: "1".to_string(),
            angle_mode: Some("turns".to_string()),
        };
        assert_eq!(evaluate(&bad_mode).code.as_deref(), Some("INVALID_INPUT"));
    }

    #[test]
    fn test_missing_angle_mode_uses_fallback() {
        let request: EvaluateRequest = serde_json::from_str(r#"{"expression": "sin(90)"}"#).unwrap();
        assert_eq!(request.angle_mode, None);
        assert!((evaluate(&request).result.unwrap() - 1.0).abs() < 1e-12);
        let radians = evaluate_in(&request, AngleMode::Radians).result.unwrap();
        assert!((radians - 90f64.sin()).abs() < 1e-12);

        let request: FunctionRequest = serde_json::from_str(r#"{"function": "acos", "value": -1}"#).unwrap();
        assert!((function_in(&request, AngleMode::Gradians).result.unwrap() - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_function_request() {
        let request: FunctionRequest =
            serde_json::from_str(r#"{"function": "n!", "value": 5, "angleMode": "deg"}"#).unwrap();
        assert_eq!(function(&request).result, Some(120.0));

        let unknown = FunctionRequest {
            function: "sinh".to_string(),
            value: 1.0,
            angle_mode: Some("rad".to_string()),
        };
        let response = function(&unknown);
        assert_eq!(response.error.as_deref(), Some("Unknown function: sinh"));
    }

    #[test]
    fn test_memory_requests() {
        let store = MemoryStore::new();
        let request = |action: &str, value: Option<f64>| MemoryRequest {
            action: action.to_string(),
            slot: "M1".to_string(),
            value,
        };

        let response = memory(&store, &request("MR", None));
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Memory slot M1 is empty"));

        assert!(memory(&store, &request("MS", Some(5.0))).success);
        let response = memory(&store, &request("M+", Some(3.0)));
        assert_eq!(response.memory["M1"], 8.0);

        let response = memory(&store, &request("MR", None));
        assert_eq!(response.result, Some(8.0));

        let response = memory(&store, &request("MC", None));
        assert!(response.memory.is_empty());

        let response = memory(&store, &request("MX", None));
        assert_eq!(response.code.as_deref(), Some("UNKNOWN_MEMORY_ACTION"));
    }

    #[test]
    fn test_memory_request_defaults() {
        let request: MemoryRequest = serde_json::from_str(r#"{"action": "MS", "value": 2.5}"#).unwrap();
        assert_eq!(request.slot, "M1");
    }

    #[test]
    fn test_convert_request() {
        let request: ConvertRequest = serde_json::from_str(
            r#"{"category": "temperature", "fromUnit": "f", "toUnit": "c", "value": 32}"#,
        )
        .unwrap();
        let response = convert(&request);
        assert!(response.success);
        assert!(response.result.abs() < 1e-12);

        let bad = ConvertRequest {
            to_unit: "furlong".to_string(),
            ..request
        };
        let response = convert(&bad);
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("UNKNOWN_UNIT"));
    }

    #[test]
    fn test_response_json_shape() {
        let json = serde_json::to_value(evaluate(&EvaluateRequest::new("1+1"))).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "result": 2.0 }));

        let json = serde_json::to_value(evaluate(&EvaluateRequest::new("1/0"))).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "DIVISION_BY_ZERO");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_constants() {
        let table = constants();
        assert_eq!(table["c"], 299_792_458.0);
        assert!(table.contains_key("NA"));
    }
}
