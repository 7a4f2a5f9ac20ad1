//! # Calculator Session
//!
//! A [`Session`] is the per-user (or per-connection) state: its own memory
//! bank plus the current angle mode and notation. Nothing is process-global;
//! two sessions never see each other's memory.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMeta (id, created)
//! ├── settings: Settings (angle mode, notation)
//! └── memory: Arc<MemoryStore>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::session::Session;
//! use calc_core::format::Notation;
//!
//! let mut session = Session::default();
//! session.set_notation(Notation::Engineering);
//!
//! let value = session.evaluate("1200*3").unwrap();
//! assert_eq!(session.format(value), "3.600E3");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::angle::AngleMode;
use crate::api::{
    self, CalculationResponse, ConversionResponse, ConvertRequest, EvaluateRequest, FunctionRequest,
    MemoryRequest, MemoryResponse,
};
use crate::config::Settings;
use crate::errors::CalcResult;
use crate::expression;
use crate::format::{self, Notation};
use crate::functions::Function;
use crate::memory::MemoryStore;

/// Session identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub id: Uuid,
    pub created: DateTime<Utc>,
}

/// Per-session calculator state
#[derive(Debug, Clone)]
pub struct Session {
    pub meta: SessionMeta,
    pub settings: Settings,
    memory: Arc<MemoryStore>,
}

impl Session {
    /// Create a session with its own empty memory bank
    pub fn new(settings: Settings) -> Self {
        Self::with_memory(settings, Arc::new(MemoryStore::new()))
    }

    /// Create a session over an existing memory bank (e.g. one shared by the
    /// tabs of a single user)
    pub fn with_memory(settings: Settings, memory: Arc<MemoryStore>) -> Self {
        let session = Session {
            meta: SessionMeta {
                id: Uuid::new_v4(),
                created: Utc::now(),
            },
            settings,
            memory,
        };
        tracing::debug!(id = %session.meta.id, "session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.meta.id
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Handle to the memory bank for sharing with another session
    pub fn memory_handle(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.memory)
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.settings.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.settings.angle_mode = mode;
    }

    pub fn notation(&self) -> Notation {
        self.settings.notation
    }

    pub fn set_notation(&mut self, notation: Notation) {
        self.settings.notation = notation;
    }

    /// Evaluate an expression in the session's angle mode
    pub fn evaluate(&self, text: &str) -> CalcResult<f64> {
        expression::evaluate_with(text, self.settings.angle_mode)
    }

    /// Apply a named function in the session's angle mode
    pub fn apply(&self, function_name: &str, value: f64) -> CalcResult<f64> {
        Function::from_name(function_name)?.apply(value, self.settings.angle_mode)
    }

    /// Format a value in the session's notation
    pub fn format(&self, value: f64) -> String {
        format::format(value, self.settings.notation)
    }

    // Wire-level handlers; a request without `angleMode` uses the session's mode

    pub fn handle_evaluate(&self, request: &EvaluateRequest) -> CalculationResponse {
        api::evaluate_in(request, self.settings.angle_mode)
    }

    pub fn handle_function(&self, request: &FunctionRequest) -> CalculationResponse {
        api::function_in(request, self.settings.angle_mode)
    }

    pub fn handle_memory(&self, request: &MemoryRequest) -> MemoryResponse {
        api::memory(&self.memory, request)
    }

    pub fn handle_convert(&self, request: &ConvertRequest) -> ConversionResponse {
        api::convert(request)
    }

    pub fn handle_constants(&self) -> BTreeMap<String, f64> {
        api::constants()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_isolated() {
        let a = Session::default();
        let b = Session::default();
        assert_ne!(a.id(), b.id());

        a.memory().store("M1", 1.0).unwrap();
        assert!(b.memory().recall("M1").is_err());
    }

    #[test]
    fn test_shared_memory_handle() {
        let a = Session::default();
        let b = Session::with_memory(Settings::default(), a.memory_handle());
        a.memory().store("M1", 9.0).unwrap();
        assert_eq!(b.memory().recall("M1").unwrap(), 9.0);
    }

    #[test]
    fn test_angle_mode_applies() {
        let mut session = Session::default();
        assert!((session.apply("sin", 90.0).unwrap() - 1.0).abs() < 1e-12);
        session.set_angle_mode(AngleMode::Radians);
        assert!((session.evaluate("sin(pi/2)").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_format_uses_notation() {
        let mut session = Session::default();
        assert_eq!(session.format(1234567.0), "1234567");
        session.set_notation(Notation::Scientific);
        assert_eq!(session.format(1234567.0), "1.234567e+6");
    }

    #[test]
    fn test_handlers_default_to_session_angle_mode() {
        let mut session = Session::default();
        session.set_angle_mode(AngleMode::Radians);

        let response = session.handle_evaluate(&EvaluateRequest::new("sin(pi/2)"));
        assert!((response.result.unwrap() - 1.0).abs() < 1e-12);

        let request = FunctionRequest {
            function: "sin".to_string(),
            value: 90.0,
            angle_mode: None,
        };
        assert!((session.handle_function(&request).result.unwrap() - 90f64.sin()).abs() < 1e-12);

        // An explicit mode still wins
        let request = FunctionRequest {
            angle_mode: Some("deg".to_string()),
            ..request
        };
        assert!((session.handle_function(&request).result.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_handle_memory() {
        let session = Session::default();
        let response = session.handle_memory(&MemoryRequest {
            action: "MS".to_string(),
            slot: "M2".to_string(),
            value: Some(4.0),
        });
        assert!(response.success);
        assert_eq!(session.memory().recall("M2").unwrap(), 4.0);
    }

    #[test]
    fn test_meta_serialization() {
        let session = Session::default();
        let json = serde_json::to_string(&session.meta).unwrap();
        let roundtrip: SessionMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, session.meta);
    }
}
