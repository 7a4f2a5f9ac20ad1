//! # calc_core - Scientific Calculator Engine
//!
//! `calc_core` is the computational heart of Sci-Calc: expression parsing,
//! scientific functions, unit conversion, memory registers and number
//! formatting. Request and response types are JSON-serializable so any
//! transport (HTTP, IPC, a TUI) can sit on top without extra glue.
//!
//! ## Design Philosophy
//!
//! - **Pure core**: evaluation, functions, conversion and formatting are
//!   stateless functions of their inputs and safe to call from any thread
//! - **Explicit state**: the only mutable state is a [`MemoryStore`], owned
//!   by a [`Session`] rather than a global
//! - **Closed vocabularies**: function names, memory actions, units, angle
//!   modes and notations parse into enums; unknown names are typed errors
//! - **Rich Errors**: structured [`CalcError`] variants, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{evaluate, format, Notation};
//!
//! let value = evaluate("(2 + 3) × 4^2").unwrap();
//! assert_eq!(value, 80.0);
//! assert_eq!(format(value, Notation::Normal), "80");
//! ```
//!
//! ## Modules
//!
//! - [`expression`] - infix expression evaluator
//! - [`functions`] - single-operand scientific functions
//! - [`angle`] - degree / radian / gradian handling
//! - [`units`] - unit conversion (multiplicative and temperature)
//! - [`memory`] - memory registers
//! - [`format`] - normal / scientific / engineering rendering
//! - [`constants`] - physical and mathematical constants
//! - [`api`] - request/response shapes and handlers
//! - [`session`] - per-session state
//! - [`config`] - TOML settings
//! - [`errors`] - structured error types

pub mod angle;
pub mod api;
pub mod config;
pub mod constants;
pub mod errors;
pub mod expression;
pub mod format;
pub mod functions;
pub mod memory;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use angle::AngleMode;
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
pub use expression::{evaluate, evaluate_with};
pub use format::{format, Notation};
pub use functions::{apply, Function};
pub use memory::{MemoryAction, MemoryStore, Sign};
pub use session::Session;
pub use units::{convert, convert_named, UnitCategory};
