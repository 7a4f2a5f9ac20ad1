//! # Memory Store
//!
//! Named memory registers (`M1`, `M2`, ...). A [`MemoryStore`] is an owned
//! instance created per session; share it between threads with `Arc`.
//! Every operation takes the lock exactly once, so each call is atomic with
//! respect to concurrent callers.
//!
//! An absent slot is "empty", which is different from a slot holding `0`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::memory::{MemoryStore, Sign};
//!
//! let memory = MemoryStore::new();
//! assert!(memory.recall("M1").is_err());
//!
//! memory.store("M1", 5.0).unwrap();
//! memory.accumulate("M1", 3.0, Sign::Plus).unwrap();
//! assert_eq!(memory.recall("M1").unwrap(), 8.0);
//!
//! memory.clear("M1").unwrap();
//! assert!(memory.recall("M1").is_err());
//! ```

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Slot used when a request does not name one
pub const DEFAULT_SLOT: &str = "M1";

/// Direction for [`MemoryStore::accumulate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

/// Memory keypad actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryAction {
    /// MS - store the value
    #[serde(rename = "MS")]
    Store,
    /// MR - recall the slot
    #[serde(rename = "MR")]
    Recall,
    /// MC - clear the slot
    #[serde(rename = "MC")]
    Clear,
    /// M+ - add to the slot
    #[serde(rename = "M+")]
    Add,
    /// M- - subtract from the slot
    #[serde(rename = "M-")]
    Subtract,
}

impl MemoryAction {
    /// Keypad code ("MS", "MR", ...)
    pub fn code(&self) -> &'static str {
        match self {
            MemoryAction::Store => "MS",
            MemoryAction::Recall => "MR",
            MemoryAction::Clear => "MC",
            MemoryAction::Add => "M+",
            MemoryAction::Subtract => "M-",
        }
    }

    /// Parse a keypad code (case-insensitive)
    pub fn from_code(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "MS" => Ok(MemoryAction::Store),
            "MR" => Ok(MemoryAction::Recall),
            "MC" => Ok(MemoryAction::Clear),
            "M+" => Ok(MemoryAction::Add),
            "M-" => Ok(MemoryAction::Subtract),
            _ => Err(CalcError::unknown_memory_action(s)),
        }
    }
}

/// Register bank keyed by slot name
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, f64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `slot` with `value`
    pub fn store(&self, slot: &str, value: f64) -> CalcResult<()> {
        let slot = slot_name(slot)?;
        tracing::trace!(slot, value, "memory store");
        self.slots.lock().insert(slot.to_string(), value);
        Ok(())
    }

    /// Read `slot`; `EmptySlot` if it was never stored or has been cleared
    pub fn recall(&self, slot: &str) -> CalcResult<f64> {
        let slot = slot_name(slot)?;
        self.slots
            .lock()
            .get(slot)
            .copied()
            .ok_or_else(|| CalcError::empty_slot(slot))
    }

    /// Remove `slot`; clearing an empty slot is not an error
    pub fn clear(&self, slot: &str) -> CalcResult<()> {
        let slot = slot_name(slot)?;
        tracing::trace!(slot, "memory clear");
        self.slots.lock().remove(slot);
        Ok(())
    }

    /// Add or subtract `delta` and return the new value.
    ///
    /// Never creates a slot: `EmptySlot` if `slot` is absent.
    pub fn accumulate(&self, slot: &str, delta: f64, sign: Sign) -> CalcResult<f64> {
        let slot = slot_name(slot)?;
        let mut slots = self.slots.lock();
        let current = slots.get_mut(slot).ok_or_else(|| CalcError::empty_slot(slot))?;
        match sign {
            Sign::Plus => *current += delta,
            Sign::Minus => *current -= delta,
        }
        tracing::trace!(slot, delta, ?sign, value = *current, "memory accumulate");
        Ok(*current)
    }

    /// Copy of every stored slot
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.slots
            .lock()
            .iter()
            .map(|(slot, value)| (slot.clone(), *value))
            .collect()
    }

    /// Remove every slot
    pub fn clear_all(&self) {
        self.slots.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Run a keypad action.
    ///
    /// Returns the slot's value afterwards (`None` after a clear).
    ///
    /// # Errors
    ///
    /// * `MissingField` - MS, M+ or M- without a value
    /// * `EmptySlot` - MR, M+ or M- on an empty slot
    pub fn execute(&self, action: MemoryAction, slot: &str, value: Option<f64>) -> CalcResult<Option<f64>> {
        let required = || value.ok_or_else(|| CalcError::missing_field("value"));
        match action {
            MemoryAction::Store => {
                let v = required()?;
                self.store(slot, v)?;
                Ok(Some(v))
            }
            MemoryAction::Recall => self.recall(slot).map(Some),
            MemoryAction::Clear => {
                self.clear(slot)?;
                Ok(None)
            }
            MemoryAction::Add => self.accumulate(slot, required()?, Sign::Plus).map(Some),
            MemoryAction::Subtract => self.accumulate(slot, required()?, Sign::Minus).map(Some),
        }
    }
}

fn slot_name(slot: &str) -> CalcResult<&str> {
    let trimmed = slot.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_input("slot", slot, "slot name must not be blank"));
    }
    Ok(trimmed)
}
