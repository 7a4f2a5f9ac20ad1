//! # Physical and Mathematical Constants
//!
//! Fixed table served by the constants query and resolvable by symbol inside
//! expressions (`2*π`, `NA*k`). Values are CODATA 2018, matching the values
//! the keypad's constant menu has always shown.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::Serialize;

/// A named constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constant {
    /// Symbol used on the keypad and in expressions (e.g. "c", "NA")
    pub symbol: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Value in SI units
    pub value: f64,
    /// SI unit, empty for dimensionless constants
    pub unit: &'static str,
}

const fn constant(symbol: &'static str, name: &'static str, value: f64, unit: &'static str) -> Constant {
    Constant {
        symbol,
        name,
        value,
        unit,
    }
}

/// The constant table, in menu order
pub static CONSTANTS: [Constant; 18] = [
    constant("π", "Pi", std::f64::consts::PI, ""),
    constant("e", "Euler's number", std::f64::consts::E, ""),
    constant("c", "Speed of light in vacuum", 299_792_458.0, "m/s"),
    constant("h", "Planck constant", 6.626_070_15e-34, "J·s"),
    constant("ħ", "Reduced Planck constant", 1.054_571_817e-34, "J·s"),
    constant("G", "Gravitational constant", 6.674_30e-11, "m³/(kg·s²)"),
    constant("k", "Boltzmann constant", 1.380_649e-23, "J/K"),
    constant("NA", "Avogadro constant", 6.022_140_76e23, "1/mol"),
    constant("R", "Molar gas constant", 8.314_462_618, "J/(mol·K)"),
    constant("σ", "Stefan-Boltzmann constant", 5.670_374_419e-8, "W/(m²·K⁴)"),
    constant("ε", "Vacuum electric permittivity", 8.854_187_812_8e-12, "F/m"),
    constant("μ", "Vacuum magnetic permeability", 1.256_637_062_12e-6, "N/A²"),
    constant("me", "Electron mass", 9.109_383_701_5e-31, "kg"),
    constant("mp", "Proton mass", 1.672_621_923_69e-27, "kg"),
    constant("mn", "Neutron mass", 1.674_927_498_04e-27, "kg"),
    constant("qe", "Elementary charge", 1.602_176_634e-19, "C"),
    constant("α", "Fine-structure constant", 7.297_352_569_3e-3, ""),
    constant("g", "Standard gravity", 9.806_65, "m/s²"),
];

static BY_SYMBOL: Lazy<HashMap<&'static str, &'static Constant>> =
    Lazy::new(|| CONSTANTS.iter().map(|c| (c.symbol, c)).collect());

/// All constants, in menu order
pub fn constants() -> &'static [Constant] {
    &CONSTANTS
}

/// Look up a constant by its exact symbol.
///
/// `pi` is accepted as an ASCII spelling of `π`.
pub fn constant_by_symbol(symbol: &str) -> Option<&'static Constant> {
    let symbol = if symbol.eq_ignore_ascii_case("pi") { "π" } else { symbol };
    BY_SYMBOL.get(symbol).copied()
}

/// Symbol -> value mapping, as returned by the constants query
pub fn constants_map() -> BTreeMap<String, f64> {
    CONSTANTS.iter().map(|c| (c.symbol.to_string(), c.value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_unique() {
        assert_eq!(BY_SYMBOL.len(), CONSTANTS.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(constant_by_symbol("c").unwrap().value, 299_792_458.0);
        assert_eq!(constant_by_symbol("PI").unwrap().symbol, "π");
        assert!(constant_by_symbol("C").is_none());
        assert!(constant_by_symbol("unknown").is_none());
    }

    #[test]
    fn test_map() {
        let map = constants_map();
        assert_eq!(map.len(), 18);
        assert_eq!(map["π"], std::f64::consts::PI);
        assert_eq!(map["g"], 9.80665);
    }
}
