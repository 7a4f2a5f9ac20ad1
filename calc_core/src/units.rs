//! # Unit Conversion
//!
//! Converts a value between two named units of one [`UnitCategory`].
//!
//! ## Two kinds of conversion
//!
//! - **Multiplicative** (length, mass, area, volume): every unit has a
//!   factor "units per base unit" and `value / factor[from] * factor[to]`.
//! - **Affine** (temperature): scales have different zero points, so a
//!   factor alone is wrong. Values go through Celsius:
//!   `from -> °C -> to`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, convert_named, UnitCategory};
//!
//! let ft = convert(UnitCategory::Length, "m", "ft", 1.0).unwrap();
//! assert!((ft - 3.28084).abs() < 1e-5);
//!
//! let f = convert_named("temperature", "c", "f", 100.0).unwrap();
//! assert!((f - 212.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Categories
// ============================================================================

/// Group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
    Area,
    Volume,
}

impl UnitCategory {
    /// All categories, in menu order
    pub const ALL: [UnitCategory; 5] = [
        UnitCategory::Length,
        UnitCategory::Mass,
        UnitCategory::Temperature,
        UnitCategory::Area,
        UnitCategory::Volume,
    ];

    /// Lowercase name ("length", "mass", ...)
    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Mass => "mass",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Area => "area",
            UnitCategory::Volume => "volume",
        }
    }

    /// Parse a category name (case-insensitive).
    ///
    /// An unknown category is reported as an unknown unit with `unit` as the
    /// unit that could not be placed.
    pub fn from_name(s: &str, unit: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Ok(UnitCategory::Length),
            "mass" | "weight" => Ok(UnitCategory::Mass),
            "temperature" | "temp" => Ok(UnitCategory::Temperature),
            "area" => Ok(UnitCategory::Area),
            "volume" => Ok(UnitCategory::Volume),
            _ => Err(CalcError::unknown_unit(s, unit)),
        }
    }

    /// Unit table for this category
    pub fn units(&self) -> &'static [UnitDef] {
        match self {
            UnitCategory::Length => &LENGTH,
            UnitCategory::Mass => &MASS,
            UnitCategory::Temperature => &TEMPERATURE,
            UnitCategory::Area => &AREA,
            UnitCategory::Volume => &VOLUME,
        }
    }

    /// Find a unit by symbol or alias (case-insensitive)
    pub fn unit(&self, name: &str) -> CalcResult<&'static UnitDef> {
        let wanted = name.trim().to_lowercase();
        self.units()
            .iter()
            .find(|u| u.symbol.to_lowercase() == wanted || u.aliases.iter().any(|a| *a == wanted))
            .ok_or_else(|| CalcError::unknown_unit(self.name(), name))
    }
}

impl std::fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Unit Descriptors
// ============================================================================

/// How a unit relates to its category's base
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// Units per base unit (base: m, kg, m², L)
    Factor(f64),
    /// Offset scale converted through Celsius
    Affine(TemperatureScale),
}

/// A named unit within a category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Canonical symbol ("m", "ft²")
    pub symbol: &'static str,
    /// Display name
    pub name: &'static str,
    /// Extra accepted spellings, lowercase
    pub aliases: &'static [&'static str],
    pub conversion: Conversion,
}

const fn factor(symbol: &'static str, name: &'static str, aliases: &'static [&'static str], per_base: f64) -> UnitDef {
    UnitDef {
        symbol,
        name,
        aliases,
        conversion: Conversion::Factor(per_base),
    }
}

const fn scale(symbol: &'static str, name: &'static str, aliases: &'static [&'static str], temp: TemperatureScale) -> UnitDef {
    UnitDef {
        symbol,
        name,
        aliases,
        conversion: Conversion::Affine(temp),
    }
}

// Exact international definitions
const M_PER_FT: f64 = 0.3048;
const M_PER_IN: f64 = 0.0254;
const M_PER_YD: f64 = 0.9144;
const M_PER_MI: f64 = 1609.344;
const KG_PER_LB: f64 = 0.453_592_37;
const KG_PER_OZ: f64 = KG_PER_LB / 16.0;
const L_PER_GAL: f64 = 3.785_411_784;

static LENGTH: [UnitDef; 8] = [
    factor("m", "meter", &["meter", "meters", "metre"], 1.0),
    factor("km", "kilometer", &["kilometer", "kilometers"], 0.001),
    factor("cm", "centimeter", &["centimeter", "centimeters"], 100.0),
    factor("mm", "millimeter", &["millimeter", "millimeters"], 1000.0),
    factor("ft", "foot", &["foot", "feet"], 1.0 / M_PER_FT),
    factor("in", "inch", &["inch", "inches"], 1.0 / M_PER_IN),
    factor("yd", "yard", &["yard", "yards"], 1.0 / M_PER_YD),
    factor("mi", "mile", &["mile", "miles"], 1.0 / M_PER_MI),
];

static MASS: [UnitDef; 6] = [
    factor("kg", "kilogram", &["kilogram", "kilograms"], 1.0),
    factor("g", "gram", &["gram", "grams"], 1000.0),
    factor("mg", "milligram", &["milligram", "milligrams"], 1.0e6),
    factor("lb", "pound", &["lbs", "pound", "pounds"], 1.0 / KG_PER_LB),
    factor("oz", "ounce", &["ounce", "ounces"], 1.0 / KG_PER_OZ),
    factor("t", "metric ton", &["tonne", "tonnes"], 0.001),
];

static AREA: [UnitDef; 7] = [
    factor("m²", "square meter", &["m2", "sqm"], 1.0),
    factor("km²", "square kilometer", &["km2"], 1.0e-6),
    factor("cm²", "square centimeter", &["cm2"], 1.0e4),
    factor("ft²", "square foot", &["ft2", "sqft"], 1.0 / (M_PER_FT * M_PER_FT)),
    factor("in²", "square inch", &["in2", "sqin"], 1.0 / (M_PER_IN * M_PER_IN)),
    factor("ac", "acre", &["acre", "acres"], 1.0 / 4_046.856_422_4),
    factor("ha", "hectare", &["hectare", "hectares"], 1.0e-4),
];

static VOLUME: [UnitDef; 7] = [
    factor("l", "liter", &["liter", "liters", "litre"], 1.0),
    factor("ml", "milliliter", &["milliliter", "milliliters"], 1000.0),
    factor("m³", "cubic meter", &["m3"], 0.001),
    factor("gal", "US gallon", &["gallon", "gallons"], 1.0 / L_PER_GAL),
    factor("qt", "US quart", &["quart", "quarts"], 4.0 / L_PER_GAL),
    factor("pt", "US pint", &["pint", "pints"], 8.0 / L_PER_GAL),
    factor("fl oz", "US fluid ounce", &["floz", "fl_oz"], 128.0 / L_PER_GAL),
];

static TEMPERATURE: [UnitDef; 4] = [
    scale("c", "Celsius", &["°c", "celsius"], TemperatureScale::Celsius),
    scale("f", "Fahrenheit", &["°f", "fahrenheit"], TemperatureScale::Fahrenheit),
    scale("k", "Kelvin", &["kelvin"], TemperatureScale::Kelvin),
    scale("r", "Rankine", &["°r", "rankine"], TemperatureScale::Rankine),
];

// ============================================================================
// Temperature
// ============================================================================

/// Temperature scale, converted via Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureScale {
    /// Convert a reading on this scale to Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
            TemperatureScale::Rankine => (value - 491.67) * 5.0 / 9.0,
        }
    }

    /// Convert a Celsius reading to this scale
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
            TemperatureScale::Rankine => celsius * 9.0 / 5.0 + 491.67,
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Convert `value` from `from_unit` to `to_unit` within `category`.
///
/// # Errors
///
/// `UnknownUnit` if either unit is not in the category's table.
pub fn convert(category: UnitCategory, from_unit: &str, to_unit: &str, value: f64) -> CalcResult<f64> {
    let from = category.unit(from_unit)?;
    let to = category.unit(to_unit)?;

    match (from.conversion, to.conversion) {
        (Conversion::Factor(f), Conversion::Factor(t)) => Ok(value / f * t),
        (Conversion::Affine(f), Conversion::Affine(t)) => Ok(t.from_celsius(f.to_celsius(value))),
        // Tables never mix kinds within a category
        _ => Err(CalcError::unknown_unit(category.name(), to_unit)),
    }
}

/// Convert with the category given by name
pub fn convert_named(category: &str, from_unit: &str, to_unit: &str, value: f64) -> CalcResult<f64> {
    let category = UnitCategory::from_name(category, from_unit)?;
    convert(category, from_unit, to_unit, value)
}
