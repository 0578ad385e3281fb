//! Measurement units for ingredient quantities.
//!
//! Two closed convertible classes exist: mass (gram, kilogram) and
//! volume (milliliter, centiliter, liter). Countable units (unit,
//! tablespoon, teaspoon, cup) are never convertible with anything,
//! including each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConversionError;

/// Ingredient measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Gram,
    Kilogram,
    Milliliter,
    Centiliter,
    Liter,
    #[serde(rename = "unit")]
    Piece,
    Tablespoon,
    Teaspoon,
    Cup,
}

/// Convertible unit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    Mass,
    Volume,
}

impl Unit {
    /// Class of this unit, if it belongs to a convertible one.
    pub fn class(self) -> Option<UnitClass> {
        match self {
            Unit::Gram | Unit::Kilogram => Some(UnitClass::Mass),
            Unit::Milliliter | Unit::Centiliter | Unit::Liter => Some(UnitClass::Volume),
            Unit::Piece | Unit::Tablespoon | Unit::Teaspoon | Unit::Cup => None,
        }
    }

    /// Factor to the class base unit (grams or milliliters).
    fn base_factor(self) -> Option<f64> {
        match self {
            Unit::Gram => Some(1.0),
            Unit::Kilogram => Some(1000.0),
            Unit::Milliliter => Some(1.0),
            Unit::Centiliter => Some(10.0),
            Unit::Liter => Some(1000.0),
            _ => None,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Centiliter => "cl",
            Unit::Liter => "l",
            Unit::Piece => "unit",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Cup => "cup",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(Unit::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(Unit::Kilogram),
            "ml" | "milliliter" | "milliliters" => Ok(Unit::Milliliter),
            "cl" | "centiliter" | "centiliters" => Ok(Unit::Centiliter),
            "l" | "liter" | "liters" => Ok(Unit::Liter),
            "unit" | "piece" | "pieces" => Ok(Unit::Piece),
            "tbsp" | "tablespoon" | "tablespoons" => Ok(Unit::Tablespoon),
            "tsp" | "teaspoon" | "teaspoons" => Ok(Unit::Teaspoon),
            "cup" | "cups" => Ok(Unit::Cup),
            other => Err(format!("unknown unit '{other}'")),
        }
    }
}

/// True iff both units belong to the same convertible class.
pub fn are_convertible(a: Unit, b: Unit) -> bool {
    match (a.class(), b.class()) {
        (Some(ca), Some(cb)) => ca == cb,
        _ => false,
    }
}

/// Linear conversion within a compatible class.
pub fn convert(quantity: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    if !are_convertible(from, to) {
        return Err(ConversionError::Incompatible { from, to });
    }
    // are_convertible guarantees both factors exist
    let from_factor = from.base_factor().ok_or(ConversionError::Incompatible { from, to })?;
    let to_factor = to.base_factor().ok_or(ConversionError::Incompatible { from, to })?;
    Ok(quantity * from_factor / to_factor)
}

/// Most readable unit/magnitude pair for display.
///
/// Used when rendering a scaled ingredient, never during merging.
/// Countable units are returned unchanged.
pub fn best_display(quantity: f64, unit: Unit) -> (f64, Unit) {
    match unit.class() {
        Some(UnitClass::Mass) => {
            let grams = quantity * unit.base_factor().unwrap_or(1.0);
            if grams >= 1000.0 {
                (grams / 1000.0, Unit::Kilogram)
            } else {
                (grams, Unit::Gram)
            }
        }
        Some(UnitClass::Volume) => {
            let ml = quantity * unit.base_factor().unwrap_or(1.0);
            if ml >= 1000.0 {
                (ml / 1000.0, Unit::Liter)
            } else if ml >= 100.0 {
                (ml / 10.0, Unit::Centiliter)
            } else {
                (ml, Unit::Milliliter)
            }
        }
        None => (quantity, unit),
    }
}
