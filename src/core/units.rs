use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

/// Classification of a quantity, fixing its canonical base unit:
/// WEIGHT -> grams, VOLUME -> milliliters, COUNT -> count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitType {
    Weight,
    Volume,
    Count,
}

impl UnitType {
    /// The canonical base unit string for this type.
    pub fn base_unit(self) -> &'static str {
        match self {
            UnitType::Weight => "g",
            UnitType::Volume => "ml",
            UnitType::Count => "count",
        }
    }

    /// Parse the stored enum string back into a unit type, defaulting to
    /// COUNT for anything unrecognized (mirrors the normalizer fallback).
    pub fn from_stored(value: &str) -> Self {
        match value {
            "WEIGHT" => UnitType::Weight,
            "VOLUME" => UnitType::Volume,
            _ => UnitType::Count,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitType::Weight => "WEIGHT",
            UnitType::Volume => "VOLUME",
            UnitType::Count => "COUNT",
        };
        write!(f, "{}", name)
    }
}

/// Weight unit aliases mapped to their multiplier into grams.
static WEIGHT_TO_GRAMS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("g", 1.0);
    map.insert("gram", 1.0);
    map.insert("grams", 1.0);
    map.insert("kg", 1000.0);
    map.insert("kilogram", 1000.0);
    map.insert("kilograms", 1000.0);
    map.insert("mg", 0.001);
    map.insert("milligram", 0.001);
    map.insert("milligrams", 0.001);
    map.insert("oz", 28.3495);
    map.insert("ounce", 28.3495);
    map.insert("ounces", 28.3495);
    map.insert("lb", 453.592);
    map.insert("lbs", 453.592);
    map.insert("pound", 453.592);
    map.insert("pounds", 453.592);

    map
});

/// Volume unit aliases mapped to their multiplier into milliliters.
static VOLUME_TO_MILLILITERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("ml", 1.0);
    map.insert("milliliter", 1.0);
    map.insert("milliliters", 1.0);
    map.insert("millilitre", 1.0);
    map.insert("millilitres", 1.0);
    map.insert("l", 1000.0);
    map.insert("liter", 1000.0);
    map.insert("liters", 1000.0);
    map.insert("litre", 1000.0);
    map.insert("litres", 1000.0);
    map.insert("cup", 236.588);
    map.insert("cups", 236.588);
    map.insert("tbsp", 14.7868);
    map.insert("tablespoon", 14.7868);
    map.insert("tablespoons", 14.7868);
    map.insert("tsp", 4.92892);
    map.insert("teaspoon", 4.92892);
    map.insert("teaspoons", 4.92892);
    map.insert("fl oz", 29.5735);
    map.insert("floz", 29.5735);
    map.insert("fluid ounce", 29.5735);
    map.insert("fluid ounces", 29.5735);
    map.insert("pint", 473.176);
    map.insert("pints", 473.176);
    map.insert("pt", 473.176);
    map.insert("quart", 946.353);
    map.insert("quarts", 946.353);
    map.insert("qt", 946.353);
    map.insert("gallon", 3785.41);
    map.insert("gallons", 3785.41);
    map.insert("gal", 3785.41);

    map
});

/// Unit tokens that explicitly mean "a count of items".
static COUNT_SYNONYMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "count", "piece", "pieces", "item", "items", "each", "ea", "unit", "units", "pc", "pcs",
        "whole",
    ])
});

/// Grams per unit for a recognized weight alias (already lowercased).
pub fn weight_factor(unit: &str) -> Option<f64> {
    WEIGHT_TO_GRAMS.get(unit).copied()
}

/// Milliliters per unit for a recognized volume alias (already lowercased).
pub fn volume_factor(unit: &str) -> Option<f64> {
    VOLUME_TO_MILLILITERS.get(unit).copied()
}

pub fn is_count_synonym(unit: &str) -> bool {
    COUNT_SYNONYMS.contains(unit)
}
