use crate::core::parser::parse_quantity;
use crate::core::units::{is_count_synonym, volume_factor, weight_factor, UnitType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Modifier words stripped from ingredient names before matching.
static MODIFIER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(organic|fresh|frozen|canned|dried)\b").unwrap());

/// Anything that is not a word character, whitespace or hyphen.
static NON_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Errors from quantity arithmetic. Adding mismatched unit types is the
/// single core operation that can reject its input; everything else
/// resolves to a documented fallback.
#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
    #[error("incompatible units: cannot add {left} to {right}")]
    IncompatibleUnits { left: UnitType, right: UnitType },
}

/// A quantity expressed in the canonical base unit of its type.
///
/// `unit` is fully determined by `unit_type` (WEIGHT -> "g", VOLUME ->
/// "ml", COUNT -> "count"). `original_value` carries the raw text the
/// quantity came from; arithmetic extends it as a provenance trail.
/// Instances are immutable once produced — `add` and `scale` return new
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuantity {
    pub value: f64,
    pub unit: String,
    #[serde(rename = "unitType")]
    pub unit_type: UnitType,
    #[serde(rename = "originalValue")]
    pub original_value: String,
}

impl NormalizedQuantity {
    /// Rehydrate from the stored `(value, unit, unit_type)` triple without
    /// reapplying any conversion.
    pub fn from_parts(value: f64, unit_type: UnitType, original_value: String) -> Self {
        Self {
            value,
            unit: unit_type.base_unit().to_string(),
            unit_type,
            original_value,
        }
    }

    /// Two quantities can be added iff they share a unit type.
    pub fn are_comparable(&self, other: &NormalizedQuantity) -> bool {
        self.unit_type == other.unit_type
    }

    /// Sum two quantities of the same unit type. The provenance string
    /// records both operands.
    pub fn add(&self, other: &NormalizedQuantity) -> Result<NormalizedQuantity, QuantityError> {
        if !self.are_comparable(other) {
            return Err(QuantityError::IncompatibleUnits {
                left: self.unit_type,
                right: other.unit_type,
            });
        }

        Ok(NormalizedQuantity {
            value: self.value + other.value,
            unit: self.unit.clone(),
            unit_type: self.unit_type,
            original_value: format!("{} + {}", self.original_value, other.original_value),
        })
    }

    /// Multiply the value by a factor, preserving unit and unit type.
    pub fn scale(&self, factor: f64) -> NormalizedQuantity {
        NormalizedQuantity {
            value: self.value * factor,
            unit: self.unit.clone(),
            unit_type: self.unit_type,
            original_value: format!("{} × {}", self.original_value, factor),
        }
    }

    /// Human-readable rendering: weights flip from grams to kilograms at
    /// 1000g (volumes likewise to liters), counts drop the decimals when
    /// integral.
    pub fn to_display_string(&self) -> String {
        match self.unit_type {
            UnitType::Weight => {
                if self.value < 1000.0 {
                    format!("{}g", self.value.round() as i64)
                } else {
                    format!("{:.1}kg", self.value / 1000.0)
                }
            }
            UnitType::Volume => {
                if self.value < 1000.0 {
                    format!("{}ml", self.value.round() as i64)
                } else {
                    format!("{:.1}L", self.value / 1000.0)
                }
            }
            UnitType::Count => {
                if self.value.fract() == 0.0 {
                    format!("{}", self.value as i64)
                } else {
                    format!("{:.1}", self.value)
                }
            }
        }
    }
}

/// Normalize a raw quantity string into its canonical base unit.
///
/// The unit token is matched in order: dozen special case, weight table,
/// volume table, explicit count synonyms. Anything unrecognized is
/// silently treated as a count with the parsed numeric value unchanged —
/// OCR output is full of units this table will never know.
pub fn normalize_quantity(raw: &str) -> NormalizedQuantity {
    let parsed = parse_quantity(raw);
    let unit = parsed.unit.to_lowercase();
    let original_value = raw.trim().to_string();

    if unit == "dozen" || unit == "doz" {
        return NormalizedQuantity {
            value: parsed.value * 12.0,
            unit: UnitType::Count.base_unit().to_string(),
            unit_type: UnitType::Count,
            original_value,
        };
    }

    if let Some(factor) = weight_factor(&unit) {
        return NormalizedQuantity {
            value: parsed.value * factor,
            unit: UnitType::Weight.base_unit().to_string(),
            unit_type: UnitType::Weight,
            original_value,
        };
    }

    if let Some(factor) = volume_factor(&unit) {
        return NormalizedQuantity {
            value: parsed.value * factor,
            unit: UnitType::Volume.base_unit().to_string(),
            unit_type: UnitType::Volume,
            original_value,
        };
    }

    if unit == "count" || is_count_synonym(&unit) {
        return NormalizedQuantity {
            value: parsed.value,
            unit: UnitType::Count.base_unit().to_string(),
            unit_type: UnitType::Count,
            original_value,
        };
    }

    // Unrecognized unit: keep the parsed value and treat it as a count.
    tracing::debug!("unrecognized unit token {:?}, treating as count", unit);
    NormalizedQuantity {
        value: parsed.value,
        unit: UnitType::Count.base_unit().to_string(),
        unit_type: UnitType::Count,
        original_value,
    }
}

/// Normalize an ingredient name for matching: lowercase, strip modifier
/// words and punctuation, collapse whitespace.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_modifiers = MODIFIER_WORDS.replace_all(&lowered, "");
    let cleaned = NON_NAME_CHARS.replace_all(&without_modifiers, "");
    let collapsed = WHITESPACE_RUN.replace_all(cleaned.trim(), " ");
    collapsed.trim().to_string()
}
