//! Pantry Algo - quantity normalization and reconciliation service for the
//! PantryPal grocery app
//!
//! This library turns free-text receipt and recipe quantities into
//! canonical values, reconciles pantry contents against recipe
//! ingredients, and serves the search-ranking and nutrition read models
//! built on top of the normalized data.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_name, normalize_quantity, NormalizedQuantity, QuantityError, UnitType};
pub use crate::models::{DailyCalorieBucket, SearchResultItem, SearchResults};
