use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the grouped search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub q: String,
    /// Results per group, clamped to 1-10 at the API boundary.
    pub limit: Option<u8>,
}

/// Query parameters for the nutrition summary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NutritionSummaryRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Reference date; defaults to today.
    pub date: Option<NaiveDate>,
    /// Explicit calorie goal override; wins over the stored preference.
    pub goal: Option<i64>,
    #[serde(alias = "tolerance_percent", rename = "tolerancePercent")]
    pub tolerance_percent: Option<f64>,
    #[serde(alias = "window_days", rename = "windowDays")]
    pub window_days: Option<u32>,
}

/// Body for the quantity normalization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeQuantityRequest {
    #[serde(default)]
    pub raw: String,
}

/// Query parameters for the recipe pantry-match endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PantryMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
