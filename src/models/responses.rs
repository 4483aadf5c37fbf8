use crate::core::{NormalizedQuantity, PantryMatch};
use crate::models::domain::DailyCalorieBucket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the quantity normalization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeQuantityResponse {
    pub quantity: NormalizedQuantity,
    pub display: String,
}

/// Response for the recipe pantry-match endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryMatchResponse {
    #[serde(rename = "recipeId")]
    pub recipe_id: Uuid,
    #[serde(flatten)]
    pub result: PantryMatch,
}

/// Calorie totals for the reference day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub consumed: i64,
    pub planned: i64,
    pub goal: Option<i64>,
    /// None when no usable goal is set.
    #[serde(rename = "isOnTarget")]
    pub is_on_target: Option<bool>,
}

/// Monday-start week containing the reference date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: i64,
    #[serde(rename = "dailyAverage")]
    pub daily_average: f64,
    pub days: Vec<DailyCalorieBucket>,
}

/// Current and best on-target streaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
    #[serde(rename = "lastOnTargetDate")]
    pub last_on_target_date: Option<NaiveDate>,
}

/// Adherence over the trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceSummary {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    #[serde(rename = "daysTracked")]
    pub days_tracked: u32,
    #[serde(rename = "daysOnTarget")]
    pub days_on_target: u32,
    #[serde(rename = "ratePercent")]
    pub rate_percent: u32,
}

/// Full nutrition summary; recomputed on every request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionSummaryResponse {
    pub today: TodaySummary,
    pub week: WeekSummary,
    pub streak: StreakSummary,
    pub adherence: AdherenceSummary,
}
