// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DailyCalorieBucket, SearchResultItem, SearchResults};
pub use requests::{NormalizeQuantityRequest, NutritionSummaryRequest, PantryMatchRequest, SearchRequest};
pub use responses::{
    AdherenceSummary, ErrorResponse, HealthResponse, NormalizeQuantityResponse,
    NutritionSummaryResponse, PantryMatchResponse, StreakSummary, TodaySummary, WeekSummary,
};
