// Service exports
pub mod nutrition;
pub mod postgres;
pub mod search;

pub use nutrition::NutritionAggregator;
pub use postgres::{PostgresClient, PostgresError};
pub use search::SearchRanker;
