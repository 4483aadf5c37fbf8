use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One matched entity in a search result group.
///
/// Ephemeral: produced per query, never persisted. `score` is the blended
/// full-text + trigram relevance number the group was ranked by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub href: String,
    pub score: f64,
}

/// Calorie total for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCalorieBucket {
    pub date: NaiveDate,
    pub calories: i64,
}

/// Grouped search results across the three searchable entity kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub recipes: Vec<SearchResultItem>,
    pub cupboard: Vec<SearchResultItem>,
    pub receipts: Vec<SearchResultItem>,
    pub total: usize,
    #[serde(rename = "usedTrigram")]
    pub used_trigram: bool,
}

impl SearchResults {
    /// The empty-query short-circuit result: no groups, no backend call.
    pub fn empty() -> Self {
        Self {
            recipes: Vec::new(),
            cupboard: Vec::new(),
            receipts: Vec::new(),
            total: 0,
            used_trigram: false,
        }
    }
}
