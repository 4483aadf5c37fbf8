// Core algorithm exports
pub mod adherence;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod units;

pub use adherence::{adherence_rate, best_streak, current_streak, is_on_target, week_start, AdherenceRate, BestStreak};
pub use matching::{match_ingredients, matches_pantry, names_match, PantryMatch, SUGGESTION_THRESHOLD_PCT};
pub use normalize::{normalize_name, normalize_quantity, NormalizedQuantity, QuantityError};
pub use parser::{parse_quantity, ParsedQuantity};
pub use units::UnitType;
