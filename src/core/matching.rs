use serde::{Deserialize, Serialize};

/// Recipes whose ingredients are at least this much covered by the pantry
/// are flagged as suggested.
pub const SUGGESTION_THRESHOLD_PCT: f64 = 70.0;

/// Result of reconciling a recipe's ingredient list against the pantry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: f64,
    #[serde(rename = "isSuggested")]
    pub is_suggested: bool,
}

/// Coarse match by bidirectional substring containment.
///
/// Both names must already be normalized (lowercased, modifiers stripped).
/// Short substrings cross-match ("egg" matches "eggplant"); the suggestion
/// flow expects that loose match rate, so no tokenization or edit distance
/// here.
#[inline]
pub fn names_match(pantry_name: &str, ingredient: &str) -> bool {
    if pantry_name.is_empty() || ingredient.is_empty() {
        return false;
    }
    ingredient.contains(pantry_name) || pantry_name.contains(ingredient)
}

/// True if any pantry name matches the ingredient.
#[inline]
pub fn matches_pantry(pantry_names: &[String], ingredient: &str) -> bool {
    pantry_names.iter().any(|p| names_match(p, ingredient))
}

/// Reconcile a full ingredient list against the pantry, producing the
/// matched/missing split and the suggestion flag.
pub fn match_ingredients(pantry_names: &[String], ingredients: &[String]) -> PantryMatch {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for ingredient in ingredients {
        if matches_pantry(pantry_names, ingredient) {
            matched.push(ingredient.clone());
        } else {
            missing.push(ingredient.clone());
        }
    }

    let match_percentage = if ingredients.is_empty() {
        0.0
    } else {
        100.0 * matched.len() as f64 / ingredients.len() as f64
    };

    PantryMatch {
        matched,
        missing,
        match_percentage,
        is_suggested: match_percentage >= SUGGESTION_THRESHOLD_PCT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match() {
        assert!(names_match("peas", "peas"));
    }

    #[test]
    fn test_pantry_name_inside_ingredient() {
        assert!(names_match("tomato", "tomato paste"));
    }

    #[test]
    fn test_ingredient_inside_pantry_name() {
        assert!(names_match("cherry tomatoes", "tomatoes"));
    }

    #[test]
    fn test_known_false_positive_preserved() {
        // Short common substrings match.
        assert!(names_match("egg", "eggplant"));
    }

    #[test]
    fn test_no_match() {
        assert!(!names_match("flour", "butter"));
    }

    #[test]
    fn test_empty_names_never_match() {
        assert!(!names_match("", "butter"));
        assert!(!names_match("flour", ""));
    }

    #[test]
    fn test_match_ingredients_split() {
        let pantry = pantry(&["eggs", "flour", "milk"]);
        let ingredients = vec![
            "flour".to_string(),
            "eggs".to_string(),
            "sugar".to_string(),
        ];

        let result = match_ingredients(&pantry, &ingredients);
        assert_eq!(result.matched, vec!["flour", "eggs"]);
        assert_eq!(result.missing, vec!["sugar"]);
        assert!((result.match_percentage - 66.666).abs() < 0.01);
        assert!(!result.is_suggested);
    }

    #[test]
    fn test_suggestion_threshold() {
        let pantry = pantry(&["eggs", "flour", "milk", "butter"]);
        let ingredients = vec![
            "flour".to_string(),
            "eggs".to_string(),
            "milk".to_string(),
            "vanilla".to_string(),
        ];

        // 3 of 4 = 75% >= 70%
        let result = match_ingredients(&pantry, &ingredients);
        assert!(result.is_suggested);
    }

    #[test]
    fn test_empty_ingredient_list() {
        let result = match_ingredients(&pantry(&["eggs"]), &[]);
        assert_eq!(result.match_percentage, 0.0);
        assert!(!result.is_suggested);
    }
}
