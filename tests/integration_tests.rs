// Integration tests for Pantry Algo
//
// Exercises the full normalize -> reconcile -> aggregate pipeline on
// realistic receipt/recipe text, without a database.

use pantry_algo::core::{
    adherence::{adherence_rate, best_streak, current_streak},
    matching::match_ingredients,
    normalize::{normalize_name, normalize_quantity, NormalizedQuantity},
    units::UnitType,
};
use pantry_algo::models::DailyCalorieBucket;
use chrono::NaiveDate;

#[test]
fn test_receipt_lines_end_to_end() {
    // Quantity strings as extracted from receipt lines, warts and all.
    let quantities = [
        ("2 lbs", UnitType::Weight),
        ("1,5 l", UnitType::Volume),
        ("1 dozen", UnitType::Count),
        ("", UnitType::Count), // no numeric run at all
    ];

    for (raw, expected_type) in quantities {
        let q = normalize_quantity(raw);
        assert_eq!(q.unit_type, expected_type, "quantity {:?}", raw);
        assert_eq!(q.unit, expected_type.base_unit());
    }

    let chicken = normalize_quantity("2 lbs");
    assert!((chicken.value - 907.184).abs() < 0.01);

    let water = normalize_quantity("1,5 l");
    assert_eq!(water.value, 1500.0);

    let eggs = normalize_quantity("1 dozen");
    assert_eq!(eggs.value, 12.0);
}

#[test]
fn test_shopping_list_merge_with_add() {
    // Two receipt lines for the same ingredient merge into one entry.
    let first = normalize_quantity("250 g");
    let second = normalize_quantity("1 lb");
    let merged = first.add(&second).unwrap();

    assert!((merged.value - 703.592).abs() < 0.01);
    assert_eq!(merged.unit, "g");
    assert_eq!(merged.original_value, "250 g + 1 lb");
    assert_eq!(merged.to_display_string(), "704g");

    // Mismatched types refuse to merge.
    let volume = normalize_quantity("2 cups");
    assert!(!merged.are_comparable(&volume));
    assert!(merged.add(&volume).is_err());
}

#[test]
fn test_recipe_scaling_for_servings() {
    // Doubling a recipe doubles every normalized ingredient quantity.
    let flour = normalize_quantity("2 cups");
    let doubled = flour.scale(2.0);
    assert!((doubled.value - 2.0 * flour.value).abs() < 1e-9);
    assert_eq!(doubled.unit_type, UnitType::Volume);
}

#[test]
fn test_pantry_reconciliation_flow() {
    // Pantry names as stored by the app, normalized before matching.
    let pantry: Vec<String> = [
        "Organic Eggs (12ct)",
        "All-purpose flour",
        "Whole milk",
        "Frozen peas",
    ]
    .iter()
    .map(|n| normalize_name(n))
    .collect();

    // LLM-generated recipe ingredient list.
    let ingredients: Vec<String> = ["eggs", "flour", "milk", "butter"]
        .iter()
        .map(|n| normalize_name(n))
        .collect();

    let result = match_ingredients(&pantry, &ingredients);
    assert_eq!(result.matched, vec!["eggs", "flour", "milk"]);
    assert_eq!(result.missing, vec!["butter"]);
    assert_eq!(result.match_percentage, 75.0);
    assert!(result.is_suggested);
}

#[test]
fn test_stored_triple_round_trip() {
    // Persistence boundary: serialize the triple, rehydrate without
    // reapplying conversion.
    let original = normalize_quantity("1 lb");
    let rehydrated = NormalizedQuantity::from_parts(
        original.value,
        original.unit_type,
        original.original_value.clone(),
    );

    assert_eq!(rehydrated.value, original.value);
    assert_eq!(rehydrated.unit, original.unit);
    assert_eq!(rehydrated.unit_type, original.unit_type);
    assert_eq!(rehydrated.to_display_string(), original.to_display_string());
}

#[test]
fn test_nutrition_aggregates_over_two_weeks() {
    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
    let bucket = |d: u32, calories: i64| DailyCalorieBucket {
        date: day(d),
        calories,
    };

    // Two weeks of logging with one blowout and one gap.
    let buckets = vec![
        bucket(1, 2000),
        bucket(2, 1900),
        bucket(3, 2100),
        bucket(4, 2800), // off target
        bucket(5, 2000),
        bucket(6, 1950),
        // day 7 missing
        bucket(8, 2050),
        bucket(9, 2000),
        bucket(10, 2000),
        bucket(11, 1850),
        bucket(12, 2150),
        bucket(13, 2000),
        bucket(14, 1950),
    ];

    let goal = Some(2000);

    // Current streak from day 14 runs back to day 8.
    assert_eq!(current_streak(&buckets, day(14), goal, 10.0), 7);

    // Best streak is that same 7-day run; the gap on day 7 kept the
    // earlier days from extending it.
    let best = best_streak(&buckets, goal, 10.0);
    assert_eq!(best.length, 7);
    assert_eq!(best.last_on_target_date, Some(day(14)));

    // 13 tracked days, 12 on target.
    let rate = adherence_rate(&buckets, day(14), 14, goal, 10.0);
    assert_eq!(rate.days_tracked, 13);
    assert_eq!(rate.days_on_target, 12);
    assert_eq!(rate.rate_percent, 92);
}

#[test]
fn test_json_shape_of_normalized_quantity() {
    let q = normalize_quantity("1 1/2 cups");
    let json = serde_json::to_value(&q).unwrap();

    assert_eq!(json["unit"], "ml");
    assert_eq!(json["unitType"], "VOLUME");
    assert_eq!(json["originalValue"], "1 1/2 cups");

    let back: NormalizedQuantity = serde_json::from_value(json).unwrap();
    assert_eq!(back, q);
}
