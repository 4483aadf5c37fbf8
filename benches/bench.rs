// Criterion benchmarks for Pantry Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pantry_algo::core::adherence::best_streak;
use pantry_algo::core::matching::match_ingredients;
use pantry_algo::core::normalize::{normalize_name, normalize_quantity};
use pantry_algo::models::DailyCalorieBucket;
use chrono::NaiveDate;

const RECEIPT_QUANTITIES: &[&str] = &[
    "2 lbs",
    "1 1/2 cups",
    "1,234.56 g",
    "1.234,56 ml",
    "1 dozen",
    "3 bunches",
    "500ml",
    "",
];

fn pantry_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| normalize_name(&format!("Organic Item Number {}", i)))
        .collect()
}

fn ingredient_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| normalize_name(&format!("item number {}", i * 2)))
        .collect()
}

fn bench_normalize_quantity(c: &mut Criterion) {
    c.bench_function("normalize_quantity_mixed_inputs", |b| {
        b.iter(|| {
            for raw in RECEIPT_QUANTITIES {
                black_box(normalize_quantity(black_box(raw)));
            }
        });
    });
}

fn bench_normalize_name(c: &mut Criterion) {
    c.bench_function("normalize_name", |b| {
        b.iter(|| normalize_name(black_box("Organic Fresh-Frozen Peas (500g)!")));
    });
}

fn bench_pantry_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("pantry_matching");

    for pantry_size in [10, 50, 200].iter() {
        let pantry = pantry_names(*pantry_size);
        let ingredients = ingredient_names(12);

        group.bench_with_input(
            BenchmarkId::new("match_ingredients", pantry_size),
            pantry_size,
            |b, _| {
                b.iter(|| match_ingredients(black_box(&pantry), black_box(&ingredients)));
            },
        );
    }

    group.finish();
}

fn bench_best_streak(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let buckets: Vec<DailyCalorieBucket> = (0..365)
        .map(|i| DailyCalorieBucket {
            date: start + chrono::Duration::days(i),
            calories: 1900 + (i % 7) * 50,
        })
        .collect();

    c.bench_function("best_streak_one_year", |b| {
        b.iter(|| best_streak(black_box(&buckets), black_box(Some(2000)), black_box(10.0)));
    });
}

criterion_group!(
    benches,
    bench_normalize_quantity,
    bench_normalize_name,
    bench_pantry_matching,
    bench_best_streak
);

criterion_main!(benches);
