use crate::models::DailyCalorieBucket;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Longest on-target run found in the daily history.
#[derive(Debug, Clone, PartialEq)]
pub struct BestStreak {
    pub length: u32,
    pub last_on_target_date: Option<NaiveDate>,
}

/// Adherence over a trailing window. Only days with recorded calories
/// count as tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceRate {
    pub window_days: u32,
    pub days_tracked: u32,
    pub days_on_target: u32,
    pub rate_percent: u32,
}

/// Absolute calorie tolerance band around the goal.
#[inline]
pub fn tolerance_band(goal: i64, tolerance_percent: f64) -> i64 {
    (goal as f64 * tolerance_percent / 100.0).round() as i64
}

/// A day is on target when its consumed calories fall within
/// `goal ± round(goal × tolerance%)`. A missing or non-positive goal makes
/// every day off target.
#[inline]
pub fn is_on_target(consumed: i64, goal: i64, tolerance_percent: f64) -> bool {
    goal > 0 && (consumed - goal).abs() <= tolerance_band(goal, tolerance_percent)
}

/// Monday of the ISO week containing `date`. Sunday counts as the 7th day
/// of the week, not the first.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 6) % 7;
    date - Duration::days(i64::from(offset))
}

fn bucket_map(buckets: &[DailyCalorieBucket]) -> BTreeMap<NaiveDate, i64> {
    let mut map = BTreeMap::new();
    for bucket in buckets {
        *map.entry(bucket.date).or_insert(0) += bucket.calories;
    }
    map
}

/// Current streak: consecutive on-target days walking backward from the
/// reference date. Stops at the first missing or off-target day.
pub fn current_streak(
    buckets: &[DailyCalorieBucket],
    reference: NaiveDate,
    goal: Option<i64>,
    tolerance_percent: f64,
) -> u32 {
    let Some(goal) = goal.filter(|g| *g > 0) else {
        return 0;
    };

    let by_day = bucket_map(buckets);
    let mut day = reference;
    let mut streak = 0;

    while let Some(&calories) = by_day.get(&day) {
        if !is_on_target(calories, goal, tolerance_percent) {
            break;
        }
        streak += 1;
        day = day - Duration::days(1);
    }

    streak
}

/// Best streak over all days with recorded calories, scanned in date order.
///
/// An off-target day resets the running count to 0. A calendar gap does
/// not: an on-target day after a gap starts a fresh streak of length 1.
pub fn best_streak(
    buckets: &[DailyCalorieBucket],
    goal: Option<i64>,
    tolerance_percent: f64,
) -> BestStreak {
    let Some(goal) = goal.filter(|g| *g > 0) else {
        return BestStreak {
            length: 0,
            last_on_target_date: None,
        };
    };

    let mut best = 0;
    let mut running = 0;
    let mut previous_on_target: Option<NaiveDate> = None;
    let mut last_on_target_date = None;

    for (date, calories) in bucket_map(buckets) {
        if calories <= 0 {
            continue;
        }
        if is_on_target(calories, goal, tolerance_percent) {
            running = match previous_on_target {
                Some(prev) if date - prev == Duration::days(1) => running + 1,
                _ => 1,
            };
            previous_on_target = Some(date);
            last_on_target_date = Some(date);
            best = best.max(running);
        } else {
            running = 0;
            previous_on_target = None;
        }
    }

    BestStreak {
        length: best,
        last_on_target_date,
    }
}

/// Adherence rate over a trailing `window_days` window ending at the
/// reference date: `round(100 × on-target days / tracked days)`.
pub fn adherence_rate(
    buckets: &[DailyCalorieBucket],
    reference: NaiveDate,
    window_days: u32,
    goal: Option<i64>,
    tolerance_percent: f64,
) -> AdherenceRate {
    let start = reference - Duration::days(i64::from(window_days.saturating_sub(1)));
    let goal = goal.filter(|g| *g > 0);

    let mut days_tracked = 0;
    let mut days_on_target = 0;

    for (date, calories) in bucket_map(buckets) {
        if date < start || date > reference || calories <= 0 {
            continue;
        }
        days_tracked += 1;
        if let Some(goal) = goal {
            if is_on_target(calories, goal, tolerance_percent) {
                days_on_target += 1;
            }
        }
    }

    let rate_percent = if days_tracked == 0 || goal.is_none() {
        0
    } else {
        (100.0 * f64::from(days_on_target) / f64::from(days_tracked)).round() as u32
    };

    AdherenceRate {
        window_days,
        days_tracked,
        days_on_target,
        rate_percent,
    }
}
