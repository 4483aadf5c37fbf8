use crate::config::NutritionSettings;
use crate::core::{adherence_rate, best_streak, current_streak, is_on_target, week_start};
use crate::models::requests::NutritionSummaryRequest;
use crate::models::responses::{
    AdherenceSummary, NutritionSummaryResponse, StreakSummary, TodaySummary, WeekSummary,
};
use crate::models::DailyCalorieBucket;
use crate::services::postgres::{PostgresClient, PostgresError};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

/// Date-windowed aggregation over logged and planned calorie entries.
///
/// Everything here is recomputed on every request; the four sub-aggregates
/// are independent read models over the same daily buckets.
pub struct NutritionAggregator {
    postgres: Arc<PostgresClient>,
    settings: NutritionSettings,
}

impl NutritionAggregator {
    pub fn new(postgres: Arc<PostgresClient>, settings: NutritionSettings) -> Self {
        Self { postgres, settings }
    }

    pub async fn summary(
        &self,
        request: &NutritionSummaryRequest,
    ) -> Result<NutritionSummaryResponse, PostgresError> {
        let user_id = &request.user_id;
        let reference = request
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let tolerance = request
            .tolerance_percent
            .unwrap_or(self.settings.tolerance_percent);
        let window_days = request
            .window_days
            .unwrap_or(self.settings.adherence_window_days);

        // Explicit goal override wins over the stored preference. A
        // missing or non-positive goal makes on-target logic vacuous
        // downstream rather than failing.
        let goal = match request.goal {
            Some(goal) => Some(goal),
            None => self.postgres.calorie_goal(user_id).await?,
        };

        let history_days = self.settings.streak_history_days.max(window_days);
        let history_start = reference - Duration::days(i64::from(history_days.saturating_sub(1)));

        let logged = self
            .postgres
            .logged_calories_by_day(user_id, history_start, reference)
            .await?;
        let planned_today = self
            .postgres
            .planned_calories_by_day(user_id, reference, reference)
            .await?;

        let today = build_today(&logged, &planned_today, reference, goal, tolerance);
        let week = build_week(&logged, reference);
        let streak = build_streak(&logged, reference, goal, tolerance);

        let rate = adherence_rate(&logged, reference, window_days, goal, tolerance);
        let adherence = AdherenceSummary {
            window_days: rate.window_days,
            days_tracked: rate.days_tracked,
            days_on_target: rate.days_on_target,
            rate_percent: rate.rate_percent,
        };

        tracing::debug!(
            "nutrition summary for {}: streak {}/{}, adherence {}%",
            user_id,
            streak.current,
            streak.best,
            adherence.rate_percent
        );

        Ok(NutritionSummaryResponse {
            today,
            week,
            streak,
            adherence,
        })
    }
}

fn calories_for(buckets: &[DailyCalorieBucket], date: NaiveDate) -> i64 {
    buckets
        .iter()
        .filter(|b| b.date == date)
        .map(|b| b.calories)
        .sum()
}

fn build_today(
    logged: &[DailyCalorieBucket],
    planned: &[DailyCalorieBucket],
    reference: NaiveDate,
    goal: Option<i64>,
    tolerance: f64,
) -> TodaySummary {
    let consumed = calories_for(logged, reference);
    TodaySummary {
        date: reference,
        consumed,
        planned: calories_for(planned, reference),
        goal,
        is_on_target: goal
            .filter(|g| *g > 0)
            .map(|g| is_on_target(consumed, g, tolerance)),
    }
}

fn build_week(logged: &[DailyCalorieBucket], reference: NaiveDate) -> WeekSummary {
    let start = week_start(reference);
    let end = start + Duration::days(6);

    let days: Vec<DailyCalorieBucket> = (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DailyCalorieBucket {
                date,
                calories: calories_for(logged, date),
            }
        })
        .collect();

    let total: i64 = days.iter().map(|d| d.calories).sum();

    WeekSummary {
        start,
        end,
        total,
        daily_average: total as f64 / 7.0,
        days,
    }
}

fn build_streak(
    logged: &[DailyCalorieBucket],
    reference: NaiveDate,
    goal: Option<i64>,
    tolerance: f64,
) -> StreakSummary {
    let current = current_streak(logged, reference, goal, tolerance);
    let best = best_streak(logged, goal, tolerance);
    StreakSummary {
        current,
        best: best.length,
        last_on_target_date: best.last_on_target_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn bucket(d: u32, calories: i64) -> DailyCalorieBucket {
        DailyCalorieBucket {
            date: day(d),
            calories,
        }
    }

    #[test]
    fn test_today_on_target_within_tolerance() {
        let logged = vec![bucket(12, 2150)];
        let today = build_today(&logged, &[], day(12), Some(2000), 10.0);
        assert_eq!(today.consumed, 2150);
        assert_eq!(today.is_on_target, Some(true));
    }

    #[test]
    fn test_today_off_target_outside_tolerance() {
        let logged = vec![bucket(12, 2250)];
        let today = build_today(&logged, &[], day(12), Some(2000), 10.0);
        assert_eq!(today.is_on_target, Some(false));
    }

    #[test]
    fn test_today_without_goal() {
        let logged = vec![bucket(12, 2150)];
        let today = build_today(&logged, &[], day(12), None, 10.0);
        assert_eq!(today.is_on_target, None);
    }

    #[test]
    fn test_week_covers_monday_to_sunday() {
        // 2025-03-12 is a Wednesday; its week is Mar 10 - Mar 16.
        let logged = vec![bucket(10, 1800), bucket(12, 2000), bucket(16, 2200)];
        let week = build_week(&logged, day(12));
        assert_eq!(week.start, day(10));
        assert_eq!(week.end, day(16));
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.total, 6000);
        assert!((week.daily_average - 6000.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_week_excludes_days_outside_the_window() {
        let logged = vec![bucket(9, 5000), bucket(12, 2000)];
        let week = build_week(&logged, day(12));
        assert_eq!(week.total, 2000);
    }

    #[test]
    fn test_streak_summary() {
        let logged = vec![bucket(10, 2000), bucket(11, 1950), bucket(12, 2050)];
        let streak = build_streak(&logged, day(12), Some(2000), 10.0);
        assert_eq!(streak.current, 3);
        assert_eq!(streak.best, 3);
        assert_eq!(streak.last_on_target_date, Some(day(12)));
    }
}
