use crate::models::DailyCalorieBucket;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for the read side of the grocery domain.
///
/// All reads are independent, stateless queries; nothing here caches.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Item names in the user's cupboard, as stored (not yet normalized
    /// for matching).
    pub async fn pantry_names(&self, user_id: &str) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT name
            FROM pantry_items
            WHERE user_id = $1
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let names: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

        tracing::debug!("User {} has {} pantry items", user_id, names.len());

        Ok(names)
    }

    /// Ingredient names of a recipe owned by the user.
    ///
    /// Fails with NotFound when the recipe does not exist or belongs to
    /// someone else.
    pub async fn recipe_ingredient_names(
        &self,
        recipe_id: Uuid,
        user_id: &str,
    ) -> Result<Vec<String>, PostgresError> {
        let exists_query = r#"
            SELECT 1 AS one
            FROM recipes
            WHERE id = $1 AND user_id = $2
        "#;

        let exists = sqlx::query(exists_query)
            .bind(recipe_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if exists.is_none() {
            return Err(PostgresError::NotFound(format!("recipe {}", recipe_id)));
        }

        let query = r#"
            SELECT name
            FROM recipe_ingredients
            WHERE recipe_id = $1
            ORDER BY name
        "#;

        let rows = sqlx::query(query)
            .bind(recipe_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Logged calorie totals grouped by local calendar day within
    /// [start, end].
    pub async fn logged_calories_by_day(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCalorieBucket>, PostgresError> {
        let query = r#"
            SELECT log_date AS date, SUM(calories)::bigint AS calories
            FROM meal_logs
            WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
            GROUP BY log_date
            ORDER BY log_date
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| DailyCalorieBucket {
                date: row.get("date"),
                calories: row.get("calories"),
            })
            .collect())
    }

    /// Planned calorie totals grouped by local calendar day within
    /// [start, end].
    pub async fn planned_calories_by_day(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCalorieBucket>, PostgresError> {
        let query = r#"
            SELECT plan_date AS date, SUM(calories)::bigint AS calories
            FROM planned_meals
            WHERE user_id = $1 AND plan_date BETWEEN $2 AND $3
            GROUP BY plan_date
            ORDER BY plan_date
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| DailyCalorieBucket {
                date: row.get("date"),
                calories: row.get("calories"),
            })
            .collect())
    }

    /// The user's stored daily calorie goal, if any.
    pub async fn calorie_goal(&self, user_id: &str) -> Result<Option<i64>, PostgresError> {
        let query = r#"
            SELECT calorie_goal
            FROM user_preferences
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|r| r.get::<Option<i32>, _>("calorie_goal")).map(i64::from))
    }

    /// Whether the pg_trgm extension is installed in the backing store.
    pub async fn has_trigram_extension(&self) -> Result<bool, PostgresError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM pg_extension WHERE extname = 'pg_trgm'
            ) AS installed
        "#;

        let row = sqlx::query(query).fetch_one(&self.pool).await?;

        Ok(row.get("installed"))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = PostgresError::NotFound("recipe 123".to_string());
        assert_eq!(err.to_string(), "Not found: recipe 123");
    }
}
