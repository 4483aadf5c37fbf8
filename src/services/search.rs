use crate::config::SearchWeightsConfig;
use crate::core::{NormalizedQuantity, UnitType};
use crate::models::{SearchResultItem, SearchResults};
use crate::services::postgres::{PostgresClient, PostgresError};
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Multi-entity search ranking over recipes, cupboard items and receipts.
///
/// Every row is matched by full-text OR case-insensitive substring; the
/// score blends the full-text rank with pg_trgm similarity when the
/// extension is available. Availability is probed once per instance and
/// the result drives the scoring formula for the instance's whole life.
pub struct SearchRanker {
    postgres: Arc<PostgresClient>,
    weights: SearchWeightsConfig,
    trigram: OnceCell<bool>,
}

impl SearchRanker {
    pub fn new(postgres: Arc<PostgresClient>, weights: SearchWeightsConfig) -> Self {
        Self {
            postgres,
            weights,
            trigram: OnceCell::new(),
        }
    }

    /// One-time trigram capability probe, memoized for the instance's
    /// lifetime. A failed probe disables trigram scoring rather than
    /// failing the search.
    pub async fn trigram_enabled(&self) -> bool {
        *self
            .trigram
            .get_or_init(|| async {
                match self.postgres.has_trigram_extension().await {
                    Ok(installed) => {
                        tracing::info!(
                            "pg_trgm extension {}, trigram scoring {}",
                            if installed { "found" } else { "not found" },
                            if installed { "enabled" } else { "disabled" }
                        );
                        installed
                    }
                    Err(e) => {
                        tracing::warn!("trigram capability probe failed, disabling: {}", e);
                        false
                    }
                }
            })
            .await
    }

    /// Run the grouped search. An empty (trimmed) query short-circuits to
    /// empty groups without touching the backend.
    pub async fn search(
        &self,
        user_id: &str,
        query: &str,
        limit_per_group: i64,
    ) -> Result<SearchResults, PostgresError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::empty());
        }

        let trigram = self.trigram_enabled().await;

        let recipes = self.search_recipes(user_id, query, limit_per_group, trigram).await?;
        let cupboard = self.search_cupboard(user_id, query, limit_per_group, trigram).await?;
        let receipts = self.search_receipts(user_id, query, limit_per_group, trigram).await?;

        let total = recipes.len() + cupboard.len() + receipts.len();

        tracing::debug!(
            "search for {:?} matched {} items for user {} (trigram: {})",
            query,
            total,
            user_id,
            trigram
        );

        Ok(SearchResults {
            recipes,
            cupboard,
            receipts,
            total,
            used_trigram: trigram,
        })
    }

    async fn search_recipes(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
        trigram: bool,
    ) -> Result<Vec<SearchResultItem>, PostgresError> {
        let score_expr = if trigram {
            format!(
                "(ts_rank(search_doc, plainto_tsquery('english', $2))
                  + {} * similarity(coalesce(title, ''), $2)
                  + {} * similarity(coalesce(cuisine, ''), $2))::float8",
                self.weights.recipe_title, self.weights.recipe_cuisine
            )
        } else {
            "ts_rank(search_doc, plainto_tsquery('english', $2))::float8".to_string()
        };

        let sql = format!(
            r#"
            SELECT id, title, cuisine, {score} AS score
            FROM (
                SELECT id, title, cuisine, created_at,
                       to_tsvector('english',
                           coalesce(title, '') || ' ' || coalesce(cuisine, '') || ' ' || coalesce(description, '')
                       ) AS search_doc,
                       coalesce(title, '') || ' ' || coalesce(cuisine, '') || ' ' || coalesce(description, '') AS search_text
                FROM recipes
                WHERE user_id = $1
            ) r
            WHERE search_doc @@ plainto_tsquery('english', $2)
               OR search_text ILIKE '%' || $2 || '%'
            ORDER BY score DESC, created_at DESC
            LIMIT $3
            "#,
            score = score_expr
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(query)
            .bind(limit)
            .fetch_all(self.postgres.pool())
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: uuid::Uuid = row.get("id");
                let cuisine: Option<String> = row.get("cuisine");
                SearchResultItem {
                    id,
                    title: row.get("title"),
                    subtitle: cuisine.unwrap_or_else(|| "Recipe".to_string()),
                    href: format!("/recipes/{}", id),
                    score: row.get("score"),
                }
            })
            .collect())
    }

    async fn search_cupboard(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
        trigram: bool,
    ) -> Result<Vec<SearchResultItem>, PostgresError> {
        let score_expr = if trigram {
            format!(
                "(ts_rank(search_doc, plainto_tsquery('english', $2))
                  + {} * similarity(coalesce(name, ''), $2)
                  + {} * similarity(coalesce(category, ''), $2))::float8",
                self.weights.pantry_name, self.weights.pantry_category
            )
        } else {
            "ts_rank(search_doc, plainto_tsquery('english', $2))::float8".to_string()
        };

        let sql = format!(
            r#"
            SELECT id, name, category, quantity_value, quantity_unit_type, {score} AS score
            FROM (
                SELECT id, name, category, quantity_value, quantity_unit_type, created_at,
                       to_tsvector('english',
                           coalesce(name, '') || ' ' || coalesce(category, '')
                       ) AS search_doc,
                       coalesce(name, '') || ' ' || coalesce(category, '') AS search_text
                FROM pantry_items
                WHERE user_id = $1
            ) p
            WHERE search_doc @@ plainto_tsquery('english', $2)
               OR search_text ILIKE '%' || $2 || '%'
            ORDER BY score DESC, created_at DESC
            LIMIT $3
            "#,
            score = score_expr
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(query)
            .bind(limit)
            .fetch_all(self.postgres.pool())
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: uuid::Uuid = row.get("id");
                let name: String = row.get("name");
                let category: Option<String> = row.get("category");
                // Rehydrate the stored triple for the quantity fallback;
                // no conversion is reapplied.
                let quantity = NormalizedQuantity::from_parts(
                    row.get("quantity_value"),
                    UnitType::from_stored(row.get("quantity_unit_type")),
                    String::new(),
                );
                let subtitle = category.unwrap_or_else(|| quantity.to_display_string());
                SearchResultItem {
                    id,
                    title: name,
                    subtitle,
                    href: format!("/cupboard/{}", id),
                    score: row.get("score"),
                }
            })
            .collect())
    }

    async fn search_receipts(
        &self,
        user_id: &str,
        query: &str,
        limit: i64,
        trigram: bool,
    ) -> Result<Vec<SearchResultItem>, PostgresError> {
        let score_expr = if trigram {
            format!(
                "(ts_rank(to_tsvector('english', coalesce(r.store_name, '')), plainto_tsquery('english', $2))
                  + {} * similarity(coalesce(r.store_name, ''), $2)
                  + {} * coalesce((
                        SELECT max(similarity(ri.name, $2))
                        FROM receipt_items ri
                        WHERE ri.receipt_id = r.id
                    ), 0))::float8",
                self.weights.receipt_store, self.weights.receipt_items
            )
        } else {
            "ts_rank(to_tsvector('english', coalesce(r.store_name, '')), plainto_tsquery('english', $2))::float8"
                .to_string()
        };

        let sql = format!(
            r#"
            SELECT r.id, r.store_name, r.purchase_date, r.total_cents,
                   (
                       SELECT string_agg(ri.name, ', ')
                       FROM receipt_items ri
                       WHERE ri.receipt_id = r.id AND ri.name ILIKE '%' || $2 || '%'
                   ) AS matched_items,
                   {score} AS score
            FROM receipts r
            WHERE r.user_id = $1
              AND (to_tsvector('english', coalesce(r.store_name, '')) @@ plainto_tsquery('english', $2)
                   OR r.store_name ILIKE '%' || $2 || '%'
                   OR EXISTS (
                       SELECT 1 FROM receipt_items ri
                       WHERE ri.receipt_id = r.id AND ri.name ILIKE '%' || $2 || '%'
                   ))
            ORDER BY score DESC, r.created_at DESC
            LIMIT $3
            "#,
            score = score_expr
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(query)
            .bind(limit)
            .fetch_all(self.postgres.pool())
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: uuid::Uuid = row.get("id");
                let store_name: String = row.get("store_name");
                let matched_items: Option<String> = row.get("matched_items");
                let purchase_date: Option<chrono::NaiveDate> = row.get("purchase_date");
                let total_cents: Option<i64> = row.get("total_cents");

                // Subtitle precedence: matched item names, then
                // date + total, then a bare label.
                let subtitle = matched_items
                    .filter(|names| !names.is_empty())
                    .or_else(|| match (purchase_date, total_cents) {
                        (Some(date), Some(cents)) => {
                            Some(format!("{} · ${:.2}", date, cents as f64 / 100.0))
                        }
                        (Some(date), None) => Some(date.to_string()),
                        _ => None,
                    })
                    .unwrap_or_else(|| "Receipt".to_string());

                SearchResultItem {
                    id,
                    title: store_name,
                    subtitle,
                    href: format!("/receipts/{}", id),
                    score: row.get("score"),
                }
            })
            .collect())
    }
}
