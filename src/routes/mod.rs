// Route exports
pub mod nutrition;
pub mod pantry;
pub mod search;

use crate::models::HealthResponse;
use crate::services::{NutritionAggregator, PostgresClient, SearchRanker};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub search: Arc<SearchRanker>,
    pub nutrition: Arc<NutritionAggregator>,
    pub search_default_limit: u8,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(search::configure)
            .configure(nutrition::configure)
            .configure(pantry::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
