use crate::models::{ErrorResponse, SearchRequest};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search));
}

/// Grouped search endpoint
///
/// GET /api/v1/search?userId={userId}&q={query}&limit={limit}
///
/// `limit` is per result group and clamped to 1-10; an empty query
/// returns empty groups without querying the backend.
async fn search(state: web::Data<AppState>, query: web::Query<SearchRequest>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = i64::from(query.limit.unwrap_or(state.search_default_limit).clamp(1, 10));

    tracing::info!(
        "Search for user {}: {:?} (limit {})",
        query.user_id,
        query.q,
        limit
    );

    match state.search.search(&query.user_id, &query.q, limit).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            tracing::error!("Search failed for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Search failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
