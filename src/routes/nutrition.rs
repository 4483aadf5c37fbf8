use crate::models::{ErrorResponse, NutritionSummaryRequest};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/nutrition/summary", web::get().to(summary));
}

/// Nutrition summary endpoint
///
/// GET /api/v1/nutrition/summary?userId={userId}&date={date}&goal={goal}
///     &tolerancePercent={pct}&windowDays={days}
///
/// Returns today/week/streak/adherence read models, recomputed per
/// request. A missing goal yields vacuous on-target fields, not an error.
async fn summary(
    state: web::Data<AppState>,
    query: web::Query<NutritionSummaryRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.nutrition.summary(&query).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Nutrition summary failed for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Nutrition summary failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
