use crate::core::{match_ingredients, normalize_name, normalize_quantity};
use crate::models::{
    ErrorResponse, NormalizeQuantityRequest, NormalizeQuantityResponse, PantryMatchRequest,
    PantryMatchResponse,
};
use crate::routes::AppState;
use crate::services::PostgresError;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/quantities/normalize", web::post().to(normalize))
        .route("/recipes/{id}/pantry-match", web::get().to(pantry_match));
}

/// Quantity normalization endpoint
///
/// POST /api/v1/quantities/normalize
///
/// Request body:
/// ```json
/// { "raw": "1 1/2 cups" }
/// ```
///
/// Never fails on malformed input: anything unparseable resolves to the
/// documented `1 count` fallback.
async fn normalize(req: web::Json<NormalizeQuantityRequest>) -> impl Responder {
    let quantity = normalize_quantity(&req.raw);
    let display = quantity.to_display_string();

    HttpResponse::Ok().json(NormalizeQuantityResponse { quantity, display })
}

/// Recipe pantry-match endpoint
///
/// GET /api/v1/recipes/{id}/pantry-match?userId={userId}
///
/// Reconciles the recipe's ingredient names against the user's cupboard
/// using substring containment, returning matched/missing lists and the
/// suggestion flag.
async fn pantry_match(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PantryMatchRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let recipe_id = path.into_inner();
    let user_id = &query.user_id;

    let ingredients = match state
        .postgres
        .recipe_ingredient_names(recipe_id, user_id)
        .await
    {
        Ok(names) => names,
        Err(PostgresError::NotFound(what)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: what,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load recipe {} for {}: {}", recipe_id, user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load recipe".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let pantry_names = match state.postgres.pantry_names(user_id).await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Failed to load pantry for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load pantry".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Both sides are normalized before matching; containment runs on the
    // cleaned, lowercased names.
    let pantry_normalized: Vec<String> = pantry_names.iter().map(|n| normalize_name(n)).collect();
    let ingredients_normalized: Vec<String> =
        ingredients.iter().map(|n| normalize_name(n)).collect();

    let result = match_ingredients(&pantry_normalized, &ingredients_normalized);

    tracing::debug!(
        "Pantry match for recipe {}: {:.0}% ({} missing)",
        recipe_id,
        result.match_percentage,
        result.missing.len()
    );

    HttpResponse::Ok().json(PantryMatchResponse { recipe_id, result })
}
