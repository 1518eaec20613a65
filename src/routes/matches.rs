use crate::core::{MatchError, MatchingEngine};
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::services::{AppwriteClient, AppwriteError, CampusGazetteer};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub gazetteer: Arc<CampusGazetteer>,
    pub engine: MatchingEngine,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requestId": "string"
/// }
/// ```
///
/// Responds with the ranked match list for the ride request. An empty list
/// is a successful search with no compatible rides; a 5xx means the offer
/// directory could not be searched at all.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = &req.request_id;

    tracing::info!("Finding matches for ride request: {}", request_id);

    // Fetch the ride request document
    let mut ride_request = match state.appwrite.get_request(request_id).await {
        Ok(request) => request,
        Err(AppwriteError::NotFound(msg)) => {
            tracing::info!("Ride request {} not found", request_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Ride request not found".to_string(),
                message: msg,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch ride request {}: {}", request_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch ride request".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Older documents may predate geocoding; resolve their labels locally
    state.gazetteer.backfill_request(&mut ride_request);

    // Query the open-offer pool and run the matching pipeline
    match state
        .engine
        .find_matches_for_request(&ride_request, state.appwrite.as_ref())
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                "Returning {} matches for request {} (from {} candidates)",
                outcome.matches.len(),
                request_id,
                outcome.total_candidates
            );

            HttpResponse::Ok().json(FindMatchesResponse {
                matches: outcome.matches,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(MatchError::PoolUnavailable(msg)) => {
            tracing::error!("Failed to fetch ride offers for {}: {}", request_id, msg);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch ride offers".to_string(),
                message: msg,
                status_code: 500,
            })
        }
    }
}
