use actix_web::{web, HttpResponse, Responder};

use crate::core::DiscoveryFilter;
use crate::models::{DiscoverParams, DiscoverResponse, HealthResponse, SwipeRequest, SwipeResponse};
use crate::routes::auth::AuthenticatedMember;
use crate::routes::errors::match_error_response;
use crate::routes::state::AppState;

/// Configure discovery and swipe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/discover", web::get().to(discover))
        .route("/swipe", web::post().to(swipe));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discover endpoint
///
/// GET /api/v1/discover?minAge=20&maxAge=35&gender=F&limit=10&sortBy=distance
///
/// Every parameter is optional. Results are unseen members, closest first.
async fn discover(
    state: web::Data<AppState>,
    member: AuthenticatedMember,
    params: web::Query<DiscoverParams>,
) -> impl Responder {
    let limit = state.matching.effective_limit(params.limit);
    let filter = DiscoveryFilter::from_params(params.min_age, params.max_age, &params.gender, limit)
        .sorted_by(params.sort_by);

    tracing::debug!(requester_id = %member.id(), ?filter, "Discover request");

    let (cancel, _guard) = state.request_token();
    match state.discovery.discover(member.id(), &filter, &cancel).await {
        Ok(results) => HttpResponse::Ok().json(DiscoverResponse { results }),
        Err(e) => {
            tracing::error!(requester_id = %member.id(), "Failed to fetch candidates: {}", e);
            match_error_response("unable to fetch candidates", &e)
        }
    }
}

/// Swipe endpoint
///
/// POST /api/v1/swipe
///
/// Request body:
/// ```json
/// {
///   "swipedId": "0190b7d4-...",
///   "preference": "YES"
/// }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    member: AuthenticatedMember,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    let (cancel, _guard) = state.request_token();
    let result = state
        .detector
        .swipe(member.id(), req.swiped_id, req.preference, &cancel)
        .await;

    match result {
        Ok(outcome) => HttpResponse::Ok().json(SwipeResponse { results: outcome }),
        Err(e) => {
            if e.is_retryable() {
                tracing::warn!(swiper_id = %member.id(), swiped_id = %req.swiped_id, "Swipe not recorded: {}", e);
            } else {
                tracing::info!(swiper_id = %member.id(), swiped_id = %req.swiped_id, "Swipe rejected: {}", e);
            }
            match_error_response("unable to record swipe", &e)
        }
    }
}
