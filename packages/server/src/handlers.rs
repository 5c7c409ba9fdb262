//! HTTP handler functions for the sitescope API.

use actix_web::{HttpResponse, web};
use sitescope_geo::Coordinate;
use sitescope_poi_models::PoiCategory;
use sitescope_profile::AnalysisError;
use sitescope_providers::{geocode, registry};
use sitescope_server_models::{AnalyzeParams, ApiCategory, ApiHealth, PointParams};

use crate::AppState;

/// `GET /api/health`
///
/// Includes a live geocoder round-trip so a misconfigured API key shows
/// up here instead of on the first analysis.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let config = registry::geocoder_service();
    let geocoder_available = geocode::is_available(&state.client, &config).await;

    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder_available,
    })
}

/// `GET /api/categories`
///
/// Returns the eight fixed business categories.
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiCategory> = PoiCategory::all()
        .iter()
        .copied()
        .map(ApiCategory::from)
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/analyze`
///
/// Full analysis of a free-text address: geocode, then traffic and
/// businesses concurrently.
pub async fn analyze(
    state: web::Data<AppState>,
    params: web::Query<AnalyzeParams>,
) -> HttpResponse {
    match sitescope_profile::analyze(&state.client, &params.address).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(AnalysisError::AddressNotFound) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "No location found for this address"
        })),
        Err(e) => {
            log::error!("Failed to analyze address: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to analyze address"
            }))
        }
    }
}

/// `GET /api/traffic`
///
/// Traffic estimate for a raw coordinate.
pub async fn traffic(state: web::Data<AppState>, params: web::Query<PointParams>) -> HttpResponse {
    let coordinate = Coordinate::new(params.lat, params.lng);
    if !coordinate.is_valid() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid coordinates"
        }));
    }

    let report = state.estimator.estimate(coordinate).await;
    HttpResponse::Ok().json(report)
}

/// `GET /api/businesses`
///
/// Categorized nearby businesses for a raw coordinate.
pub async fn businesses(
    state: web::Data<AppState>,
    params: web::Query<PointParams>,
) -> HttpResponse {
    let coordinate = Coordinate::new(params.lat, params.lng);
    if !coordinate.is_valid() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid coordinates"
        }));
    }

    let limit = params.limit.unwrap_or(sitescope_poi::DEFAULT_LIMIT);
    let businesses = sitescope_poi::nearby_businesses(&state.client, coordinate, limit).await;
    HttpResponse::Ok().json(businesses)
}
