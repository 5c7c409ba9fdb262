#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot property analysis.
//!
//! [`analyze`] resolves a free-text address and runs the two pipelines —
//! traffic estimation and nearby-business aggregation — concurrently over
//! the resolved coordinate, merging them into a [`PropertyProfile`].
//!
//! Only geocoding can fail here: without a coordinate neither pipeline can
//! run. Everything downstream recovers locally (fallback traffic report,
//! empty business collection), so a resolved address always produces a
//! complete profile. Each analysis is an independent computation; nothing
//! is cached or shared between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitescope_geo::Coordinate;
use sitescope_poi_models::PoiCollection;
use sitescope_providers::{ProviderError, geocode, registry};
use sitescope_traffic::TrafficEstimator;
use sitescope_traffic_models::TrafficReport;
use thiserror::Error;

/// Errors from [`analyze`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The geocoder answered but had no match for the address.
    #[error("address could not be resolved to a location")]
    AddressNotFound,
    /// The geocoder itself was unreachable or returned garbage.
    #[error("geocoding failed: {0}")]
    Geocode(#[from] ProviderError),
}

/// The merged result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyProfile {
    /// Canonical address as matched by the geocoder, or the caller's own
    /// label when analysis started from raw coordinates.
    pub address: String,
    /// The analyzed location.
    pub coordinates: Coordinate,
    /// Vehicle and pedestrian traffic estimate.
    pub traffic: TrafficReport,
    /// Nearby businesses in the eight fixed buckets.
    pub businesses: PoiCollection,
    /// When this analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

/// Analyzes a free-text address end to end.
///
/// # Errors
///
/// Returns [`AnalysisError::AddressNotFound`] when the geocoder has no
/// match, or [`AnalysisError::Geocode`] when the geocoding call itself
/// fails. Traffic and business lookups never fail; they degrade into
/// flagged fallbacks / empty collections.
pub async fn analyze(
    client: &reqwest::Client,
    address: &str,
) -> Result<PropertyProfile, AnalysisError> {
    let config = registry::geocoder_service();
    let located = geocode::resolve(client, &config, address)
        .await?
        .ok_or(AnalysisError::AddressNotFound)?;

    log::info!(
        "Geocoded {address:?} to ({:.4}, {:.4})",
        located.coordinates.lat,
        located.coordinates.lng
    );

    Ok(analyze_coordinates(client, located.formatted_address, located.coordinates).await)
}

/// Analyzes an already-resolved coordinate under the given display label.
///
/// Infallible: both pipelines produce a value in every case.
pub async fn analyze_coordinates(
    client: &reqwest::Client,
    address: impl Into<String>,
    coordinates: Coordinate,
) -> PropertyProfile {
    let estimator = TrafficEstimator::from_registry(client);

    let (traffic, businesses) = tokio::join!(
        estimator.estimate(coordinates),
        sitescope_poi::nearby_businesses(client, coordinates, sitescope_poi::DEFAULT_LIMIT),
    );

    PropertyProfile {
        address: address.into(),
        coordinates,
        traffic,
        businesses,
        analyzed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use sitescope_traffic::heuristic;
    use sitescope_traffic_models::Moment;

    use super::*;

    #[test]
    fn profile_serializes_camel_case() {
        let coordinates = Coordinate::new(40.7128, -74.0060);
        let profile = PropertyProfile {
            address: "350 5th Ave, New York, NY 10118".to_string(),
            coordinates,
            traffic: heuristic::estimate_at(
                coordinates,
                Moment {
                    hour: 8,
                    weekend: false,
                },
            ),
            businesses: PoiCollection::empty(),
            analyzed_at: Utc::now(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("analyzedAt").is_some());
        assert!(json.get("businesses").is_some());
        assert!(json.pointer("/traffic/vehicleCount").is_some());
        assert!(json.pointer("/coordinates/lat").is_some());
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            AnalysisError::AddressNotFound.to_string(),
            "address could not be resolved to a location"
        );

        let err = AnalysisError::Geocode(ProviderError::Status { status: 502 });
        assert!(err.to_string().starts_with("geocoding failed:"));
    }
}
