#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the sitescope server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the analysis result types to allow independent evolution of the
//! API contract.

use serde::{Deserialize, Serialize};
use sitescope_poi_models::PoiCategory;

/// Query parameters for the analyze endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeParams {
    /// Free-text address to analyze.
    pub address: String,
}

/// Query parameters for the coordinate-driven endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointParams {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Maximum number of places to fetch (businesses endpoint only).
    pub limit: Option<usize>,
}

/// A business category as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Stable wire key (lowercase), matching the bucket field names in a
    /// business collection.
    pub id: String,
    /// Human-readable label.
    pub name: String,
}

impl From<PoiCategory> for ApiCategory {
    fn from(category: PoiCategory) -> Self {
        Self {
            id: category.to_string(),
            name: category.display_name().to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether the geocoding provider answered the self-test.
    pub geocoder_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_match_collection_fields() {
        let api: ApiCategory = PoiCategory::Restaurants.into();
        assert_eq!(api.id, "restaurants");
        assert_eq!(api.name, "Restaurants");

        let api: ApiCategory = PoiCategory::Fuel.into();
        assert_eq!(api.id, "fuel");
        assert_eq!(api.name, "Fuel");
    }
}
