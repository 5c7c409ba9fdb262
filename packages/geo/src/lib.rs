#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate types and great-circle distance math.
//!
//! Everything downstream (traffic estimation, POI aggregation, the API
//! surface) works in terms of [`Coordinate`] pairs produced by the
//! geocoder. This crate owns the two pieces of geo math the pipelines
//! share: haversine distance and the degree-per-kilometer offsets used to
//! place routing probe points around a property.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude. Nearly constant everywhere;
/// longitude spacing shrinks with `cos(latitude)` instead.
pub const KM_PER_DEGREE_LAT: f64 = 111.32;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without validating it; see [`Self::is_valid`].
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Haversine formula over a spherical Earth of [`EARTH_RADIUS_KM`].
/// Symmetric in its arguments and effectively zero for identical points.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in meters.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    distance_km(a, b) * 1000.0
}

/// Degree deltas corresponding to a distance at a given latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeOffsets {
    /// Degrees of latitude per the requested distance.
    pub lat_deg: f64,
    /// Degrees of longitude per the requested distance.
    pub lng_deg: f64,
}

/// Converts a distance in kilometers into latitude/longitude degree deltas
/// at the given latitude.
///
/// The latitude delta is essentially constant; the longitude delta grows
/// with `1 / cos(latitude)` as meridians converge. It diverges toward the
/// poles, so callers must not invoke this at `latitude = ±90°`.
#[must_use]
pub fn degree_offsets(latitude_deg: f64, km: f64) -> DegreeOffsets {
    let lat_deg = km / KM_PER_DEGREE_LAT;
    let lng_deg = km / (KM_PER_DEGREE_LAT * latitude_deg.to_radians().cos());
    DegreeOffsets { lat_deg, lng_deg }
}

/// Returns the point `north_km` / `east_km` away from `origin`
/// (negative values go south / west).
#[must_use]
pub fn offset_point(origin: Coordinate, north_km: f64, east_km: f64) -> Coordinate {
    let offsets = degree_offsets(origin.lat, 1.0);
    Coordinate {
        lat: origin.lat + offsets.lat_deg * north_km,
        lng: origin.lng + offsets.lng_deg * east_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC: Coordinate = Coordinate::new(40.7128, -74.0060);
    const LA: Coordinate = Coordinate::new(34.0522, -118.2437);

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_km(NYC, LA);
        let ba = distance_km(LA, NYC);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(distance_km(NYC, NYC).abs() < 1e-9);
    }

    #[test]
    fn nyc_to_la_matches_known_distance() {
        // Great-circle NYC <-> LA is ~3936 km
        let d = distance_km(NYC, LA);
        assert!((d - 3936.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn meters_is_km_scaled() {
        let km = distance_km(NYC, LA);
        let m = distance_meters(NYC, LA);
        assert!((m - km * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn offsets_match_at_equator() {
        let o = degree_offsets(0.0, 1.0);
        assert!((o.lat_deg - 1.0 / KM_PER_DEGREE_LAT).abs() < 1e-9);
        assert!((o.lng_deg - o.lat_deg).abs() < 1e-9);
    }

    #[test]
    fn lng_offset_doubles_at_sixty_degrees() {
        // cos(60°) = 0.5, so a kilometer spans twice as many degrees
        let equator = degree_offsets(0.0, 1.0);
        let sixty = degree_offsets(60.0, 1.0);
        assert!((sixty.lng_deg - equator.lng_deg * 2.0).abs() < 1e-9);
        assert!((sixty.lat_deg - equator.lat_deg).abs() < 1e-9);
    }

    #[test]
    fn offset_point_lands_a_kilometer_away() {
        let north = offset_point(NYC, 1.0, 0.0);
        let east = offset_point(NYC, 0.0, 1.0);
        assert!((distance_km(NYC, north) - 1.0).abs() < 0.01);
        assert!((distance_km(NYC, east) - 1.0).abs() < 0.01);
    }

    #[test]
    fn validity_bounds() {
        assert!(NYC.is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.1, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn display_rounds_to_four_decimals() {
        assert_eq!(NYC.to_string(), "40.7128,-74.0060");
    }
}
