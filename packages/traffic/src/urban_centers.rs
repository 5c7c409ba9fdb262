//! Static table of known urban centers.
//!
//! Embedded from `centers/urban_centers.toml` at compile time and
//! parsed once on first use.  The heuristic model only ever needs the
//! nearest center, so the lookup is a plain linear scan — the table is
//! a few dozen rows.

use std::sync::LazyLock;

use serde::Deserialize;
use sitescope_geo::Coordinate;

/// A known urban center with a relative traffic density.
#[derive(Debug, Clone, Deserialize)]
pub struct UrbanCenter {
    /// City name (e.g., `"Chicago"`).
    pub name: String,
    /// Center latitude.
    pub lat: f64,
    /// Center longitude.
    pub lng: f64,
    /// Relative downtown traffic density, 1-10.
    pub density: u32,
}

impl UrbanCenter {
    /// The center's position as a coordinate.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CentersFile {
    centers: Vec<UrbanCenter>,
}

static CENTERS: LazyLock<Vec<UrbanCenter>> = LazyLock::new(|| {
    let file: CentersFile = toml::de::from_str(include_str!("../centers/urban_centers.toml"))
        .unwrap_or_else(|e| panic!("Failed to parse urban centers table: {e}"));
    file.centers
});

#[cfg(test)]
const EXPECTED_CENTER_COUNT: usize = 39;

/// Returns the full urban-center table.
///
/// # Panics
///
/// Panics on first access if the embedded TOML is malformed (a
/// development error, caught by the table tests).
#[must_use]
pub fn all_centers() -> &'static [UrbanCenter] {
    &CENTERS
}

/// Finds the nearest center to `coordinate`, with its great-circle
/// distance in kilometers.
///
/// Returns `None` only for an empty table, which the embedded data
/// rules out in practice.
#[must_use]
pub fn nearest(coordinate: Coordinate) -> Option<(&'static UrbanCenter, f64)> {
    let mut best: Option<(&'static UrbanCenter, f64)> = None;
    for center in all_centers() {
        let km = sitescope_geo::distance_km(coordinate, center.position());
        if best.is_none_or(|(_, best_km)| km < best_km) {
            best = Some((center, km));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_centers() {
        assert_eq!(
            all_centers().len(),
            EXPECTED_CENTER_COUNT,
            "Expected {EXPECTED_CENTER_COUNT} urban centers, found {}. \
             Update EXPECTED_CENTER_COUNT after adding/removing centers.",
            all_centers().len()
        );
    }

    #[test]
    fn center_names_are_unique() {
        let mut seen = BTreeSet::new();
        for center in all_centers() {
            assert!(!center.name.is_empty(), "Center has empty name");
            assert!(
                seen.insert(&center.name),
                "Duplicate urban center: {}",
                center.name
            );
        }
    }

    #[test]
    fn densities_are_in_range() {
        for center in all_centers() {
            assert!(
                (1..=10).contains(&center.density),
                "{} has density {} outside 1-10",
                center.name,
                center.density
            );
        }
    }

    #[test]
    fn positions_are_valid_coordinates() {
        for center in all_centers() {
            assert!(
                center.position().is_valid(),
                "{} has invalid coordinates {},{}",
                center.name,
                center.lat,
                center.lng
            );
        }
    }

    #[test]
    fn nearest_to_manhattan_is_new_york() {
        let midtown = Coordinate {
            lat: 40.7549,
            lng: -73.9840,
        };
        let (center, km) = nearest(midtown).unwrap();
        assert_eq!(center.name, "New York");
        assert!(km < 10.0, "Midtown should be within 10 km, got {km}");
    }

    #[test]
    fn nearest_far_from_everything_still_resolves() {
        // Middle of the Pacific: a center is still returned, just far.
        let pacific = Coordinate {
            lat: 0.0,
            lng: -160.0,
        };
        let (_, km) = nearest(pacific).unwrap();
        assert!(km > 1000.0);
    }
}
