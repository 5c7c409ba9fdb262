#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! POI taxonomy types and the categorized collection model.
//!
//! This crate defines the canonical eight-bucket business taxonomy that
//! every nearby place is normalized into, regardless of which provider
//! taxonomy it arrived with. Classification is a partition: each place
//! lands in exactly one bucket, and a [`PoiCollection`] always carries all
//! eight buckets even when empty.

use serde::{Deserialize, Serialize};
use sitescope_geo::Coordinate;
use strum_macros::{AsRefStr, Display, EnumString};

/// The eight fixed business categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PoiCategory {
    /// Restaurants, cafés, bars, and other food service.
    Restaurants,
    /// Shops, stores, malls, and markets.
    Retail,
    /// Gas and charging stations.
    Fuel,
    /// Schools, colleges, and other education.
    Schools,
    /// Hospitals, clinics, pharmacies, and practitioners.
    Healthcare,
    /// Actual transit points: stations, stops, terminals.
    Transit,
    /// Cinemas, museums, parks, gyms, nightlife.
    Entertainment,
    /// Banks, salons, offices — and the fallback bucket.
    Services,
}

impl PoiCategory {
    /// Returns all eight categories in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Restaurants,
            Self::Retail,
            Self::Fuel,
            Self::Schools,
            Self::Healthcare,
            Self::Transit,
            Self::Entertainment,
            Self::Services,
        ]
    }

    /// Human-readable label (`Restaurants`, not the lowercase wire key).
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Restaurants => "Restaurants",
            Self::Retail => "Retail",
            Self::Fuel => "Fuel",
            Self::Schools => "Schools",
            Self::Healthcare => "Healthcare",
            Self::Transit => "Transit",
            Self::Entertainment => "Entertainment",
            Self::Services => "Services",
        }
    }
}

/// A category entry exactly as the places provider tagged it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategory {
    /// Provider taxonomy code (e.g. `"100-1000-0001"`).
    pub id: String,
    /// Provider display name (e.g. `"Restaurant"`).
    pub name: String,
}

impl RawCategory {
    /// Convenience constructor used heavily in tests.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A raw point of interest as fetched from the places provider, before
/// classification and distance enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Display title of the place.
    pub title: String,
    /// Location of the place.
    pub position: Coordinate,
    /// Formatted address, when the provider supplied one.
    pub address: Option<String>,
    /// Provider taxonomy entries; may be empty.
    pub categories: Vec<RawCategory>,
}

/// A classified point of interest with distance from the analysis origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    /// Display name, possibly enriched with a subtype suffix or mode
    /// prefix.
    pub name: String,
    /// Formatted address.
    pub address: String,
    /// Human-formatted distance, one decimal, kilometers (`"1.2 km"`).
    pub distance: String,
    /// Distance from the analysis origin in meters; the sort key.
    pub distance_meters: f64,
    /// The provider taxonomy entries, preserved for drill-down views.
    pub categories: Vec<RawCategory>,
    /// Location of the place.
    pub position: Coordinate,
}

impl Poi {
    /// Builds a POI, deriving the display `distance` string from
    /// `distance_meters` so the two can never disagree.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        distance_meters: f64,
        categories: Vec<RawCategory>,
        position: Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            distance: format_distance(distance_meters),
            distance_meters,
            categories,
            position,
        }
    }
}

/// Formats a distance in meters as kilometers with one decimal place.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// All nearby places, partitioned into the eight fixed buckets.
///
/// Every bucket is always present; an upstream failure or an empty
/// neighborhood both surface as empty vectors, never as missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiCollection {
    /// Food service.
    pub restaurants: Vec<Poi>,
    /// Shops and markets.
    pub retail: Vec<Poi>,
    /// Gas and charging stations.
    pub fuel: Vec<Poi>,
    /// Education.
    pub schools: Vec<Poi>,
    /// Medical.
    pub healthcare: Vec<Poi>,
    /// Transit points.
    pub transit: Vec<Poi>,
    /// Leisure and culture.
    pub entertainment: Vec<Poi>,
    /// Everything else.
    pub services: Vec<Poi>,
}

impl PoiCollection {
    /// An empty collection with all eight buckets present.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            restaurants: Vec::new(),
            retail: Vec::new(),
            fuel: Vec::new(),
            schools: Vec::new(),
            healthcare: Vec::new(),
            transit: Vec::new(),
            entertainment: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Read access to one bucket.
    #[must_use]
    pub fn bucket(&self, category: PoiCategory) -> &[Poi] {
        match category {
            PoiCategory::Restaurants => &self.restaurants,
            PoiCategory::Retail => &self.retail,
            PoiCategory::Fuel => &self.fuel,
            PoiCategory::Schools => &self.schools,
            PoiCategory::Healthcare => &self.healthcare,
            PoiCategory::Transit => &self.transit,
            PoiCategory::Entertainment => &self.entertainment,
            PoiCategory::Services => &self.services,
        }
    }

    /// Mutable access to one bucket.
    pub const fn bucket_mut(&mut self, category: PoiCategory) -> &mut Vec<Poi> {
        match category {
            PoiCategory::Restaurants => &mut self.restaurants,
            PoiCategory::Retail => &mut self.retail,
            PoiCategory::Fuel => &mut self.fuel,
            PoiCategory::Schools => &mut self.schools,
            PoiCategory::Healthcare => &mut self.healthcare,
            PoiCategory::Transit => &mut self.transit,
            PoiCategory::Entertainment => &mut self.entertainment,
            PoiCategory::Services => &mut self.services,
        }
    }

    /// Appends a POI to its bucket.
    pub fn push(&mut self, category: PoiCategory, poi: Poi) {
        self.bucket_mut(category).push(poi);
    }

    /// Sorts every bucket ascending by `distance_meters`.
    pub fn sort_by_distance(&mut self) {
        for category in PoiCategory::all() {
            self.bucket_mut(*category)
                .sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        }
    }

    /// Total POI count across all buckets.
    #[must_use]
    pub fn total_len(&self) -> usize {
        PoiCategory::all()
            .iter()
            .map(|c| self.bucket(*c).len())
            .sum()
    }

    /// Whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Iterates buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PoiCategory, &[Poi])> {
        PoiCategory::all().iter().map(|c| (*c, self.bucket(*c)))
    }
}
