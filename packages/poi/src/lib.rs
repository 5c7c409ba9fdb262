#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearby-business aggregation.
//!
//! Takes the flat place list from the browse provider and turns it into a
//! [`PoiCollection`]: classify each record into one of the eight buckets
//! ([`classify`]), synthesize a display label where the title needs help
//! ([`enrich`]), attach the haversine distance from the analysis origin,
//! and sort every bucket nearest-first.
//!
//! A failed fetch is not an error here.  Renderers must not tell "the
//! lookup broke" apart from "nothing is nearby", so upstream failures
//! log a warning and come back as an all-empty collection.

pub mod classify;
pub mod enrich;

use sitescope_geo::{Coordinate, distance_meters};
use sitescope_poi_models::{PlaceRecord, Poi, PoiCollection};
use sitescope_providers::{places, registry};

/// Default number of places requested from the browse provider.
pub const DEFAULT_LIMIT: usize = 100;

/// Fetches, classifies, and buckets the businesses around `center`.
///
/// Never fails: provider errors surface as an empty collection with a
/// logged warning.
pub async fn nearby_businesses(
    client: &reqwest::Client,
    center: Coordinate,
    limit: usize,
) -> PoiCollection {
    let config = registry::places_service();
    match places::browse(client, &config, center, limit).await {
        Ok(records) => collect_places(records, center),
        Err(e) => {
            log::warn!("Nearby business lookup failed, returning empty collection: {e}");
            PoiCollection::empty()
        }
    }
}

/// Pure aggregation step: classification, enrichment, distances, sorting.
///
/// Partition property: every input record lands in exactly one bucket.
#[must_use]
pub fn collect_places(records: Vec<PlaceRecord>, origin: Coordinate) -> PoiCollection {
    let mut collection = PoiCollection::empty();

    for record in records {
        let category = classify::classify(&record);
        let name = enrich::enrich_title(&record, category);
        let meters = distance_meters(origin, record.position);

        let PlaceRecord {
            title,
            position,
            address,
            categories,
        } = record;
        // The provider omits addresses for some administrative entries;
        // fall back to the title so the field is never blank.
        let address = address.unwrap_or(title);

        collection.push(category, Poi::new(name, address, meters, categories, position));
    }

    collection.sort_by_distance();
    collection
}
