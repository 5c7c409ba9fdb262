//! Business classification cascade.
//!
//! Assigns every [`PlaceRecord`] to exactly one [`PoiCategory`] through an
//! ordered chain of independent rules: provider category codes first, then
//! category-name keywords, then a title-only scan for records with no
//! category data at all. Transit needs an extra disambiguation step because
//! transit-adjacent codes cover entire station complexes — the café inside
//! a train station arrives with the same code as the platforms.

use sitescope_poi_models::{PlaceRecord, PoiCategory};

/// Words that mark an actual boarding point rather than something merely
/// near one.
const TRANSIT_POINT_WORDS: &[&str] = &[
    "station",
    "stop",
    "terminal",
    "platform",
    "depot",
    "interchange",
];

/// Classifies a place into its bucket. Total: every record lands somewhere,
/// with `Services` as the final fallback.
#[must_use]
pub fn classify(record: &PlaceRecord) -> PoiCategory {
    let candidate = match_category_code(record)
        .or_else(|| match_category_keywords(record))
        .or_else(|| match_title_keywords(&record.title));

    match candidate {
        Some(PoiCategory::Transit) => resolve_transit(record),
        Some(category) => category,
        None => PoiCategory::Services,
    }
}

/// Checks provider category codes against fixed prefix rules, first code
/// that matches anything wins.
fn match_category_code(record: &PlaceRecord) -> Option<PoiCategory> {
    for category in &record.categories {
        let id = category.id.as_str();

        // Narrow rules before the generic prefixes they overlap with.
        if id.starts_with("800-81") {
            return Some(PoiCategory::Schools);
        }
        if id == "700-7600-0116" {
            return Some(PoiCategory::Fuel);
        }
        if id.starts_with("600") {
            return Some(PoiCategory::Transit);
        }
        if id.starts_with("100") {
            return Some(PoiCategory::Restaurants);
        }
        if id.starts_with("200") {
            return Some(PoiCategory::Retail);
        }
        if id.starts_with("300") || id.starts_with("400") {
            return Some(PoiCategory::Entertainment);
        }
        if id.starts_with("700") {
            return Some(PoiCategory::Services);
        }
        if id.starts_with("800") {
            return Some(PoiCategory::Healthcare);
        }
    }
    None
}

/// Scans the provider category *names* for bucket keywords.
fn match_category_keywords(record: &PlaceRecord) -> Option<PoiCategory> {
    if record.categories.is_empty() {
        return None;
    }
    let haystack = record
        .categories
        .iter()
        .map(|category| category.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    match_keywords(&haystack)
}

/// Title-only fallback for records with no usable category data.
fn match_title_keywords(title: &str) -> Option<PoiCategory> {
    match_keywords(&title.to_lowercase())
}

/// Keyword tables per bucket, tried in priority order. Fuel comes before
/// transit so "Gas Station" never reads as a boarding point, and food
/// before retail so "Coffee Shop" lands with the cafés.
fn match_keywords(haystack: &str) -> Option<PoiCategory> {
    if contains_any(
        haystack,
        &["gas station", "petrol", "fuel", "charging station"],
    ) {
        return Some(PoiCategory::Fuel);
    }
    if contains_any(
        haystack,
        &[
            "train station",
            "railway station",
            "rail station",
            "bus station",
            "bus stop",
            "metro",
            "subway",
            "tram",
            "ferry",
            "commuter rail",
            "transit",
        ],
    ) {
        return Some(PoiCategory::Transit);
    }
    if contains_any(
        haystack,
        &[
            "school",
            "college",
            "university",
            "kindergarten",
            "academy",
            "education",
        ],
    ) {
        return Some(PoiCategory::Schools);
    }
    if contains_any(
        haystack,
        &[
            "hospital",
            "clinic",
            "pharmacy",
            "doctor",
            "dentist",
            "dental",
            "medical",
            "physician",
        ],
    ) {
        return Some(PoiCategory::Healthcare);
    }
    if contains_any(
        haystack,
        &[
            "restaurant",
            "café",
            "cafe",
            "coffee",
            "pub",
            "bakery",
            "fast food",
            "diner",
            "pizzeria",
            "bistro",
            "snack",
            "food court",
            "seafood",
        ],
    ) {
        return Some(PoiCategory::Restaurants);
    }
    if contains_any(
        haystack,
        &[
            "shop",
            "store",
            "mall",
            "market",
            "supermarket",
            "boutique",
            "grocery",
            "retail",
            "convenience",
        ],
    ) {
        return Some(PoiCategory::Retail);
    }
    if contains_any(
        haystack,
        &[
            "cinema",
            "movie theater",
            "theatre",
            "theater",
            "museum",
            "park",
            "gym",
            "fitness",
            "nightclub",
            "club",
            "gallery",
            "bowling",
            "casino",
            "stadium",
            "zoo",
            "arcade",
            "recreation",
            "entertainment",
        ],
    ) {
        return Some(PoiCategory::Entertainment);
    }
    if contains_any(
        haystack,
        &[
            "bank",
            "atm",
            "salon",
            "barber",
            "laundry",
            "post office",
            "police",
            "library",
            "repair",
            "insurance",
            "real estate",
            "agency",
            "office",
            "service",
        ],
    ) {
        return Some(PoiCategory::Services);
    }
    None
}

/// Keeps a transit candidate only when the record names an actual boarding
/// point; everything else gets re-read from its own title.
fn resolve_transit(record: &PlaceRecord) -> PoiCategory {
    if names_transit_point(record) {
        return PoiCategory::Transit;
    }
    // A transit hit from the rescan would just repeat the generic match
    // that made this record a candidate in the first place.
    match match_title_keywords(&record.title) {
        Some(PoiCategory::Transit) | None => PoiCategory::Services,
        Some(other) => other,
    }
}

fn names_transit_point(record: &PlaceRecord) -> bool {
    let title = record.title.to_lowercase();
    if contains_any(&title, TRANSIT_POINT_WORDS) {
        return true;
    }
    record.categories.iter().any(|category| {
        let name = category.name.to_lowercase();
        contains_any(&name, TRANSIT_POINT_WORDS)
    })
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use sitescope_geo::Coordinate;
    use sitescope_poi_models::RawCategory;

    use super::*;

    fn record(title: &str, categories: Vec<RawCategory>) -> PlaceRecord {
        PlaceRecord {
            title: title.to_string(),
            position: Coordinate::new(43.65, -79.38),
            address: None,
            categories,
        }
    }

    #[test]
    fn code_prefixes_map_to_buckets() {
        let cases = [
            ("800-8100-0001", PoiCategory::Schools),
            ("800-8000-0159", PoiCategory::Healthcare),
            ("700-7600-0116", PoiCategory::Fuel),
            ("700-7400-0133", PoiCategory::Services),
            ("100-1000-0001", PoiCategory::Restaurants),
            ("200-2100-0019", PoiCategory::Retail),
            ("300-3100-0025", PoiCategory::Entertainment),
            ("400-4300-0200", PoiCategory::Entertainment),
        ];
        for (code, expected) in cases {
            let place = record("Anywhere", vec![RawCategory::new(code, "")]);
            assert_eq!(classify(&place), expected, "code {code}");
        }
    }

    #[test]
    fn school_code_beats_generic_healthcare_prefix() {
        let place = record(
            "Lakeside Elementary",
            vec![RawCategory::new("800-8100-0038", "Elementary School")],
        );
        assert_eq!(classify(&place), PoiCategory::Schools);
    }

    #[test]
    fn gas_station_code_beats_generic_services_prefix() {
        let place = record(
            "Shell",
            vec![RawCategory::new("700-7600-0116", "Fueling Station")],
        );
        assert_eq!(classify(&place), PoiCategory::Fuel);
    }

    #[test]
    fn generic_service_code_without_keywords_is_services() {
        let place = record("Unit 7", vec![RawCategory::new("700-1234", "")]);
        assert_eq!(classify(&place), PoiCategory::Services);
    }

    #[test]
    fn category_name_keywords_fill_in_for_unknown_codes() {
        let place = record(
            "St. Mary's",
            vec![RawCategory::new("999-0000-0000", "Hospital or Health Care Facility")],
        );
        assert_eq!(classify(&place), PoiCategory::Healthcare);
    }

    #[test]
    fn gas_station_name_never_reads_as_transit() {
        let place = record(
            "Esso",
            vec![RawCategory::new("999-0000-0000", "Gas Station")],
        );
        assert_eq!(classify(&place), PoiCategory::Fuel);
    }

    #[test]
    fn station_stays_transit() {
        let place = record(
            "Central Station",
            vec![RawCategory::new("600-6100-0062", "Train Station")],
        );
        assert_eq!(classify(&place), PoiCategory::Transit);
    }

    #[test]
    fn transit_candidate_without_point_word_is_reclassified_by_title() {
        let place = record(
            "Corner Coffee House",
            vec![RawCategory::new("600-6300-0064", "Shopping")],
        );
        assert_eq!(classify(&place), PoiCategory::Restaurants);
    }

    #[test]
    fn transit_candidate_with_unhelpful_title_falls_back_to_services() {
        let place = record(
            "Meridian Plaza",
            vec![RawCategory::new("600-6900-0000", "Commercial")],
        );
        assert_eq!(classify(&place), PoiCategory::Services);
    }

    #[test]
    fn title_only_fallback_scans_the_name() {
        let place = record("Luigi's Pizzeria", vec![]);
        assert_eq!(classify(&place), PoiCategory::Restaurants);

        let place = record("Westside Barber", vec![]);
        assert_eq!(classify(&place), PoiCategory::Services);
    }

    #[test]
    fn nothing_matches_defaults_to_services() {
        let place = record("Zyx Holdings", vec![]);
        assert_eq!(classify(&place), PoiCategory::Services);
    }

    #[test]
    fn empty_category_names_do_not_match_keywords() {
        // A lone unknown code with an empty name must fall through to the
        // title scan, not match the empty haystack.
        let place = record("Harbor Gym", vec![RawCategory::new("999-0000-0000", "")]);
        assert_eq!(classify(&place), PoiCategory::Entertainment);
    }
}
