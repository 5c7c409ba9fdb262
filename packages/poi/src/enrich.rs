//! Display-label enrichment.
//!
//! Classification decides the bucket; this stage decides whether the title
//! needs help. "Main St Clinic" already says what it is, but "Jane Doe, MD"
//! sorted into healthcare tells a reader nothing, so a subtype suffix is
//! synthesized from the category data. Transit points get a mode prefix
//! instead so lists read "Train - Central Station".

use sitescope_poi_models::{PlaceRecord, PoiCategory};

/// Returns the display name for a classified place, decorated when the
/// title alone does not reveal the bucket.
#[must_use]
pub fn enrich_title(record: &PlaceRecord, category: PoiCategory) -> String {
    match category {
        PoiCategory::Schools => school_label(record),
        PoiCategory::Healthcare => healthcare_label(record),
        PoiCategory::Restaurants => restaurant_label(record),
        PoiCategory::Transit => transit_label(record),
        _ => record.title.clone(),
    }
}

fn school_label(record: &PlaceRecord) -> String {
    let title = record.title.to_lowercase();
    if contains_any(
        &title,
        &["school", "college", "university", "academy", "kindergarten"],
    ) {
        return record.title.clone();
    }
    format!("{} (School)", record.title)
}

fn healthcare_label(record: &PlaceRecord) -> String {
    let title = record.title.to_lowercase();
    if contains_any(
        &title,
        &[
            "hospital", "clinic", "pharmacy", "medical", "doctor", "dentist", "dental", "health",
        ],
    ) {
        return record.title.clone();
    }

    let haystack = category_haystack(record);
    let subtype = if contains_any(&haystack, &["pharmacy", "drugstore"]) {
        "Pharmacy"
    } else if contains_any(&haystack, &["dentist", "dental"]) {
        "Dental Clinic"
    } else if contains_any(&haystack, &["doctor", "physician"]) {
        "Doctor's Office"
    } else if haystack.contains("hospital") {
        "Hospital"
    } else {
        "Medical Facility"
    };
    format!("{} ({subtype})", record.title)
}

fn restaurant_label(record: &PlaceRecord) -> String {
    let title = record.title.to_lowercase();
    if contains_any(
        &title,
        &[
            "restaurant",
            "café",
            "cafe",
            "coffee",
            "bar",
            "pub",
            "bakery",
            "diner",
            "pizzeria",
            "grill",
            "bistro",
            "kitchen",
            "eatery",
        ],
    ) {
        return record.title.clone();
    }

    let haystack = category_haystack(record);
    let subtype = if contains_any(&haystack, &["café", "cafe", "coffee"]) {
        "Café"
    } else if haystack.contains("fast food") {
        "Fast Food"
    } else if haystack.contains("bakery") {
        "Bakery"
    } else if contains_any(&haystack, &["bar", "pub"]) {
        "Bar"
    } else {
        "Restaurant"
    };
    format!("{} ({subtype})", record.title)
}

fn transit_label(record: &PlaceRecord) -> String {
    let title = record.title.to_lowercase();
    if contains_any(
        &title,
        &[
            "train", "railway", "rail", "bus", "metro", "subway", "tram", "ferry", "transit",
        ],
    ) {
        return record.title.clone();
    }

    let haystack = format!("{} {title}", category_haystack(record));
    // Specific modes before "rail": "light rail" is a tram, not a train.
    let mode = if contains_any(&haystack, &["metro", "subway", "underground"]) {
        "Metro"
    } else if contains_any(&haystack, &["tram", "streetcar", "light rail"]) {
        "Tram"
    } else if haystack.contains("ferry") {
        "Ferry"
    } else if haystack.contains("bus") {
        "Bus"
    } else if contains_any(&haystack, &["train", "rail"]) {
        "Train"
    } else {
        "Transit"
    };
    format!("{mode} - {}", record.title)
}

/// All category names joined into one lowercase haystack.
fn category_haystack(record: &PlaceRecord) -> String {
    record
        .categories
        .iter()
        .map(|category| category.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
