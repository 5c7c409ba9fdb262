//! Place discovery client.
//!
//! Queries the `/browse` endpoint for points of interest around a
//! coordinate and returns them as flat [`PlaceRecord`]s — raw titles,
//! positions, and provider category assignments.  Classification into
//! sitescope's own buckets happens downstream in the POI package.

use sitescope_geo::Coordinate;
use sitescope_poi_models::{PlaceRecord, RawCategory};

use crate::{ProviderError, registry::ServiceConfig};

/// Fetches places around `center`, nearest first, up to `limit`.
///
/// # Errors
///
/// Returns [`ProviderError`] if credentials are missing, the HTTP
/// request fails, the service answers with a non-success status, or
/// the response cannot be parsed.
pub async fn browse(
    client: &reqwest::Client,
    cfg: &ServiceConfig,
    center: Coordinate,
    limit: usize,
) -> Result<Vec<PlaceRecord>, ProviderError> {
    let api_key = cfg.api_key()?;
    let url = format!("{}/browse", cfg.base_url);
    let at_param = format!("{},{}", center.lat, center.lng);
    let limit_param = limit.to_string();

    let resp = client
        .get(&url)
        .query(&[
            ("at", at_param.as_str()),
            ("limit", limit_param.as_str()),
            ("apiKey", api_key.as_str()),
        ])
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(ProviderError::Status {
            status: resp.status().as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a `/browse` response body into place records.
///
/// Entries without a title or position are skipped rather than failing
/// the whole page; the service occasionally returns administrative
/// areas that carry neither.
fn parse_response(body: &serde_json::Value) -> Result<Vec<PlaceRecord>, ProviderError> {
    let items = body
        .get("items")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ProviderError::Parse {
            message: "browse response missing 'items' array".to_string(),
        })?;

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let Some(title) = item.get("title").and_then(serde_json::Value::as_str) else {
            continue;
        };
        let (Some(lat), Some(lng)) = (
            item.pointer("/position/lat")
                .and_then(serde_json::Value::as_f64),
            item.pointer("/position/lng")
                .and_then(serde_json::Value::as_f64),
        ) else {
            continue;
        };

        let address = item
            .pointer("/address/label")
            .and_then(serde_json::Value::as_str)
            .map(String::from);

        let categories = item
            .get("categories")
            .and_then(serde_json::Value::as_array)
            .map(|cats| {
                cats.iter()
                    .filter_map(|cat| {
                        let id = cat.get("id").and_then(serde_json::Value::as_str)?;
                        let name = cat
                            .get("name")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or_default();
                        Some(RawCategory::new(id, name))
                    })
                    .collect()
            })
            .unwrap_or_default();

        records.push(PlaceRecord {
            title: title.to_string(),
            position: Coordinate { lat, lng },
            address,
            categories,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browse_items() {
        let body = serde_json::json!({
            "items": [
                {
                    "title": "Joe's Diner",
                    "position": { "lat": 40.7130, "lng": -74.0055 },
                    "address": { "label": "12 Main St, New York, NY 10001" },
                    "categories": [
                        { "id": "100-1000-0001", "name": "Casual Dining" }
                    ]
                },
                {
                    "title": "Central Station",
                    "position": { "lat": 40.7145, "lng": -74.0030 },
                    "categories": [
                        { "id": "400-4100-0035", "name": "Train Station" }
                    ]
                }
            ]
        });
        let records = parse_response(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Joe's Diner");
        assert_eq!(
            records[0].address.as_deref(),
            Some("12 Main St, New York, NY 10001")
        );
        assert_eq!(records[0].categories[0].id, "100-1000-0001");
        assert_eq!(records[1].title, "Central Station");
        assert!(records[1].address.is_none());
    }

    #[test]
    fn skips_items_without_title_or_position() {
        let body = serde_json::json!({
            "items": [
                { "position": { "lat": 40.0, "lng": -74.0 } },
                { "title": "No Position Here" },
                {
                    "title": "Kept",
                    "position": { "lat": 40.0, "lng": -74.0 }
                }
            ]
        });
        let records = parse_response(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn empty_items_is_empty_vec() {
        let body = serde_json::json!({ "items": [] });
        assert!(parse_response(&body).unwrap().is_empty());
    }

    #[test]
    fn missing_items_is_parse_error() {
        let body = serde_json::json!({ "status": 401 });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn item_without_categories_gets_empty_list() {
        let body = serde_json::json!({
            "items": [{
                "title": "Mystery Spot",
                "position": { "lat": 36.0, "lng": -122.0 }
            }]
        });
        let records = parse_response(&body).unwrap();
        assert!(records[0].categories.is_empty());
    }

    #[test]
    fn category_without_name_defaults_to_empty() {
        let body = serde_json::json!({
            "items": [{
                "title": "Unnamed Category Place",
                "position": { "lat": 36.0, "lng": -122.0 },
                "categories": [{ "id": "600-6100-0062" }]
            }]
        });
        let records = parse_response(&body).unwrap();
        assert_eq!(records[0].categories[0].id, "600-6100-0062");
        assert!(records[0].categories[0].name.is_empty());
    }
}
