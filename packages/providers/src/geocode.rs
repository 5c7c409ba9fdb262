//! Forward geocoding client.
//!
//! Resolves a free-form street address to WGS84 coordinates plus the
//! canonical address components the service matched.  The wire format
//! is the HERE Geocoding & Search `/geocode` response: an `items`
//! array whose entries carry `position.{lat,lng}` and an `address`
//! object with `label`, `city`, `stateCode`, `postalCode`, and
//! `countryCode`.
//!
//! See <https://www.here.com/docs/bundle/geocoding-and-search-api-v7-api-reference>

use serde::{Deserialize, Serialize};
use sitescope_geo::Coordinate;

use crate::{ProviderError, registry::ServiceConfig};

/// A geocoding result with coordinates and matched address components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodedLocation {
    /// Resolved coordinates (WGS84).
    pub coordinates: Coordinate,
    /// The canonical address the service matched.
    pub formatted_address: String,
    /// City name, when the service reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province code (e.g., `"NY"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166 country code (e.g., `"USA"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Geocodes a single free-form address.
///
/// Returns `Ok(None)` when the service answers successfully but has no
/// match for the query; the caller decides whether that is an error.
///
/// # Errors
///
/// Returns [`ProviderError`] if credentials are missing, the HTTP
/// request fails, the service answers with a non-success status, or
/// the response cannot be parsed.
pub async fn resolve(
    client: &reqwest::Client,
    cfg: &ServiceConfig,
    address: &str,
) -> Result<Option<GeocodedLocation>, ProviderError> {
    let api_key = cfg.api_key()?;
    let url = format!("{}/geocode", cfg.base_url);

    let resp = client
        .get(&url)
        .query(&[("q", address), ("apiKey", api_key.as_str())])
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

/// Checks whether the geocoder is reachable and the key is accepted.
///
/// Issues a single known-good query and returns `true` if the service
/// answers with a successful status within 5 seconds.  Failures are
/// logged at `warn` so `check` commands can explain themselves.
pub async fn is_available(client: &reqwest::Client, cfg: &ServiceConfig) -> bool {
    let api_key = match cfg.api_key() {
        Ok(key) => key,
        Err(e) => {
            log::warn!("{}: {e}", cfg.name);
            return false;
        }
    };

    let url = format!("{}/geocode", cfg.base_url);
    let result = client
        .get(&url)
        .query(&[
            ("q", "200 S Mathilda Ave, Sunnyvale, CA"),
            ("apiKey", api_key.as_str()),
        ])
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => true,
        Ok(resp) => {
            log::warn!("{}: returned status {}", cfg.name, resp.status());
            false
        }
        Err(e) => {
            log::warn!("{}: unreachable: {e}", cfg.name);
            false
        }
    }
}

/// Parses a `/geocode` response body.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedLocation>, ProviderError> {
    let items = body
        .get("items")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ProviderError::Parse {
            message: "geocode response missing 'items' array".to_string(),
        })?;

    let Some(first) = items.first() else {
        return Ok(None);
    };

    let lat = first
        .pointer("/position/lat")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| ProviderError::Parse {
            message: "item missing position.lat".to_string(),
        })?;
    let lng = first
        .pointer("/position/lng")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| ProviderError::Parse {
            message: "item missing position.lng".to_string(),
        })?;

    let coordinates = Coordinate { lat, lng };
    if !coordinates.is_valid() {
        return Err(ProviderError::Parse {
            message: format!("coordinates out of range: {lat},{lng}"),
        });
    }

    // Prefer the canonical address label; fall back to the item title
    // for landmark-style matches that carry no postal label.
    let formatted_address = first
        .pointer("/address/label")
        .and_then(serde_json::Value::as_str)
        .or_else(|| first.get("title").and_then(serde_json::Value::as_str))
        .unwrap_or_default()
        .to_string();

    Ok(Some(GeocodedLocation {
        coordinates,
        formatted_address,
        city: string_field(first, "/address/city"),
        state: string_field(first, "/address/stateCode"),
        postal_code: string_field(first, "/address/postalCode"),
        country_code: string_field(first, "/address/countryCode"),
    }))
}

fn string_field(item: &serde_json::Value, pointer: &str) -> Option<String> {
    item.pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(String::from)
}
