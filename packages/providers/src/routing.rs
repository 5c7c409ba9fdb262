//! Car routing client with live traffic travel summaries.
//!
//! Requests a single car route between two coordinates with
//! `departureTime=now`, so the returned `duration` reflects current
//! traffic while `baseDuration` is the free-flow time.  The spread
//! between the two is what the traffic estimator turns into a
//! congestion delay.
//!
//! Probe routes are short and fired in parallel, so each request gets
//! its own 10 second timeout instead of relying on the client default.
//!
//! See <https://www.here.com/docs/bundle/routing-api-v8-api-reference>

use sitescope_geo::Coordinate;

use crate::{ProviderError, registry::ServiceConfig};

/// One section of a returned route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSection {
    /// Section length in meters.
    pub length_meters: f64,
    /// Free-flow travel time in seconds.
    pub base_duration_seconds: f64,
    /// Travel time in seconds under current traffic.
    pub duration_seconds: f64,
}

/// A parsed route: the first route of the response, all sections.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Route sections in travel order.
    pub sections: Vec<RouteSection>,
}

impl RouteSummary {
    /// Total route length in meters.
    #[must_use]
    pub fn total_length_meters(&self) -> f64 {
        self.sections.iter().map(|s| s.length_meters).sum()
    }

    /// Total free-flow travel time in seconds.
    #[must_use]
    pub fn base_time_seconds(&self) -> f64 {
        self.sections.iter().map(|s| s.base_duration_seconds).sum()
    }

    /// Total travel time in seconds under current traffic.
    #[must_use]
    pub fn traffic_time_seconds(&self) -> f64 {
        self.sections.iter().map(|s| s.duration_seconds).sum()
    }
}

/// Fetches a car route between two points under current traffic.
///
/// # Errors
///
/// Returns [`ProviderError`] if credentials are missing, the HTTP
/// request fails or times out, the service answers with a non-success
/// status, or no route exists between the points.
pub async fn route(
    client: &reqwest::Client,
    cfg: &ServiceConfig,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<RouteSummary, ProviderError> {
    let api_key = cfg.api_key()?;
    let url = format!("{}/routes", cfg.base_url);
    let origin_param = format!("{},{}", origin.lat, origin.lng);
    let destination_param = format!("{},{}", destination.lat, destination.lng);

    let resp = client
        .get(&url)
        .query(&[
            ("transportMode", "car"),
            ("origin", origin_param.as_str()),
            ("destination", destination_param.as_str()),
            ("return", "summary,travelSummary"),
            ("departureTime", "now"),
            ("apiKey", api_key.as_str()),
        ])
        .timeout(std::time::Duration::from_secs(10))
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

/// Parses a `/routes` response body into the first route's sections.
fn parse_response(body: &serde_json::Value) -> Result<RouteSummary, ProviderError> {
    let routes = body
        .get("routes")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ProviderError::Parse {
            message: "route response missing 'routes' array".to_string(),
        })?;

    let Some(first) = routes.first() else {
        return Err(ProviderError::Parse {
            message: "no route found between these points".to_string(),
        });
    };

    let sections = first
        .get("sections")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ProviderError::Parse {
            message: "route missing 'sections' array".to_string(),
        })?;

    if sections.is_empty() {
        return Err(ProviderError::Parse {
            message: "route has no sections".to_string(),
        });
    }

    let mut parsed = Vec::with_capacity(sections.len());
    for section in sections {
        let summary = section
            .get("summary")
            .ok_or_else(|| ProviderError::Parse {
                message: "section missing 'summary'".to_string(),
            })?;
        let length_meters = summary
            .get("length")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| ProviderError::Parse {
                message: "section summary missing 'length'".to_string(),
            })?;
        let duration_seconds = summary
            .get("duration")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| ProviderError::Parse {
                message: "section summary missing 'duration'".to_string(),
            })?;
        // baseDuration is only present when the plan includes traffic;
        // without it the free-flow time equals the travel time.
        let base_duration_seconds = summary
            .get("baseDuration")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(duration_seconds);

        parsed.push(RouteSection {
            length_meters,
            base_duration_seconds,
            duration_seconds,
        });
    }

    Ok(RouteSummary { sections: parsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_section_route() {
        let body = serde_json::json!({
            "routes": [{
                "id": "route-0",
                "sections": [
                    {
                        "type": "vehicle",
                        "summary": { "length": 3200, "duration": 420, "baseDuration": 360 }
                    },
                    {
                        "type": "vehicle",
                        "summary": { "length": 7800, "duration": 540, "baseDuration": 510 }
                    }
                ]
            }]
        });
        let summary = parse_response(&body).unwrap();
        assert_eq!(summary.sections.len(), 2);
        assert!((summary.total_length_meters() - 11_000.0).abs() < f64::EPSILON);
        assert!((summary.base_time_seconds() - 870.0).abs() < f64::EPSILON);
        assert!((summary.traffic_time_seconds() - 960.0).abs() < f64::EPSILON);
    }

    #[test]
    fn base_duration_falls_back_to_duration() {
        let body = serde_json::json!({
            "routes": [{
                "sections": [
                    { "summary": { "length": 1500, "duration": 240 } }
                ]
            }]
        });
        let summary = parse_response(&body).unwrap();
        assert!((summary.base_time_seconds() - 240.0).abs() < f64::EPSILON);
        assert!((summary.traffic_time_seconds() - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_routes_is_parse_error() {
        let body = serde_json::json!({ "routes": [] });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn missing_routes_is_parse_error() {
        let body = serde_json::json!({ "notices": [{ "title": "error" }] });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn route_without_sections_is_parse_error() {
        let body = serde_json::json!({ "routes": [{ "sections": [] }] });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn section_without_length_is_parse_error() {
        let body = serde_json::json!({
            "routes": [{ "sections": [{ "summary": { "duration": 240 } }] }]
        });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }
}
