//! Live-routing traffic variant.
//!
//! Fires short car-route probes between opposing points around the
//! target (north-south, east-west, and one diagonal pair) and reads
//! congestion off the spread between free-flow and live travel times.
//! Probes fail independently; one success is enough for an estimate.
//! Only when every probe fails does this module give up, and the
//! estimator composition falls back to the offline heuristic.
//!
//! The volume model maps observed road character (highway / arterial /
//! local) to a daily base bracket, then applies the same time-of-day
//! multiplier as the heuristic and a delay multiplier capped at 1.5x.

use sitescope_geo::{Coordinate, offset_point};
use sitescope_providers::{
    ProviderError,
    registry::ServiceConfig,
    routing::{self, RouteSummary},
};
use sitescope_traffic_models::{
    AreaType, FootTrafficLevel, Moment, TrafficCondition, TrafficDetails, TrafficReport,
};

use crate::{TrafficError, heuristic, urban_centers};

/// Distance from the target to each cardinal probe point.
const PROBE_RADIUS_KM: f64 = 1.0;

/// Diagonal probes sit at 0.7 of the radius on each axis.
const DIAGONAL_FACTOR: f64 = 0.7;

/// Sections shorter than this with long durations indicate city streets.
const URBAN_SECTION_MAX_METERS: f64 = 5000.0;

/// Duration/length ratio below which a long section reads as highway.
const HIGHWAY_PACE_SECONDS_PER_METER: f64 = 0.1;

/// A successful probe route with its congestion delay.
#[derive(Debug, Clone, PartialEq)]
struct RouteTraffic {
    summary: RouteSummary,
    delay_seconds: f64,
}

/// Aggregate view over the successful probes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProbeSummary {
    avg_delay_seconds: f64,
    avg_distance_meters: f64,
    has_highway: bool,
    has_arterial: bool,
}

/// Estimates traffic by probing live routes around `coordinate`.
///
/// # Errors
///
/// Returns [`TrafficError::AllProbesFailed`] when not a single probe
/// route succeeded; the caller is expected to fall back to the
/// heuristic model.
pub async fn estimate(
    client: &reqwest::Client,
    cfg: &ServiceConfig,
    coordinate: Coordinate,
    moment: Moment,
) -> Result<TrafficReport, TrafficError> {
    let [(north, south), (east, west), (north_east, south_west)] = probe_pairs(coordinate);

    let (ns, ew, diagonal) = futures::join!(
        routing::route(client, cfg, north, south),
        routing::route(client, cfg, east, west),
        routing::route(client, cfg, north_east, south_west),
    );

    let mut probes = Vec::with_capacity(3);
    let mut last_error: Option<ProviderError> = None;
    for result in [ns, ew, diagonal] {
        match result {
            Ok(summary) => probes.push(route_traffic(summary, moment.hour)),
            Err(e) => {
                log::warn!("Traffic probe failed: {e}");
                last_error = Some(e);
            }
        }
    }

    let Some(stats) = summarize_probes(&probes) else {
        return Err(TrafficError::AllProbesFailed(last_error.unwrap_or_else(
            || ProviderError::Parse {
                message: "no probes attempted".to_string(),
            },
        )));
    };

    Ok(build_report(coordinate, moment, &stats))
}

/// The three opposing probe pairs around a center point.
fn probe_pairs(center: Coordinate) -> [(Coordinate, Coordinate); 3] {
    let north = offset_point(center, PROBE_RADIUS_KM, 0.0);
    let south = offset_point(center, -PROBE_RADIUS_KM, 0.0);
    let east = offset_point(center, 0.0, PROBE_RADIUS_KM);
    let west = offset_point(center, 0.0, -PROBE_RADIUS_KM);

    let diagonal = PROBE_RADIUS_KM * DIAGONAL_FACTOR;
    let north_east = offset_point(center, diagonal, diagonal);
    let south_west = offset_point(center, -diagonal, -diagonal);

    [(north, south), (east, west), (north_east, south_west)]
}

/// Annotates a route with its congestion delay.
///
/// Preference order: the measured spread between live and free-flow
/// travel time; when the service reports no spread (common outside
/// metered roads), a synthesized delay from road character and hour.
fn route_traffic(summary: RouteSummary, hour: u32) -> RouteTraffic {
    let measured = summary.traffic_time_seconds() - summary.base_time_seconds();
    let delay_seconds = if measured > 0.0 {
        measured
    } else {
        synthesize_delay(&summary, hour)
    };
    RouteTraffic {
        summary,
        delay_seconds,
    }
}

fn synthesize_delay(summary: &RouteSummary, hour: u32) -> f64 {
    let urban = summary
        .sections
        .iter()
        .any(|s| s.length_meters < URBAN_SECTION_MAX_METERS && s.duration_seconds > 300.0);
    let highway = summary.sections.iter().any(|s| {
        s.length_meters > URBAN_SECTION_MAX_METERS
            && s.duration_seconds / s.length_meters < HIGHWAY_PACE_SECONDS_PER_METER
    });

    let delay_factor = if urban && highway {
        0.3
    } else if urban {
        0.4
    } else if highway {
        0.15
    } else {
        0.1
    };

    let multiplier = match hour {
        7..=9 => 1.5,
        16..=19 => 1.8,
        0..=5 | 22..=23 => 0.5,
        _ => 1.0,
    };

    (summary.base_time_seconds() * delay_factor * multiplier).round()
}

/// Averages delay and distance over the successful probes and detects
/// road character. `None` when no probe succeeded.
#[allow(clippy::cast_precision_loss)]
fn summarize_probes(probes: &[RouteTraffic]) -> Option<ProbeSummary> {
    if probes.is_empty() {
        return None;
    }
    let count = probes.len() as f64;

    let avg_delay_seconds = probes.iter().map(|p| p.delay_seconds).sum::<f64>() / count;
    let avg_distance_meters = probes
        .iter()
        .map(|p| p.summary.total_length_meters())
        .sum::<f64>()
        / count;

    let has_highway = probes.iter().any(|p| {
        p.summary.sections.iter().any(|s| {
            s.length_meters > URBAN_SECTION_MAX_METERS
                && s.duration_seconds / s.length_meters < HIGHWAY_PACE_SECONDS_PER_METER
        })
    });
    let has_arterial = probes.iter().any(|p| {
        p.summary
            .sections
            .iter()
            .any(|s| s.length_meters > 2000.0 && s.length_meters <= URBAN_SECTION_MAX_METERS)
    });

    Some(ProbeSummary {
        avg_delay_seconds,
        avg_distance_meters,
        has_highway,
        has_arterial,
    })
}

/// Daily vehicle base bracket for the observed road class.
const fn base_bracket(stats: &ProbeSummary, weekend: bool) -> f64 {
    if stats.has_highway {
        if weekend { 30_000.0 } else { 45_000.0 }
    } else if stats.has_arterial {
        if weekend { 15_000.0 } else { 25_000.0 }
    } else if stats.avg_distance_meters > 2000.0 {
        if weekend { 8_000.0 } else { 15_000.0 }
    } else if weekend {
        3_000.0
    } else {
        6_000.0
    }
}

/// Pedestrian activity score: busier roads carry fewer walkers, and
/// highways suppress them outright.
const fn pedestrian_score(daily_vehicles: u32, has_highway: bool, weekend: bool) -> f64 {
    let mut score = match daily_vehicles {
        40_001.. => 0.5,
        25_001..=40_000 => 1.0,
        15_001..=25_000 => 1.5,
        8_001..=15_000 => 2.0,
        _ => 2.5,
    };

    if has_highway && score > 0.8 {
        score = 0.8;
    }

    if weekend {
        // Mid-volume corridors skew commercial and draw weekend walkers.
        if daily_vehicles > 8_000 && daily_vehicles < 25_000 {
            score += 0.5;
        } else {
            score -= 0.2;
        }
    }

    score
}

const fn level_from_score(score: f64) -> FootTrafficLevel {
    if score > 3.0 {
        FootTrafficLevel::VeryHigh
    } else if score > 2.5 {
        FootTrafficLevel::High
    } else if score > 2.0 {
        FootTrafficLevel::ModerateToHigh
    } else if score > 1.5 {
        FootTrafficLevel::Moderate
    } else if score > 1.0 {
        FootTrafficLevel::LowToModerate
    } else if score > 0.5 {
        FootTrafficLevel::Low
    } else {
        FootTrafficLevel::VeryLow
    }
}

fn build_report(coordinate: Coordinate, moment: Moment, stats: &ProbeSummary) -> TrafficReport {
    let bracket = base_bracket(stats, moment.weekend);
    let congestion = 1.0 + (stats.avg_delay_seconds / 600.0).min(0.5);
    let daily = heuristic::round_count(bracket * congestion);
    let hourly = heuristic::round_count(
        f64::from(daily) / 24.0 * heuristic::time_factor(moment.hour, moment.weekend),
    );

    let score = pedestrian_score(daily, stats.has_highway, moment.weekend);
    let foot_traffic = level_from_score(score).range_label().to_string();

    let (nearest_city, distance_to_city, area_type) = match urban_centers::nearest(coordinate) {
        Some((center, km)) => (
            Some(center.name.clone()),
            Some(km),
            AreaType::from_distance_km(km),
        ),
        None => (None, None, AreaType::Suburban),
    };

    TrafficReport {
        vehicle_count: daily,
        peak_hours: heuristic::peak_hours(moment.weekend).to_string(),
        foot_traffic,
        traffic_details: TrafficDetails {
            avg_delay: stats.avg_delay_seconds,
            current_hourly_volume: hourly,
            area_type,
            condition: TrafficCondition::from_delay_seconds(stats.avg_delay_seconds),
            nearest_city,
            distance_to_city,
        },
        is_fallback: false,
        fallback_reason: None,
    }
}
