//! Urban-proximity heuristic traffic model.
//!
//! Derives a synthetic but deterministic traffic estimate from three
//! inputs only: the distance to the nearest known urban center, that
//! center's density rating, and the local hour/weekend flag.  A
//! coordinate-derived variation factor substitutes for randomness so
//! repeated runs for the same address never drift.
//!
//! The model never fails: invalid coordinates (and any arithmetic that
//! goes non-finite) drop to [`fallback_report`], a cruder estimate
//! seeded from the coordinate's own digits.

use sitescope_geo::Coordinate;
use sitescope_traffic_models::{
    AreaType, Moment, TrafficCondition, TrafficDetails, TrafficReport, foot_traffic_label,
};

use crate::urban_centers;

/// Daily vehicles contributed per density point at factor 1.0.
const DENSITY_BASE_VEHICLES: f64 = 4000.0;

/// Ceiling for the digit-derived fallback daily volume.
const FALLBACK_DAILY_CAP: f64 = 20_000.0;

/// Pedestrian share used by the fallback, where no distance is known.
const FALLBACK_PEDESTRIAN_SHARE: f64 = 0.05;

/// Traffic multiplier for the distance to the nearest urban center.
#[must_use]
pub const fn distance_factor(km: f64) -> f64 {
    if km < 5.0 {
        2.0
    } else if km < 15.0 {
        1.5
    } else if km < 30.0 {
        1.2
    } else if km < 60.0 {
        0.9
    } else if km < 100.0 {
        0.7
    } else {
        0.5
    }
}

/// Weekend days carry less commuter traffic.
#[must_use]
pub const fn day_factor(weekend: bool) -> f64 {
    if weekend { 0.7 } else { 1.0 }
}

/// Hour-of-day multiplier, shared with the live-routing variant.
///
/// Weekday rush windows amplify, late night collapses, weekend
/// midday sees a modest shopping bump.
#[must_use]
pub const fn time_factor(hour: u32, weekend: bool) -> f64 {
    if weekend {
        match hour {
            10..=16 => 1.2,
            0..=5 | 22..=23 => 0.3,
            _ => 0.8,
        }
    } else {
        match hour {
            7..=9 => 1.8,
            16..=19 => 1.9,
            10..=15 => 1.2,
            0..=5 | 22..=23 => 0.3,
            _ => 1.0,
        }
    }
}

/// Deterministic per-address variation in `[0.9, 1.1)`.
///
/// Averages the absolute fractional parts of both coordinates, so two
/// addresses a street apart get visibly different counts while the
/// same address always gets the same one.
#[must_use]
pub fn variation_factor(coordinate: Coordinate) -> f64 {
    let lat_fract = coordinate.lat.abs().fract();
    let lng_fract = coordinate.lng.abs().fract();
    0.2f64.mul_add((lat_fract + lng_fract) / 2.0, 0.9)
}

/// Peak-hour display ranges.
#[must_use]
pub const fn peak_hours(weekend: bool) -> &'static str {
    if weekend {
        "11 AM-1 PM, 2-4 PM"
    } else {
        "7-9 AM, 4-6 PM"
    }
}

/// Share of daily vehicles echoed as pedestrians, by distance to the
/// nearest center.
const fn pedestrian_share(km: f64) -> f64 {
    if km < 5.0 {
        0.20
    } else if km < 15.0 {
        0.12
    } else if km < 30.0 {
        0.06
    } else if km < 60.0 {
        0.03
    } else {
        0.01
    }
}

/// Estimates traffic at a coordinate for the current local time.
#[must_use]
pub fn estimate(coordinate: Coordinate) -> TrafficReport {
    estimate_at(coordinate, Moment::now())
}

/// Estimates traffic at a coordinate for a fixed moment.
///
/// Deterministic: the same coordinate and moment always produce the
/// same report.  Never fails — see [`fallback_report`].
#[must_use]
pub fn estimate_at(coordinate: Coordinate, moment: Moment) -> TrafficReport {
    if !coordinate.is_valid() {
        return fallback_report(coordinate, moment, "coordinate outside valid range");
    }

    let Some((center, km)) = urban_centers::nearest(coordinate) else {
        return fallback_report(coordinate, moment, "urban center table is empty");
    };

    let variation = variation_factor(coordinate);
    let base = f64::from(center.density) * DENSITY_BASE_VEHICLES * distance_factor(km);
    let daily_raw = base * day_factor(moment.weekend) * variation;
    if !daily_raw.is_finite() {
        return fallback_report(coordinate, moment, "estimate arithmetic went non-finite");
    }

    let daily = round_count(daily_raw);
    let hourly = round_count(
        f64::from(daily) / 24.0 * time_factor(moment.hour, moment.weekend) * variation,
    );
    let pedestrians = round_count(f64::from(daily) * pedestrian_share(km));

    TrafficReport {
        vehicle_count: daily,
        peak_hours: peak_hours(moment.weekend).to_string(),
        foot_traffic: foot_traffic_label(pedestrians),
        traffic_details: TrafficDetails {
            avg_delay: 0.0,
            current_hourly_volume: hourly,
            area_type: AreaType::from_distance_km(km),
            condition: TrafficCondition::from_delay_seconds(0.0),
            nearest_city: Some(center.name.clone()),
            distance_to_city: Some(km),
        },
        is_fallback: false,
        fallback_reason: None,
    }
}

/// Last-resort estimate derived only from the coordinate's digits.
///
/// Renders both coordinates to four decimal places, sums every digit,
/// and seeds a plausible daily volume from the sum, capped at 20,000.
/// Non-finite coordinates render without digits and land on the floor
/// value, so this cannot panic for any input.
#[must_use]
pub fn fallback_report(coordinate: Coordinate, moment: Moment, reason: &str) -> TrafficReport {
    let digit_sum = coordinate_digit_sum(coordinate);
    let daily = round_count(digit_sum.mul_add(250.0, 1000.0).min(FALLBACK_DAILY_CAP));
    let hourly = round_count(f64::from(daily) / 24.0);
    let pedestrians = round_count(f64::from(daily) * FALLBACK_PEDESTRIAN_SHARE);

    TrafficReport {
        vehicle_count: daily,
        peak_hours: peak_hours(moment.weekend).to_string(),
        foot_traffic: foot_traffic_label(pedestrians),
        traffic_details: TrafficDetails {
            avg_delay: 0.0,
            current_hourly_volume: hourly,
            area_type: AreaType::Suburban,
            condition: TrafficCondition::from_delay_seconds(0.0),
            nearest_city: None,
            distance_to_city: None,
        },
        is_fallback: true,
        fallback_reason: Some(reason.to_string()),
    }
}

fn coordinate_digit_sum(coordinate: Coordinate) -> f64 {
    let text = format!(
        "{:.4}{:.4}",
        coordinate.lat.abs(),
        coordinate.lng.abs()
    );
    let sum: u32 = text.chars().filter_map(|c| c.to_digit(10)).sum();
    f64::from(sum)
}

/// Rounds a non-negative estimate to a count, clamping anything
/// degenerate to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER_MANHATTAN: Coordinate = Coordinate {
        lat: 40.7230,
        lng: -74.0050,
    };

    #[test]
    fn same_inputs_same_report() {
        let moment = Moment {
            hour: 14,
            weekend: false,
        };
        let first = estimate_at(LOWER_MANHATTAN, moment);
        let second = estimate_at(LOWER_MANHATTAN, moment);
        assert_eq!(first, second);
    }

    #[test]
    fn downtown_weekday_rush_matches_formula() {
        let moment = Moment {
            hour: 8,
            weekend: false,
        };
        let report = estimate_at(LOWER_MANHATTAN, moment);
        let (center, km) = urban_centers::nearest(LOWER_MANHATTAN).unwrap();
        assert_eq!(center.name, "New York");
        assert!(km < 5.0, "Fixture drifted out of the downtown band");

        let variation = variation_factor(LOWER_MANHATTAN);
        let expected_daily =
            (f64::from(center.density) * 4000.0 * 2.0 * 1.0 * variation).round();
        assert_eq!(f64::from(report.vehicle_count), expected_daily);

        let expected_hourly =
            (f64::from(report.vehicle_count) / 24.0 * 1.8 * variation).round();
        assert_eq!(
            f64::from(report.traffic_details.current_hourly_volume),
            expected_hourly
        );
        assert_eq!(report.traffic_details.area_type, AreaType::Downtown);
        assert_eq!(report.peak_hours, "7-9 AM, 4-6 PM");
        assert!(!report.is_fallback);
    }

    #[test]
    fn weekend_reduces_volume() {
        let weekday = estimate_at(
            LOWER_MANHATTAN,
            Moment {
                hour: 13,
                weekend: false,
            },
        );
        let weekend = estimate_at(
            LOWER_MANHATTAN,
            Moment {
                hour: 13,
                weekend: true,
            },
        );
        assert!(weekend.vehicle_count < weekday.vehicle_count);
        assert_eq!(weekend.peak_hours, "11 AM-1 PM, 2-4 PM");
    }

    #[test]
    fn time_factor_windows() {
        assert!((time_factor(8, false) - 1.8).abs() < f64::EPSILON);
        assert!((time_factor(17, false) - 1.9).abs() < f64::EPSILON);
        assert!((time_factor(12, false) - 1.2).abs() < f64::EPSILON);
        assert!((time_factor(3, false) - 0.3).abs() < f64::EPSILON);
        assert!((time_factor(23, false) - 0.3).abs() < f64::EPSILON);
        assert!((time_factor(20, false) - 1.0).abs() < f64::EPSILON);
        assert!((time_factor(12, true) - 1.2).abs() < f64::EPSILON);
        assert!((time_factor(2, true) - 0.3).abs() < f64::EPSILON);
        assert!((time_factor(19, true) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_factor_steps() {
        assert!((distance_factor(0.0) - 2.0).abs() < f64::EPSILON);
        assert!((distance_factor(4.9) - 2.0).abs() < f64::EPSILON);
        assert!((distance_factor(5.0) - 1.5).abs() < f64::EPSILON);
        assert!((distance_factor(20.0) - 1.2).abs() < f64::EPSILON);
        assert!((distance_factor(45.0) - 0.9).abs() < f64::EPSILON);
        assert!((distance_factor(80.0) - 0.7).abs() < f64::EPSILON);
        assert!((distance_factor(150.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn variation_factor_stays_in_band() {
        for coordinate in [
            LOWER_MANHATTAN,
            Coordinate { lat: 0.0, lng: 0.0 },
            Coordinate {
                lat: -33.8688,
                lng: 151.2093,
            },
            Coordinate {
                lat: 89.9999,
                lng: -179.9999,
            },
        ] {
            let v = variation_factor(coordinate);
            assert!((0.9..1.1).contains(&v), "variation {v} out of band");
        }
    }

    #[test]
    fn invalid_coordinate_falls_back() {
        let moment = Moment {
            hour: 8,
            weekend: false,
        };
        let report = estimate_at(
            Coordinate {
                lat: 123.0,
                lng: 456.0,
            },
            moment,
        );
        assert!(report.is_fallback);
        assert!(report.fallback_reason.is_some());
        assert!(report.traffic_details.nearest_city.is_none());
        assert_eq!(report.traffic_details.area_type, AreaType::Suburban);
        assert!(report.vehicle_count >= 1000);
        assert!(report.vehicle_count <= 20_000);
    }

    #[test]
    fn fallback_never_panics_on_degenerate_input() {
        let moment = Moment {
            hour: 0,
            weekend: true,
        };
        for coordinate in [
            Coordinate {
                lat: f64::NAN,
                lng: f64::NAN,
            },
            Coordinate {
                lat: f64::INFINITY,
                lng: 0.0,
            },
            Coordinate {
                lat: 0.0,
                lng: f64::NEG_INFINITY,
            },
        ] {
            let report = estimate_at(coordinate, moment);
            assert!(report.is_fallback);
            assert!(report.vehicle_count >= 1000);
            assert!(report.vehicle_count <= 20_000);
        }
    }

    #[test]
    fn fallback_is_deterministic_and_digit_sensitive() {
        let moment = Moment {
            hour: 8,
            weekend: false,
        };
        let a = fallback_report(
            Coordinate {
                lat: 91.1111,
                lng: 0.0,
            },
            moment,
            "test",
        );
        let b = fallback_report(
            Coordinate {
                lat: 91.1111,
                lng: 0.0,
            },
            moment,
            "test",
        );
        let c = fallback_report(
            Coordinate {
                lat: 99.9999,
                lng: 0.0,
            },
            moment,
            "test",
        );
        assert_eq!(a.vehicle_count, b.vehicle_count);
        assert_ne!(a.vehicle_count, c.vehicle_count);
    }

    #[test]
    fn round_count_clamps_degenerate_values() {
        assert_eq!(round_count(f64::NAN), 0);
        assert_eq!(round_count(f64::INFINITY), 0);
        assert_eq!(round_count(-5.0), 0);
        assert_eq!(round_count(41.5), 42);
    }
}
