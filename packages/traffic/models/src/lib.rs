#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Traffic report types and the area/condition taxonomies.
//!
//! A [`TrafficReport`] is the single output type of the traffic estimator,
//! regardless of which strategy produced it (live routing probes or the
//! urban-proximity heuristic). Reports are computed fresh per analysis,
//! never mutated after construction, and never persisted.

use chrono::{Datelike as _, Timelike as _, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative urban-density classification derived from the distance to
/// the nearest known urban center.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum AreaType {
    /// Within 5 km of a major urban center.
    Downtown,
    /// 5-15 km out.
    Urban,
    /// 15-30 km out.
    Suburban,
    /// 30-60 km out.
    Exurban,
    /// Beyond 60 km from any known center.
    Rural,
}

impl AreaType {
    /// Classifies a distance to the nearest urban center.
    ///
    /// Breakpoints match the heuristic model's distance factor steps, so
    /// the label and the multiplier always agree.
    #[must_use]
    pub fn from_distance_km(km: f64) -> Self {
        if km < 5.0 {
            Self::Downtown
        } else if km < 15.0 {
            Self::Urban
        } else if km < 30.0 {
            Self::Suburban
        } else if km < 60.0 {
            Self::Exurban
        } else {
            Self::Rural
        }
    }
}

/// Congestion label derived from average signal delay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum TrafficCondition {
    /// Delay of 60 seconds or less.
    Normal,
    /// Delay up to 5 minutes.
    Moderate,
    /// More than 5 minutes of delay.
    Heavy,
}

impl TrafficCondition {
    /// Classifies an average delay in seconds.
    #[must_use]
    pub fn from_delay_seconds(delay: f64) -> Self {
        if delay <= 60.0 {
            Self::Normal
        } else if delay <= 300.0 {
            Self::Moderate
        } else {
            Self::Heavy
        }
    }
}

/// Pedestrian activity tier, keyed on estimated daily pedestrian count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum FootTrafficLevel {
    /// 2,000+ pedestrians/day.
    #[strum(serialize = "Very High")]
    VeryHigh,
    /// 1,000-2,000 pedestrians/day.
    High,
    /// 800-1,000 pedestrians/day.
    #[strum(serialize = "Moderate to High")]
    ModerateToHigh,
    /// 500-800 pedestrians/day.
    Moderate,
    /// 300-500 pedestrians/day.
    #[strum(serialize = "Low to Moderate")]
    LowToModerate,
    /// 100-300 pedestrians/day.
    Low,
    /// Fewer than 100 pedestrians/day.
    #[strum(serialize = "Very Low")]
    VeryLow,
}

impl FootTrafficLevel {
    /// Tier for an estimated daily pedestrian count.
    #[must_use]
    pub const fn from_daily_pedestrians(count: u32) -> Self {
        match count {
            2000.. => Self::VeryHigh,
            1000..=1999 => Self::High,
            800..=999 => Self::ModerateToHigh,
            500..=799 => Self::Moderate,
            300..=499 => Self::LowToModerate,
            100..=299 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    /// Display string with the tier's pedestrian range instead of a
    /// point estimate, used when the estimate came from road-class
    /// scoring rather than a counted share.
    #[must_use]
    pub const fn range_label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High (estimated 2,000+ pedestrians/day)",
            Self::High => "High (estimated 1,000-2,000 pedestrians/day)",
            Self::ModerateToHigh => "Moderate to High (estimated 800-1,000 pedestrians/day)",
            Self::Moderate => "Moderate (estimated 500-800 pedestrians/day)",
            Self::LowToModerate => "Low to Moderate (estimated 300-500 pedestrians/day)",
            Self::Low => "Low (estimated 100-300 pedestrians/day)",
            Self::VeryLow => "Very Low (estimated <100 pedestrians/day)",
        }
    }
}

/// Renders the foot-traffic display string embedded in a report, e.g.
/// `"High (estimated 1,200 pedestrians/day)"`.
#[must_use]
pub fn foot_traffic_label(daily_pedestrians: u32) -> String {
    format!(
        "{} (estimated {} pedestrians/day)",
        FootTrafficLevel::from_daily_pedestrians(daily_pedestrians),
        format_count(daily_pedestrians)
    )
}

/// Formats an integer with comma thousands separators (`42500` -> `"42,500"`).
#[must_use]
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A snapshot of the local hour and weekend flag — the only
/// non-coordinate inputs the estimators depend on.
///
/// Estimates are deterministic for a fixed `Moment`; callers that want
/// wall-clock behavior use [`Moment::now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Whether the day is Saturday or Sunday.
    pub weekend: bool,
}

impl Moment {
    /// Builds a moment from an hour and a weekday.
    #[must_use]
    pub const fn from_hour_and_weekday(hour: u32, weekday: Weekday) -> Self {
        Self {
            hour: hour % 24,
            weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
        }
    }

    /// The current local hour and weekend flag.
    #[must_use]
    pub fn now() -> Self {
        let now = chrono::Local::now();
        Self::from_hour_and_weekday(now.hour(), now.weekday())
    }
}

/// Supporting detail carried alongside the headline vehicle counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficDetails {
    /// Average signal delay across successful routing probes, in seconds.
    /// Zero when the heuristic model produced the report.
    pub avg_delay: f64,
    /// Estimated vehicles passing in the current hour.
    pub current_hourly_volume: u32,
    /// Urban-density classification of the surrounding area.
    pub area_type: AreaType,
    /// Congestion label derived from `avg_delay`.
    pub condition: TrafficCondition,
    /// Name of the nearest known urban center, when one was consulted.
    pub nearest_city: Option<String>,
    /// Distance to that center in kilometers.
    pub distance_to_city: Option<f64>,
}

/// A complete traffic estimate for one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficReport {
    /// Estimated daily vehicle count.
    pub vehicle_count: u32,
    /// Human-readable morning/evening peak ranges.
    pub peak_hours: String,
    /// Tiered pedestrian-activity label with the estimate embedded.
    pub foot_traffic: String,
    /// Supporting detail.
    pub traffic_details: TrafficDetails,
    /// True when the degraded coordinate-digit fallback produced this
    /// report (the model itself could not run).
    pub is_fallback: bool,
    /// Diagnostic message explaining a fallback or a silently recovered
    /// live-routing failure.
    pub fallback_reason: Option<String>,
}
