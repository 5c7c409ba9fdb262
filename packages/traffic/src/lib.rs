#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Traffic estimation for a property coordinate.
//!
//! Two strategies produce the same [`TrafficReport`] shape:
//!
//! 1. **Heuristic** ([`heuristic`]) — offline, deterministic, driven by
//!    the distance to the nearest known urban center.  Always
//!    available; the primary model.
//! 2. **Live routing** ([`live`]) — probes short car routes around the
//!    property and reads congestion off live travel times.  Opt-in via
//!    the routing service's `enabled` flag, and strictly a refinement:
//!    any failure falls back to the heuristic.
//!
//! [`TrafficEstimator`] composes the two so that estimating traffic
//! never fails — the worst case is a flagged, digit-seeded fallback
//! report from the heuristic.

pub mod heuristic;
pub mod live;
pub mod urban_centers;

use sitescope_geo::Coordinate;
use sitescope_providers::{ProviderError, registry, registry::ServiceConfig};
use sitescope_traffic_models::{Moment, TrafficReport};
use thiserror::Error;

/// Errors from the live traffic variant.
///
/// These never escape [`TrafficEstimator`]; they exist so the live
/// module can signal "no estimate" distinctly from a degraded one.
#[derive(Debug, Error)]
pub enum TrafficError {
    /// Every directional routing probe failed.
    #[error("all routing probes failed: {0}")]
    AllProbesFailed(ProviderError),
}

/// Client and service configuration for live probes.
#[derive(Debug, Clone)]
struct RoutingBackend {
    client: reqwest::Client,
    config: ServiceConfig,
}

/// Strategy-selecting traffic estimator.
///
/// Estimates never fail: live-probe errors drop to the heuristic, and
/// heuristic-invalidating inputs drop to its digit-seeded fallback.
#[derive(Debug, Clone, Default)]
pub struct TrafficEstimator {
    routing: Option<RoutingBackend>,
}

impl TrafficEstimator {
    /// An estimator that only runs the offline heuristic.
    #[must_use]
    pub const fn heuristic_only() -> Self {
        Self { routing: None }
    }

    /// An estimator that tries live routing probes first.
    #[must_use]
    pub const fn with_routing(client: reqwest::Client, config: ServiceConfig) -> Self {
        Self {
            routing: Some(RoutingBackend { client, config }),
        }
    }

    /// Builds an estimator from the provider registry: live probes when
    /// the routing service is enabled, heuristic-only otherwise.
    #[must_use]
    pub fn from_registry(client: &reqwest::Client) -> Self {
        let config = registry::routing_service();
        if config.enabled {
            log::debug!("Routing service enabled; live traffic probes active");
            Self::with_routing(client.clone(), config)
        } else {
            Self::heuristic_only()
        }
    }

    /// Whether this estimator will attempt live routing probes.
    #[must_use]
    pub const fn uses_live_probes(&self) -> bool {
        self.routing.is_some()
    }

    /// Estimates traffic at a coordinate for the current local time.
    pub async fn estimate(&self, coordinate: Coordinate) -> TrafficReport {
        self.estimate_at(coordinate, Moment::now()).await
    }

    /// Estimates traffic at a coordinate for a fixed moment.
    pub async fn estimate_at(&self, coordinate: Coordinate, moment: Moment) -> TrafficReport {
        if !coordinate.is_valid() {
            return heuristic::estimate_at(coordinate, moment);
        }
        let Some(backend) = &self.routing else {
            return heuristic::estimate_at(coordinate, moment);
        };

        match live::estimate(&backend.client, &backend.config, coordinate, moment).await {
            Ok(report) => report,
            Err(e) => {
                log::warn!("Live traffic estimate failed, using heuristic: {e}");
                let mut report = heuristic::estimate_at(coordinate, moment);
                if report.fallback_reason.is_none() {
                    report.fallback_reason = Some(format!("live routing unavailable: {e}"));
                }
                report
            }
        }
    }
}
