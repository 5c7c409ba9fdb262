#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot CLI for the sitescope property analyzer.
//!
//! Runs a full address analysis, either pipeline on its own for a raw
//! coordinate, or a provider configuration check. Output is a
//! human-readable report by default; `analyze --json` prints the full
//! profile as JSON for scripting.

use clap::{Parser, Subcommand};
use sitescope_geo::Coordinate;
use sitescope_poi_models::PoiCollection;
use sitescope_profile::PropertyProfile;
use sitescope_providers::{geocode, registry};
use sitescope_traffic::TrafficEstimator;
use sitescope_traffic_models::{TrafficReport, format_count};

#[derive(Debug, Parser)]
#[command(name = "sitescope", about = "Property traffic and business analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Analyze a free-text address end to end.
    Analyze {
        /// Address to analyze.
        address: String,
        /// Print the full profile as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },
    /// Estimate traffic at a coordinate.
    Traffic {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// List categorized businesses around a coordinate.
    Businesses {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Maximum number of places to fetch.
        #[arg(long, default_value_t = sitescope_poi::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Verify provider configuration and connectivity.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let client = sitescope_providers::http_client()?;

    match cli.command {
        Command::Analyze { address, json } => {
            let profile = sitescope_profile::analyze(&client, &address).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }
        Command::Traffic { lat, lng } => {
            let estimator = TrafficEstimator::from_registry(&client);
            let report = estimator.estimate(Coordinate::new(lat, lng)).await;
            print_traffic(&report);
        }
        Command::Businesses { lat, lng, limit } => {
            let businesses =
                sitescope_poi::nearby_businesses(&client, Coordinate::new(lat, lng), limit).await;
            print_businesses(&businesses);
        }
        Command::Check => check(&client).await?,
    }

    Ok(())
}

/// Prints the registry state and runs the geocoder self-test.
async fn check(client: &reqwest::Client) -> Result<(), Box<dyn std::error::Error>> {
    println!("Configured services:");
    for service in registry::all_services() {
        let key_state = if service.api_key().is_ok() {
            "api key set"
        } else {
            "api key missing"
        };
        let enabled = if service.enabled { "enabled" } else { "disabled" };
        println!("  {} ({}): {enabled}, {key_state}", service.name, service.id);
    }
    println!();

    let config = registry::geocoder_service();
    if geocode::is_available(client, &config).await {
        println!("Geocoder self-test: OK");
        Ok(())
    } else {
        println!("Geocoder self-test: FAILED");
        Err("geocoder did not answer the self-test".into())
    }
}

fn print_profile(profile: &PropertyProfile) {
    println!("{}", profile.address);
    println!(
        "({:.4}, {:.4})  analyzed {}",
        profile.coordinates.lat,
        profile.coordinates.lng,
        profile.analyzed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
    print_traffic(&profile.traffic);
    println!();
    print_businesses(&profile.businesses);
}

fn print_traffic(report: &TrafficReport) {
    let details = &report.traffic_details;

    println!("Traffic");
    println!(
        "  {} vehicles/day ({} this hour)",
        format_count(report.vehicle_count),
        format_count(details.current_hourly_volume)
    );
    println!("  Peak hours: {}", report.peak_hours);
    println!("  Foot traffic: {}", report.foot_traffic);
    match (&details.nearest_city, details.distance_to_city) {
        (Some(city), Some(km)) => {
            println!("  Area: {} ({km:.1} km from {city})", details.area_type);
        }
        _ => println!("  Area: {}", details.area_type),
    }
    println!(
        "  Conditions: {} (avg delay {:.0}s)",
        details.condition, details.avg_delay
    );
    if report.is_fallback {
        println!("  Note: degraded estimate");
    }
    if let Some(reason) = &report.fallback_reason {
        println!("  Note: {reason}");
    }
}

fn print_businesses(businesses: &PoiCollection) {
    println!("Nearby businesses ({} total)", businesses.total_len());
    for (category, bucket) in businesses.iter() {
        if bucket.is_empty() {
            continue;
        }
        println!("  {} ({})", category.display_name(), bucket.len());
        for poi in bucket.iter().take(5) {
            println!("    {} - {}", poi.distance, poi.name);
        }
        if bucket.len() > 5 {
            println!("    ... and {} more", bucket.len() - 5);
        }
    }
    if businesses.is_empty() {
        println!("  (none found)");
    }
}
