//! Compile-time registry of provider service configurations.
//!
//! Each external service is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and the per-service accessors.  The `enabled`
//! flag is how deployments opt in to the live routing probes without
//! touching code.

use serde::Deserialize;

use crate::ProviderError;

/// A provider service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Unique identifier (`"geocoder"`, `"routing"`, `"places"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether callers should use this service.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

const fn default_true() -> bool {
    true
}

impl ServiceConfig {
    /// Reads this service's API key from its configured environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Credentials`] when the variable is
    /// unset or empty.
    pub fn api_key(&self) -> Result<String, ProviderError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ProviderError::Credentials {
                variable: self.api_key_env.clone(),
            }),
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("geocoder", include_str!("../services/geocoder.toml")),
    ("routing", include_str!("../services/routing.toml")),
    ("places", include_str!("../services/places.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 3;

/// Returns all provider service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<ServiceConfig> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse provider service '{name}': {e}"))
        })
        .collect()
}

/// Looks up a service configuration by its `id`.
#[must_use]
pub fn service(id: &str) -> Option<ServiceConfig> {
    all_services().into_iter().find(|s| s.id == id)
}

/// Returns the geocoder service configuration.
///
/// # Panics
///
/// Panics if the embedded config is missing or malformed (compile-time
/// guarantee).
#[must_use]
pub fn geocoder_service() -> ServiceConfig {
    service("geocoder").unwrap_or_else(|| panic!("geocoder service missing from registry"))
}

/// Returns the routing service configuration.
///
/// Check its `enabled` flag before issuing traffic probes; the service
/// ships disabled so the offline heuristic remains the default.
///
/// # Panics
///
/// Panics if the embedded config is missing or malformed (compile-time
/// guarantee).
#[must_use]
pub fn routing_service() -> ServiceConfig {
    service("routing").unwrap_or_else(|| panic!("routing service missing from registry"))
}

/// Returns the places service configuration.
///
/// # Panics
///
/// Panics if the embedded config is missing or malformed (compile-time
/// guarantee).
#[must_use]
pub fn places_service() -> ServiceConfig {
    service("places").unwrap_or_else(|| panic!("places service missing from registry"))
}
