#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP clients for the external services behind sitescope.
//!
//! Three services, each defined in a TOML file under `services/` and
//! embedded at compile time via the [`registry`]:
//!
//! 1. **Geocoder** — forward geocoding of street addresses
//!    (`/geocode`, HERE Geocoding & Search).
//! 2. **Routing** — car routes with live traffic travel summaries
//!    (`/routes`, HERE Routing v8). Disabled by default; the traffic
//!    package falls back to its offline heuristic without it.
//! 3. **Places** — place discovery around a coordinate (`/browse`).
//!
//! Every client follows the same split: an async fetch function that
//! owns the HTTP round-trip, and a pure `parse_response` that turns
//! the JSON body into typed results and is unit-tested against
//! fixtures.  API keys are read from environment variables named in
//! the service TOML, never stored in configuration.

pub mod geocode;
pub mod places;
pub mod registry;
pub mod routing;

use thiserror::Error;

/// Errors from provider HTTP calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("Service returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The API key environment variable is unset or empty.
    #[error("Missing credentials: set the {variable} environment variable")]
    Credentials {
        /// Name of the environment variable that must hold the key.
        variable: String,
    },
}

/// Builds the HTTP client shared by all provider calls.
///
/// One client per process is enough; `reqwest::Client` is an `Arc`
/// around its connection pool and is cheap to clone.
///
/// # Errors
///
/// Returns [`ProviderError::Http`] if the TLS backend fails to
/// initialize.
pub fn http_client() -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("sitescope/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_client_builds() {
        assert!(http_client().is_ok());
    }

    #[test]
    fn credentials_error_names_the_variable() {
        let err = ProviderError::Credentials {
            variable: "HERE_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("HERE_API_KEY"));
    }
}
