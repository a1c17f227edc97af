//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the geocoder.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default public geocoding endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Root configuration for the batch geocoder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Remote geocoding endpoint.
    pub endpoint: EndpointConfig,

    /// Per-attempt timeouts.
    pub timeouts: TimeoutConfig,

    /// Retry and backoff settings.
    pub retries: RetryConfig,

    /// Fan-out pool settings.
    pub executor: ExecutorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Geocoding endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL the query string is appended to.
    pub base_url: String,

    /// Query parameter carrying the address text.
    pub address_param: String,

    /// Static query parameters sent with every request (e.g. an API key).
    pub params: BTreeMap<String, String>,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            address_param: "address".to_string(),
            params: BTreeMap::new(),
            use_system_proxy: true,
        }
    }
}

/// Timeout configuration for a single attempt.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for one request/response in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 30,
            request_secs: 60,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per address, including the first one.
    pub max_attempts: u32,

    /// Upper bound of the backoff window is `attempt * backoff_factor` units.
    pub backoff_factor: u32,

    /// Length of one backoff unit in milliseconds.
    pub backoff_unit_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_factor: 5,
            backoff_unit_ms: 1000,
        }
    }
}

/// Fan-out executor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Number of addresses resolved concurrently.
    pub max_concurrency: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_concurrency: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
