//! Geocoding data model and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status value the endpoint reports for a usable answer.
pub const OK_STATUS: &str = "OK";

/// One address to resolve.
///
/// Its only identity is its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    address: String,
}

impl WorkItem {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn into_address(self) -> String {
        self.address
    }
}

impl From<String> for WorkItem {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for WorkItem {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// Opaque location payload, passed through exactly as the endpoint sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(pub serde_json::Value);

/// Outcome of resolving one address.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    Found { address: String, location: Location },
    NotFound { address: String },
}

impl CallResult {
    pub fn found(item: WorkItem, location: Location) -> Self {
        Self::Found {
            address: item.into_address(),
            location,
        }
    }

    pub fn not_found(item: WorkItem) -> Self {
        Self::NotFound {
            address: item.into_address(),
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Found { address, .. } | Self::NotFound { address } => address,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Found { location, .. } => Some(location),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Decoded endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// An `OK` response whose first result carries `location`.
    pub fn ok(location: serde_json::Value) -> Self {
        Self {
            status: OK_STATUS.to_string(),
            results: vec![serde_json::json!({ "geometry": { "location": location } })],
            error_message: None,
        }
    }

    /// A response with the given status and no results.
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK_STATUS
    }

    /// `results[0].geometry.location`, if present.
    pub fn location(&self) -> Option<Location> {
        self.results
            .first()
            .and_then(|result| result.pointer("/geometry/location"))
            .cloned()
            .map(Location)
    }
}

/// Failure of a single attempt. Never leaves the client.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connect failure, timeout, or broken connection.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// Body was not a geocoding response.
    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
