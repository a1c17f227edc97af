//! Geocoding subsystem.
//!
//! # Data Flow
//! ```text
//! WorkItem (address)
//!     → client.rs (retry loop, one RetryState per address)
//!     → transport.rs (HTTP GET with per-attempt timeouts)
//!     → types.rs (GeocodeResponse → CallResult)
//! ```

pub mod client;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GeocodeClient;
pub use transport::{GeocodeTransport, HttpTransport};
pub use types::{CallResult, GeocodeError, GeocodeResponse, Location, TransportError, WorkItem};
