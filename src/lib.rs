//! Batch geocoding library.
//!
//! Resolves a list of free-text addresses into coordinates by fanning out
//! retrying requests to a geocoding endpoint under a fixed concurrency cap.

pub mod config;
pub mod executor;
pub mod geocoding;
pub mod io;
pub mod observability;
pub mod resilience;

pub use config::schema::GeocoderConfig;
pub use executor::FanOutExecutor;
pub use geocoding::{CallResult, GeocodeClient, HttpTransport, WorkItem};
