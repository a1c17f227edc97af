//! Retrying geocode client.
//!
//! # Responsibilities
//! - Resolve one address to exactly one `CallResult`
//! - Retry non-OK statuses and transport failures with jittered backoff
//! - Degrade every per-address failure to `NotFound`
//!
//! # Design Decisions
//! - Stateless across calls; each call owns its `RetryState`
//! - Backoff is a tokio sleep, so it holds only this address's pool slot
//! - An `OK` answer without a location is final, not retried

use crate::config::GeocoderConfig;
use crate::geocoding::transport::{GeocodeTransport, HttpTransport};
use crate::geocoding::types::{CallResult, GeocodeError, Location, WorkItem};
use crate::observability::metrics;
use crate::resilience::{JitterSource, RetryPolicy};

/// What a single attempt produced.
#[derive(Debug)]
enum Attempt {
    Found(Location),
    NoResult,
    Retryable,
}

/// Geocode client applying the retry policy around a transport.
#[derive(Debug)]
pub struct GeocodeClient<T> {
    transport: T,
    policy: RetryPolicy,
    jitter: JitterSource,
}

impl GeocodeClient<HttpTransport> {
    /// Build an HTTP-backed client from configuration.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let transport = HttpTransport::new(&config.endpoint, &config.timeouts)?;
        Ok(Self::new(transport, RetryPolicy::from(&config.retries)))
    }
}

impl<T: GeocodeTransport> GeocodeClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            jitter: JitterSource::default(),
        }
    }

    /// Replace the backoff random source.
    pub fn with_jitter(mut self, jitter: JitterSource) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Resolve one address, retrying until it is found or attempts run out.
    pub async fn resolve(&self, item: WorkItem) -> CallResult {
        let mut state = self.policy.start();

        loop {
            let outcome = self.attempt(item.address(), state.attempt()).await;
            match outcome {
                Attempt::Found(location) => {
                    metrics::record_result(true);
                    return CallResult::found(item, location);
                }
                Attempt::NoResult => {
                    metrics::record_result(false);
                    return CallResult::not_found(item);
                }
                Attempt::Retryable => {}
            }

            let Some(delay) = state.next_delay(&self.jitter) else {
                tracing::warn!(
                    address = %item.address(),
                    attempts = state.attempt(),
                    "Retries exhausted, marking address not found"
                );
                metrics::record_result(false);
                return CallResult::not_found(item);
            };

            tracing::debug!(
                address = %item.address(),
                next_attempt = state.attempt(),
                delay = ?delay,
                "Retrying geocode request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(&self, address: &str, attempt: u32) -> Attempt {
        match self.transport.fetch(address).await {
            Ok(response) if response.is_ok() => match response.location() {
                Some(location) => {
                    metrics::record_attempt("found");
                    Attempt::Found(location)
                }
                None => {
                    tracing::warn!(address = %address, attempt, "OK response carried no location");
                    metrics::record_attempt("no_location");
                    Attempt::NoResult
                }
            },
            Ok(response) => {
                tracing::warn!(
                    address = %address,
                    attempt,
                    status = %response.status,
                    error_message = response.error_message.as_deref().unwrap_or(""),
                    "Geocoder returned non-OK status"
                );
                metrics::record_attempt("status");
                Attempt::Retryable
            }
            Err(e) => {
                tracing::error!(address = %address, attempt, error = %e, "Geocode request failed");
                metrics::record_attempt("transport");
                Attempt::Retryable
            }
        }
    }
}
