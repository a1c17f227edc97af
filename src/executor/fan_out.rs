//! Bounded fan-out of geocode calls.
//!
//! # Responsibilities
//! - Admit at most `max_concurrency` addresses at a time
//! - Run each admitted address to completion, retries included
//! - Return results in input order, whatever the completion order
//!
//! # Design Decisions
//! - A semaphore permit is acquired before spawning (backpressure); queued
//!   addresses hold no task and no slot
//! - The permit moves into the task and is released when the task ends,
//!   even if it panics
//! - Results land in slots keyed by input position
//! - A task that cannot report its outcome fails the whole batch; dropping
//!   the `JoinSet` on that path aborts every task still running

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::GeocoderConfig;
use crate::executor::error::BatchError;
use crate::geocoding::{CallResult, GeocodeClient, GeocodeError, GeocodeTransport, HttpTransport, WorkItem};
use crate::observability::metrics;

/// Runs a batch of addresses through a shared client under a concurrency cap.
#[derive(Debug)]
pub struct FanOutExecutor<T> {
    client: Arc<GeocodeClient<T>>,
    max_concurrency: usize,
}

impl FanOutExecutor<HttpTransport> {
    /// Build an HTTP-backed executor from configuration.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = GeocodeClient::from_config(config)?;
        Ok(Self::new(client, config.executor.max_concurrency))
    }
}

impl<T: GeocodeTransport> FanOutExecutor<T> {
    /// A capacity of zero is raised to one.
    pub fn new(client: GeocodeClient<T>, max_concurrency: usize) -> Self {
        Self {
            client: Arc::new(client),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn client(&self) -> &GeocodeClient<T> {
        &self.client
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Resolve every address, returning one result per input position.
    pub async fn run(&self, items: Vec<WorkItem>) -> Result<Vec<CallResult>, BatchError> {
        let span = tracing::info_span!("batch", batch_id = %Uuid::new_v4(), items = items.len());
        self.run_session(items).instrument(span).await
    }

    async fn run_session(&self, items: Vec<WorkItem>) -> Result<Vec<CallResult>, BatchError> {
        let started = Instant::now();
        let total = items.len();

        tracing::info!(max_concurrency = self.max_concurrency, "Batch starting");

        let pool = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut slots: Vec<Option<CallResult>> = std::iter::repeat_with(|| None).take(total).collect();

        for (index, item) in items.into_iter().enumerate() {
            let permit = Arc::clone(&pool).acquire_owned().await?;
            let client = Arc::clone(&self.client);

            tasks.spawn(
                async move {
                    let _permit = permit;
                    (index, client.resolve(item).await)
                }
                .in_current_span(),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined?;
            slots[index] = Some(result);
        }

        let results = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(BatchError::MissingResult(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let found = results.iter().filter(|r| r.is_found()).count();
        metrics::record_batch(started);
        tracing::info!(
            found,
            not_found = total - found,
            elapsed = ?started.elapsed(),
            "Batch complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::testing::ScriptedTransport;
    use crate::geocoding::types::{GeocodeResponse, Location, TransportError};
    use crate::resilience::{JitterSource, RetryPolicy};
    use serde_json::json;
    use std::time::Duration;

    fn items(addresses: &[&str]) -> Vec<WorkItem> {
        addresses.iter().map(|a| WorkItem::new(*a)).collect()
    }

    fn executor(transport: ScriptedTransport, max_concurrency: usize) -> FanOutExecutor<ScriptedTransport> {
        let client = GeocodeClient::new(transport, RetryPolicy::default()).with_jitter(JitterSource::seeded(5));
        FanOutExecutor::new(client, max_concurrency)
    }

    /// Found unless the address mentions "nowhere" or "down".
    fn deterministic(address: &str, _attempt: u32) -> Result<GeocodeResponse, TransportError> {
        if address.contains("down") {
            Err(TransportError::Status(502))
        } else if address.contains("nowhere") {
            Ok(GeocodeResponse::with_status("ZERO_RESULTS"))
        } else {
            Ok(GeocodeResponse::ok(json!({ "lat": address.len(), "lng": 0 })))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch_yields_empty_output() {
        let executor = executor(ScriptedTransport::new(deterministic), 10);
        let results = executor.run(Vec::new()).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(executor.client().transport().total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_order_matches_input_not_completion() {
        // Earlier addresses answer later, so completion order is reversed.
        let addresses: Vec<String> = (0..12).map(|i| format!("street {i}")).collect();
        let transport = ScriptedTransport::new(deterministic).with_latency(|address| {
            let n: u64 = address.trim_start_matches("street ").parse().unwrap();
            Duration::from_millis(1000 - n * 50)
        });
        let executor = executor(transport, 4);

        let input = addresses.iter().map(|a| WorkItem::new(a.as_str())).collect();
        let results = executor.run(input).await.unwrap();

        assert_eq!(results.len(), addresses.len());
        for (result, address) in results.iter().zip(&addresses) {
            assert_eq!(result.address(), address);
            assert_eq!(result.location(), Some(&Location(json!({ "lat": address.len(), "lng": 0 }))));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_pool_capacity() {
        // Every address fails once so slots are also held across backoff sleeps.
        let transport = ScriptedTransport::new(|_, attempt| {
            if attempt == 1 {
                Ok(GeocodeResponse::with_status("UNKNOWN_ERROR"))
            } else {
                Ok(GeocodeResponse::ok(json!({ "lat": 0, "lng": 0 })))
            }
        })
        .with_latency(|_| Duration::from_millis(200));
        let executor = executor(transport, 10);

        let input: Vec<WorkItem> = (0..25).map(|i| WorkItem::new(format!("addr {i}"))).collect();
        let results = executor.run(input).await.unwrap();

        assert_eq!(results.len(), 25);
        assert!(results.iter().all(CallResult::is_found));
        let transport = executor.client().transport();
        assert_eq!(transport.total_calls(), 50);
        assert!(transport.peak_in_flight() <= 10, "peak was {}", transport.peak_in_flight());
        assert_eq!(transport.peak_in_flight(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_item_does_not_disturb_siblings() {
        let executor = executor(ScriptedTransport::new(deterministic), 3);

        let results = executor
            .run(items(&["Paris", "server down", "Rome", "nowhere land", "Oslo"]))
            .await
            .unwrap();

        let statuses: Vec<_> = results.iter().map(|r| (r.address(), r.is_found())).collect();
        assert_eq!(
            statuses,
            vec![
                ("Paris", true),
                ("server down", false),
                ("Rome", true),
                ("nowhere land", false),
                ("Oslo", true),
            ]
        );
        let transport = executor.client().transport();
        assert_eq!(transport.calls("server down"), 5);
        assert_eq!(transport.calls("nowhere land"), 5);
        assert_eq!(transport.calls("Paris"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_item_does_not_block_other_slots() {
        let transport = ScriptedTransport::new(deterministic).with_latency(|address| {
            if address == "slow" {
                Duration::from_secs(30)
            } else {
                Duration::from_secs(1)
            }
        });
        let executor = executor(transport, 2);

        let started = tokio::time::Instant::now();
        let results = executor.run(items(&["slow", "a", "b", "c", "d", "e"])).await.unwrap();

        assert_eq!(results.len(), 6);
        // Five fast items share one slot while "slow" holds the other.
        assert!(started.elapsed() < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_runs_are_identical() {
        let executor = executor(ScriptedTransport::new(deterministic), 2);
        let input = items(&["Berlin", "nowhere", "down town", "Vienna"]);

        let first = executor.run(input.clone()).await.unwrap();
        let second = executor.run(input).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_panicking_task_fails_the_batch() {
        let transport = ScriptedTransport::new(|address, attempt| {
            if address == "boom" {
                panic!("scripted panic");
            }
            deterministic(address, attempt)
        });
        let executor = executor(transport, 2);

        let err = executor.run(items(&["a", "boom", "b"])).await.unwrap_err();
        assert!(matches!(err, BatchError::Task(ref e) if e.is_panic()));
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let executor = executor(ScriptedTransport::new(deterministic), 0);
        assert_eq!(executor.max_concurrency(), 1);
    }
}
