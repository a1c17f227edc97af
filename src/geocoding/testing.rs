//! Scripted transport for exercising the retry loop and the executor
//! without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::geocoding::transport::GeocodeTransport;
use crate::geocoding::types::{GeocodeResponse, TransportError};

type Script = dyn Fn(&str, u32) -> Result<GeocodeResponse, TransportError> + Send + Sync;
type Latency = dyn Fn(&str) -> Duration + Send + Sync;

/// Answers each request by calling `script(address, attempt)`.
///
/// `attempt` counts calls per address, starting at 1.
pub(crate) struct ScriptedTransport {
    script: Box<Script>,
    latency: Box<Latency>,
    calls: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new<F>(script: F) -> Self
    where
        F: Fn(&str, u32) -> Result<GeocodeResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            latency: Box::new(|_| Duration::ZERO),
            calls: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delay each response by `latency(address)`.
    pub(crate) fn with_latency<L>(mut self, latency: L) -> Self
    where
        L: Fn(&str) -> Duration + Send + Sync + 'static,
    {
        self.latency = Box::new(latency);
        self
    }

    pub(crate) fn calls(&self, address: &str) -> u32 {
        self.calls.lock().unwrap().get(address).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl GeocodeTransport for ScriptedTransport {
    async fn fetch(&self, address: &str) -> Result<GeocodeResponse, TransportError> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(address.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = (self.latency)(address);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.script)(address, attempt)
    }
}
