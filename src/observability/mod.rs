//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client.rs / fan_out.rs produce:
//!     → logging.rs (structured log events, batch span with batch_id)
//!     → metrics.rs (attempt and result counters, batch duration)
//!
//! Consumers:
//!     → stderr
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
