//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Geocode attempt fails (non-OK status, transport error, timeout)
//!     → retries.rs (attempt budget left?)
//!     → backoff.rs (jittered sleep sized by attempt number)
//!     → next attempt
//! ```
//!
//! # Design Decisions
//! - Timeouts live on the HTTP client; every attempt has a deadline
//! - Backoff window grows linearly, not exponentially
//! - Retry state is per address and never shared

pub mod backoff;
pub mod retries;

pub use backoff::{calculate_backoff, JitterSource};
pub use retries::{RetryPolicy, RetryState};
