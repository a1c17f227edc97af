//! Fan-out executor subsystem.
//!
//! # Data Flow
//! ```text
//! Vec<WorkItem>
//!     → fan_out.rs (semaphore admission, one task per admitted address)
//!     → GeocodeClient::resolve (per-address retry loop)
//!     → result slots keyed by input position
//!     → Vec<CallResult> in input order
//! ```

pub mod error;
pub mod fan_out;

pub use error::BatchError;
pub use fan_out::FanOutExecutor;
