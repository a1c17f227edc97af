//! Batch input and output.
//!
//! # Data Flow
//! ```text
//! address file (one per line)
//!     → input.rs (skip blank lines)
//!     → Vec<WorkItem>
//!     → ... executor ...
//!     → output.rs (ordered JSON array of records)
//! ```

pub mod input;
pub mod output;

pub use input::{parse_addresses, prompt_for_path, read_addresses};
pub use output::{render_json, LocationRecord, RecordStatus};
