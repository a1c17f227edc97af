//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GeocoderConfig (validated, immutable)
//!     → handed to the transport, client and executor at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; one config per batch run
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::EndpointConfig;
pub use schema::ExecutorConfig;
pub use schema::GeocoderConfig;
pub use schema::ObservabilityConfig;
pub use schema::RetryConfig;
pub use schema::TimeoutConfig;
pub use validation::ValidationError;
