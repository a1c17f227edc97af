//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts >= 1, pool capacity >= 1)
//! - Reject endpoint URLs the transport cannot use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GeocoderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GeocoderConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GeocoderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.endpoint.base_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::new(
                "endpoint.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new("endpoint.base_url", e.to_string())),
    }

    if config.endpoint.address_param.is_empty() {
        errors.push(ValidationError::new("endpoint.address_param", "must not be empty"));
    } else if config.endpoint.params.contains_key(&config.endpoint.address_param) {
        errors.push(ValidationError::new(
            "endpoint.params",
            format!("'{}' is reserved for the address", config.endpoint.address_param),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if config.retries.backoff_factor == 0 {
        errors.push(ValidationError::new("retries.backoff_factor", "must be at least 1"));
    }
    if config.retries.backoff_unit_ms == 0 {
        errors.push(ValidationError::new("retries.backoff_unit_ms", "must be at least 1"));
    }

    if config.executor.max_concurrency == 0 {
        errors.push(ValidationError::new("executor.max_concurrency", "must be at least 1"));
    }

    if config.observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
