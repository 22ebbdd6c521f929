//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, address parses)
//! - Reject empty or duplicated check selections
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DemoConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::DemoConfig;
use crate::membership::CheckMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("check.key must not be empty")]
    EmptyKey,

    #[error("check.modes must name at least one predicate")]
    NoModes,

    #[error("check.modes lists '{0}' more than once")]
    DuplicateMode(CheckMode),

    #[error("observability.log_level '{0}' is not a valid filter")]
    InvalidLogLevel(String),
}

/// Check `config` for semantic problems.
pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("server.request_timeout_secs"));
    }
    if config.client.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("client.timeout_secs"));
    }

    if config.check.key.is_empty() {
        errors.push(ValidationError::EmptyKey);
    }
    if config.check.modes.is_empty() {
        errors.push(ValidationError::NoModes);
    }
    let mut seen = HashSet::new();
    for mode in &config.check.modes {
        if !seen.insert(*mode) {
            errors.push(ValidationError::DuplicateMode(*mode));
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
