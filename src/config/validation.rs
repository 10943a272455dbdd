//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default network exists)
//! - Validate value ranges (timeouts > 0, gas limits > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;
use std::fmt;

use crate::config::schema::{ClientConfig, NetworkConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `networks.sepolia.rpc_url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(name) = &config.default_network {
        if !config.networks.contains_key(name) {
            errors.push(ValidationError::new(
                "default_network",
                format!("network '{}' is not defined", name),
            ));
        }
    }

    for (name, network) in &config.networks {
        validate_network(name, network, &mut errors);
    }

    if config.request.callback_gas_limit == 0 {
        errors.push(ValidationError::new("request.callback_gas_limit", "must be > 0"));
    }
    if config.request.request_gas_limit == 0 {
        errors.push(ValidationError::new("request.request_gas_limit", "must be > 0"));
    }

    if let Err(e) = config.gist.api_base.parse::<url::Url>() {
        errors.push(ValidationError::new("gist.api_base", format!("invalid URL: {}", e)));
    }
    if config.gist.timeout_secs == 0 {
        errors.push(ValidationError::new("gist.timeout_secs", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(name: &str, network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    let field = |f: &str| format!("networks.{}.{}", name, f);

    if let Err(e) = network.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(field("rpc_url"), format!("invalid URL: {}", e)));
    }
    for url in &network.failover_urls {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(
                field("failover_urls"),
                format!("invalid URL '{}'", url),
            ));
        }
    }
    if network.chain_id == 0 {
        errors.push(ValidationError::new(field("chain_id"), "must be > 0"));
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(field("rpc_timeout_secs"), "must be > 0"));
    }
    if network.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(field("confirmation_timeout_secs"), "must be > 0"));
    }
    if network.functions_router.parse::<Address>().is_err() {
        errors.push(ValidationError::new(field("functions_router"), "not a valid address"));
    }
    if network.link_token.parse::<Address>().is_err() {
        errors.push(ValidationError::new(field("link_token"), "not a valid address"));
    }
    // DON ids are packed into a bytes32 with a trailing zero byte.
    if network.don_id.is_empty() || network.don_id.len() > 31 {
        errors.push(ValidationError::new(field("don_id"), "must be 1 to 31 bytes long"));
    }
}
