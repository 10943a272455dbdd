//! Errors surfaced by the request lifecycle.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::types::ChainError;
use crate::request::types::Location;
use crate::subscription::types::format_link;

/// Errors that can occur while configuring, submitting or reading a request.
#[derive(Debug, Error)]
pub enum FunctionsError {
    /// The secrets location cannot be used when submitting a request.
    #[error("{0} encrypted secrets are not supported for requests")]
    UnsupportedLocation(Location),

    /// A credential required by the operation is missing.
    #[error("{0} environment variable is required but not set")]
    MissingCredential(&'static str),

    /// The consumer contract is not registered on the subscription.
    #[error("Consumer contract {consumer} has not been added to subscription {subscription_id}")]
    UnauthorizedConsumer { consumer: Address, subscription_id: u64 },

    /// The subscription balance does not cover the estimated cost.
    #[error(
        "Subscription {subscription_id} does not have sufficient funds. The estimated cost is {} LINK, but the subscription only has {} LINK",
        format_link(.estimated_juels),
        format_link(.available_juels)
    )]
    InsufficientFunds {
        subscription_id: u64,
        estimated_juels: U256,
        available_juels: U256,
    },

    /// The operator declined the cost confirmation.
    #[error("Request aborted by user")]
    UserAborted,

    /// The request transaction receipt carried no `RequestSent` event.
    #[error("RequestSent event not found in receipt of transaction {tx_hash}")]
    EventNotFound { tx_hash: TxHash },

    /// Raw result bytes do not match the expected return type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A third-party HTTP API failed. The raw body is kept for diagnostics.
    #[error("{service} API error{}: {message}", .status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    UpstreamApi {
        service: &'static str,
        status: Option<u16>,
        message: String,
        payload: String,
    },

    /// Remote secrets were configured but no encrypted reference was produced.
    #[error("Request has Remote secrets but no encrypted secrets reference")]
    MissingSecretsReference,

    /// The URL does not point at a gist.
    #[error("Invalid gist URL: {0}")]
    InvalidGistUrl(String),

    /// Secrets encryption failed.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Invalid configuration or request config file.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Result type for request lifecycle operations.
pub type FunctionsResult<T> = Result<T, FunctionsError>;

impl FunctionsError {
    pub(crate) fn upstream(service: &'static str, err: reqwest::Error) -> Self {
        Self::UpstreamApi {
            service,
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            payload: String::new(),
        }
    }
}
