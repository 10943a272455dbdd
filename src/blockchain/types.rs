//! Chain-specific types and error definitions.

use alloy::primitives::{Address, B256};
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u32),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or missing key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// A contract call failed or returned undecodable data.
    #[error("Contract call {call} failed: {message}")]
    Contract { call: &'static str, message: String },

    /// An address or identifier could not be parsed.
    #[error("Invalid {kind}: {value}")]
    InvalidInput { kind: &'static str, value: String },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Parse a hex address, naming what it is on failure.
pub fn parse_address(kind: &'static str, value: &str) -> ChainResult<Address> {
    value.trim().parse().map_err(|_| ChainError::InvalidInput {
        kind,
        value: value.to_string(),
    })
}

/// Pack a DON id string into the bytes32 the router expects.
///
/// The string is UTF-8 encoded and right-padded with zeros. At most 31 bytes
/// fit, leaving room for the terminating zero.
pub fn don_id_bytes32(don_id: &str) -> ChainResult<B256> {
    let bytes = don_id.as_bytes();
    if bytes.is_empty() || bytes.len() > 31 {
        return Err(ChainError::InvalidInput {
            kind: "DON id",
            value: don_id.to_string(),
        });
    }
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(B256::from(out))
}
