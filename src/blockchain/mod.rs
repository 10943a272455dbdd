//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials (PRIVATE_KEY)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (overrides, broadcast, confirm)
//!     → consumer.rs / deploy.rs (RecordLabel calls and deployment)
//! ```
//!
//! # Security Constraints
//! - Private keys only come from the captured environment
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod consumer;
pub mod contracts;
pub mod deploy;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use consumer::RecordLabelConsumer;
pub use deploy::{deploy_record_label, ContractArtifact, Deployment};
pub use transaction::{TxOverrides, TxSender};
pub use types::{ChainError, ChainId, ChainResult};
pub use wallet::Wallet;
