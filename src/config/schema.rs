//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the Functions client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Network used when `--network` is not given.
    pub default_network: Option<String>,

    /// Network definitions keyed by name (e.g. "ethereumSepolia").
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Defaults applied to every Functions request.
    pub request: RequestDefaults,

    /// Remote secrets hosting.
    pub gist: GistConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ClientConfig {
    /// Look up a network by name, falling back to `default_network`.
    pub fn network(&self, name: Option<&str>) -> Option<(&str, &NetworkConfig)> {
        let name = name.or(self.default_network.as_deref())?;
        self.networks
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Chain and Functions deployment settings for one network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 11155111 for Sepolia).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations to wait for after sending a transaction.
    pub confirmation_blocks: u32,

    /// Upper bound on the confirmation wait in seconds.
    pub confirmation_timeout_secs: u64,

    /// Address of the Functions router contract.
    pub functions_router: String,

    /// Address of the LINK token contract.
    pub link_token: String,

    /// DON identifier (e.g. "fun-ethereum-sepolia-1").
    pub don_id: String,

    /// Fixed gas price in wei, used instead of the provider's estimate.
    pub gas_price: Option<u128>,

    /// Fixed nonce, used instead of the pending transaction count.
    pub nonce: Option<u64>,

    /// Block explorer base URL, e.g. "https://sepolia.etherscan.io/".
    pub explorer_url: Option<String>,
}

impl NetworkConfig {
    /// Explorer link for a transaction, if an explorer is configured.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.explorer_url
            .as_deref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 300,
            functions_router: String::new(),
            link_token: String::new(),
            don_id: String::new(),
            gas_price: None,
            nonce: None,
            explorer_url: None,
        }
    }
}

/// Request defaults, overridable per CLI invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Maximum gas the fulfillment callback may use.
    pub callback_gas_limit: u32,

    /// Manual gas limit for the `sendRequest` transaction.
    pub request_gas_limit: u64,

    /// Path to the request config file.
    pub request_config_path: String,

    /// Path to the locally encrypted secrets bundle.
    pub encrypted_secrets_path: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            callback_gas_limit: 100_000,
            request_gas_limit: 1_500_000,
            request_config_path: "Functions-request.toml".to_string(),
            encrypted_secrets_path: "offchain-encrypted-secrets.json".to_string(),
        }
    }
}

/// Gist API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GistConfig {
    /// Base URL of the GitHub REST API.
    pub api_base: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
