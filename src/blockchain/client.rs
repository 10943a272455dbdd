//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint(s), optionally with a signing wallet
//! - Query chain state (chain id, block number, gas price, receipts)
//! - Handle timeouts and network errors gracefully

use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ChainError, ChainId, ChainResult, NetworkConfig};
use crate::blockchain::wallet::Wallet;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct ChainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Name of the configured network.
    network_name: String,
    /// Network configuration.
    config: NetworkConfig,
    /// Address of the signing wallet, if one was attached.
    signer: Option<Address>,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client.
    ///
    /// # Arguments
    /// * `network_name` - Name of the network, used in log output
    /// * `config` - Network configuration
    /// * `wallet` - Signer for write operations; `None` for read-only use
    pub async fn connect(
        network_name: &str,
        config: NetworkConfig,
        wallet: Option<&Wallet>,
    ) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        // 1. Add primary provider
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(build_provider(primary_url, wallet));

        // 2. Add failover providers
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(build_provider(url, wallet));
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            network_name: network_name.to_string(),
            config: config.clone(),
            signer: wallet.map(Wallet::address),
            timeout_duration,
        };

        // Verify chain ID matches configuration
        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    network = %network_name,
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    network = %network_name,
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_block_number();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_receipt(tx_hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Get current gas price in wei.
    ///
    /// A fixed `gas_price` in the network config takes precedence.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        if let Some(price) = self.config.gas_price {
            return Ok(price);
        }
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_gas_price();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get gas price".to_string()))
    }

    /// Run a contract call against the primary provider under the RPC timeout.
    pub async fn call<T, E, F>(&self, call: &'static str, fut: F) -> ChainResult<T>
    where
        E: Display,
        F: IntoFuture<Output = Result<T, E>>,
    {
        match timeout(self.timeout_duration, fut.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Contract {
                call,
                message: e.to_string(),
            }),
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Get the underlying primary provider.
    pub fn provider(&self) -> &DynProvider {
        &self.providers[0]
    }

    /// Address of the attached signer.
    pub fn signer_address(&self) -> ChainResult<Address> {
        self.signer
            .ok_or_else(|| ChainError::Wallet("No signing wallet attached".to_string()))
    }

    /// Get the network name.
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }
}

fn build_provider(url: url::Url, wallet: Option<&Wallet>) -> DynProvider {
    match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased(),
        None => ProviderBuilder::new().connect_http(url).erased(),
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("network", &self.network_name)
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_client_creation() {
        // Client creation should succeed even if RPC is unreachable
        let result = ChainClient::connect("localFunctionsTestnet", test_config(), None).await;
        assert!(result.is_ok());
        assert!(result.unwrap().signer_address().is_err());
    }

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = ChainClient::connect("broken", config, None).await;
        assert!(result.unwrap_err().to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut config = test_config();
        config.failover_urls.push("http://invalid:8545".to_string());

        let client = ChainClient::connect("local", config, None).await.unwrap();

        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All RPC providers failed"));
    }

    #[tokio::test]
    async fn test_fixed_gas_price_skips_rpc() {
        let mut config = test_config();
        config.gas_price = Some(20_000_000_000);
        let client = ChainClient::connect("local", config, None).await.unwrap();
        assert_eq!(client.get_gas_price().await.unwrap(), 20_000_000_000);
    }
}
