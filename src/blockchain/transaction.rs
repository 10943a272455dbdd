//! Transaction sending and confirmation monitoring.
//!
//! # Responsibilities
//! - Apply manual overrides (gas limit, gas price, nonce)
//! - Sign and broadcast transactions through the wallet-backed provider
//! - Monitor confirmations

use alloy::network::TransactionBuilder;
use alloy::primitives::TxHash;
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, NetworkConfig};

/// Manual transaction parameters that bypass provider estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOverrides {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
    pub nonce: Option<u64>,
}

impl TxOverrides {
    /// Overrides pinned by the network configuration.
    pub fn from_network(config: &NetworkConfig) -> Self {
        Self {
            gas_limit: None,
            gas_price: config.gas_price,
            nonce: config.nonce,
        }
    }

    /// Set a manual gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Apply the overrides to a transaction request.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(gas_limit) = self.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }
        if let Some(gas_price) = self.gas_price {
            tx = tx.with_gas_price(gas_price);
        }
        if let Some(nonce) = self.nonce {
            tx = tx.with_nonce(nonce);
        }
        tx
    }
}

/// Sends transactions and waits for them to confirm.
#[derive(Debug, Clone)]
pub struct TxSender {
    client: ChainClient,
}

impl TxSender {
    /// Create a new transaction sender. The client must carry a wallet.
    pub fn new(client: ChainClient) -> Self {
        Self { client }
    }

    /// Broadcast a transaction and return its confirmed receipt.
    pub async fn send(
        &self,
        tx: TransactionRequest,
        overrides: &TxOverrides,
    ) -> ChainResult<TransactionReceipt> {
        let from = self.client.signer_address()?;
        let tx = overrides.apply(tx.with_from(from));

        let pending = self
            .client
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::Rpc(format!("Failed to send transaction: {}", e)))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            network = %self.client.network_name(),
            "Transaction broadcast"
        );

        let receipt = self
            .wait_for_confirmation(tx_hash, self.client.config().confirmation_timeout_secs)
            .await?;
        if !receipt.status() {
            return Err(ChainError::Reverted(tx_hash.to_string()));
        }
        Ok(receipt)
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait for confirmation
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> ChainResult<TransactionReceipt> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_duration = Duration::from_secs(timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                // A mined transaction counts as one confirmation.
                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

                if !receipt.status() || confirmations >= required_confirmations {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(ChainError::ConfirmationTimeout(required_confirmations)),
        }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &ChainClient {
        &self.client
    }
}
