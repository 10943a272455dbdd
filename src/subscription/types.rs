//! Subscription billing types.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Information about a Functions billing subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    pub id: u64,
    /// Spendable balance in juels.
    pub balance_juels: U256,
    /// Consumer contracts allowed to bill this subscription.
    pub authorized_consumers: Vec<Address>,
}

impl SubscriptionInfo {
    /// Whether `consumer` may bill this subscription.
    ///
    /// Addresses compare by value, so checksum casing never matters.
    pub fn is_authorized(&self, consumer: &Address) -> bool {
        self.authorized_consumers.contains(consumer)
    }
}

/// Inputs to the fulfillment cost estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostParams {
    pub don_id: String,
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub gas_price_wei: u128,
}

/// Outcome of a successful funding check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    pub estimated_juels: U256,
    pub balance_juels: U256,
}

/// Format a juels amount as LINK (18 decimals).
pub fn format_link(juels: &U256) -> String {
    format_ether(*juels)
}
