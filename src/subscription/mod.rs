//! Subscription billing lookups.
//!
//! # Data Flow
//! ```text
//! subscription id
//!     → SubscriptionSource::subscription_info (balance, consumers)
//! don id + gas price (GasOracle) + callback gas limit
//!     → SubscriptionSource::estimate_request_cost (juels)
//! ```

pub mod manager;
pub mod types;

pub use manager::RouterSubscriptions;
pub use types::{CostEstimate, CostParams, SubscriptionInfo};

use alloy::primitives::U256;

use crate::error::FunctionsResult;

/// Read access to Functions billing subscriptions.
#[allow(async_fn_in_trait)]
pub trait SubscriptionSource {
    /// Fetch balance and authorized consumers of a subscription.
    async fn subscription_info(&self, subscription_id: u64) -> FunctionsResult<SubscriptionInfo>;

    /// Estimate what one fulfillment would charge, in juels.
    async fn estimate_request_cost(&self, params: &CostParams) -> FunctionsResult<U256>;
}

/// Source of the current gas price.
#[allow(async_fn_in_trait)]
pub trait GasOracle {
    async fn gas_price_wei(&self) -> FunctionsResult<u128>;
}
