//! On-chain subscription lookups through the Functions router.

use alloy::primitives::{Address, Bytes, U256};

use crate::blockchain::client::ChainClient;
use crate::blockchain::contracts::{FunctionsCoordinator, FunctionsRouter};
use crate::blockchain::types::{don_id_bytes32, parse_address};
use crate::error::FunctionsResult;
use crate::subscription::types::{CostParams, SubscriptionInfo};
use crate::subscription::{GasOracle, SubscriptionSource};

/// Subscription source backed by the router and the DON's coordinator.
#[derive(Debug, Clone)]
pub struct RouterSubscriptions {
    client: ChainClient,
    router: Address,
}

impl RouterSubscriptions {
    pub fn new(client: ChainClient, router: Address) -> Self {
        Self { client, router }
    }

    /// Build from the network's configured router address.
    pub fn from_network(client: ChainClient) -> FunctionsResult<Self> {
        let router = parse_address("router address", &client.config().functions_router)?;
        Ok(Self::new(client, router))
    }

    /// Resolve the coordinator contract serving `don_id`.
    pub async fn coordinator(&self, don_id: &str) -> FunctionsResult<Address> {
        let router = FunctionsRouter::new(self.router, self.client.provider().clone());
        let id = don_id_bytes32(don_id)?;
        let coordinator = self
            .client
            .call("getContractById", router.getContractById(id).call())
            .await?;
        tracing::debug!(don_id = %don_id, coordinator = %coordinator, "Resolved DON coordinator");
        Ok(coordinator)
    }
}

impl SubscriptionSource for RouterSubscriptions {
    async fn subscription_info(&self, subscription_id: u64) -> FunctionsResult<SubscriptionInfo> {
        let router = FunctionsRouter::new(self.router, self.client.provider().clone());
        let sub = self
            .client
            .call("getSubscription", router.getSubscription(subscription_id).call())
            .await?;

        tracing::debug!(
            subscription_id = subscription_id,
            consumers = sub.consumers.len(),
            "Fetched subscription"
        );

        Ok(SubscriptionInfo {
            id: subscription_id,
            balance_juels: U256::from(sub.balance),
            authorized_consumers: sub.consumers,
        })
    }

    async fn estimate_request_cost(&self, params: &CostParams) -> FunctionsResult<U256> {
        let coordinator_address = self.coordinator(&params.don_id).await?;
        let coordinator =
            FunctionsCoordinator::new(coordinator_address, self.client.provider().clone());
        let cost = self
            .client
            .call(
                "estimateCost",
                coordinator
                    .estimateCost(
                        params.subscription_id,
                        Bytes::new(),
                        params.callback_gas_limit,
                        U256::from(params.gas_price_wei),
                    )
                    .call(),
            )
            .await?;
        Ok(U256::from(cost))
    }
}

impl GasOracle for ChainClient {
    async fn gas_price_wei(&self) -> FunctionsResult<u128> {
        Ok(self.get_gas_price().await?)
    }
}
