//! Request preflight checks and submission.

use alloy::primitives::Address;

use crate::blockchain::transaction::TxOverrides;
use crate::error::{FunctionsError, FunctionsResult};
use crate::request::config::RequestConfig;
use crate::request::confirm::Confirmation;
use crate::request::types::{Location, RequestPayload, RequestReceipt};
use crate::request::ConsumerContract;
use crate::secrets::EncryptedSecretsReference;
use crate::subscription::types::{format_link, CostEstimate, CostParams};
use crate::subscription::{GasOracle, SubscriptionSource};

/// Per-invocation submission settings.
#[derive(Debug, Clone)]
pub struct SubmitParams {
    /// Consumer contract that sends the request and pays from the subscription.
    pub consumer: Address,
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub don_id: String,
    /// Applied to the `sendRequest` transaction. Gas estimation is unreliable
    /// for this call, so callers set a manual gas limit here.
    pub overrides: TxOverrides,
}

/// Validates subscription preconditions, then submits requests.
pub struct RequestSubmitter<S, C, G, P> {
    subscriptions: S,
    consumer: C,
    gas: G,
    confirmation: P,
    params: SubmitParams,
}

impl<S, C, G, P> RequestSubmitter<S, C, G, P>
where
    S: SubscriptionSource,
    C: ConsumerContract,
    G: GasOracle,
    P: Confirmation,
{
    pub fn new(subscriptions: S, consumer: C, gas: G, confirmation: P, params: SubmitParams) -> Self {
        Self {
            subscriptions,
            consumer,
            gas,
            confirmation,
            params,
        }
    }

    /// Check authorization, funding and operator consent, in that order.
    pub async fn preflight(&self) -> FunctionsResult<CostEstimate> {
        let subscription_id = self.params.subscription_id;
        let info = self.subscriptions.subscription_info(subscription_id).await?;

        if !info.is_authorized(&self.params.consumer) {
            return Err(FunctionsError::UnauthorizedConsumer {
                consumer: self.params.consumer,
                subscription_id,
            });
        }

        let gas_price_wei = self.gas.gas_price_wei().await?;
        let estimated_juels = self
            .subscriptions
            .estimate_request_cost(&CostParams {
                don_id: self.params.don_id.clone(),
                subscription_id,
                callback_gas_limit: self.params.callback_gas_limit,
                gas_price_wei,
            })
            .await?;

        tracing::info!(
            subscription_id = subscription_id,
            gas_price_wei = gas_price_wei,
            estimated_juels = %estimated_juels,
            balance_juels = %info.balance_juels,
            "Estimated request cost"
        );

        if info.balance_juels <= estimated_juels {
            return Err(FunctionsError::InsufficientFunds {
                subscription_id,
                estimated_juels,
                available_juels: info.balance_juels,
            });
        }

        let prompt = format!(
            "If the request's callback uses all {} gas, this request will charge the subscription an estimated {} LINK",
            with_thousands_separators(self.params.callback_gas_limit.into()),
            format_link(&estimated_juels)
        );
        if !self.confirmation.confirm(&prompt).await? {
            return Err(FunctionsError::UserAborted);
        }

        Ok(CostEstimate {
            estimated_juels,
            balance_juels: info.balance_juels,
        })
    }

    /// Submit the request transaction.
    ///
    /// A request without secrets always goes out as `Remote` with an empty
    /// reference.
    pub async fn send(
        &self,
        request: &RequestConfig,
        reference: &EncryptedSecretsReference,
    ) -> FunctionsResult<RequestReceipt> {
        let secrets_location = if request.has_secrets() {
            request.secrets_location
        } else {
            Location::Remote
        };

        if request.has_secrets() {
            match secrets_location {
                Location::Remote if reference.is_empty() => {
                    return Err(FunctionsError::MissingSecretsReference)
                }
                Location::Remote => {}
                other => return Err(FunctionsError::UnsupportedLocation(other)),
            }
        }

        let payload = RequestPayload {
            source: request.source.clone(),
            secrets_location,
            encrypted_secrets_reference: reference.encrypted.clone(),
            args: request.args.clone(),
            bytes_args: request.bytes_args.clone(),
            subscription_id: self.params.subscription_id,
            callback_gas_limit: self.params.callback_gas_limit,
        };

        tracing::info!(
            consumer = %self.params.consumer,
            subscription_id = self.params.subscription_id,
            secrets_location = %secrets_location,
            "Sending Functions request"
        );

        let receipt = self
            .consumer
            .send_request(&payload, &self.params.overrides)
            .await?;

        tracing::info!(
            request_id = %receipt.request_id,
            tx_hash = %receipt.transaction_hash,
            "Request sent"
        );
        Ok(receipt)
    }

    pub fn params(&self) -> &SubmitParams {
        &self.params
    }
}

/// Format an integer as `1,500,000`.
fn with_thousands_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
