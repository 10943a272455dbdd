//! RecordLabel consumer contract access.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, Log, B256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::{SolCall, SolEvent};

use crate::blockchain::client::ChainClient;
use crate::blockchain::contracts::RecordLabel;
use crate::blockchain::transaction::{TxOverrides, TxSender};
use crate::error::{FunctionsError, FunctionsResult};
use crate::request::types::{RequestPayload, RequestReceipt};
use crate::request::ConsumerContract;

/// A deployed RecordLabel consumer.
#[derive(Debug, Clone)]
pub struct RecordLabelConsumer {
    client: ChainClient,
    address: Address,
}

impl RecordLabelConsumer {
    pub fn new(client: ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn instance(&self) -> RecordLabel::RecordLabelInstance<alloy::providers::DynProvider> {
        RecordLabel::new(self.address, self.client.provider().clone())
    }
}

impl ConsumerContract for RecordLabelConsumer {
    async fn send_request(
        &self,
        payload: &RequestPayload,
        overrides: &TxOverrides,
    ) -> FunctionsResult<RequestReceipt> {
        let call = RecordLabel::sendRequestCall {
            source: payload.source.clone(),
            secretsLocation: payload.secrets_location.as_u8(),
            encryptedSecretsReferences: payload.encrypted_secrets_reference.clone(),
            args: payload.args.clone(),
            bytesArgs: payload.bytes_args.clone(),
            subscriptionId: payload.subscription_id,
            callbackGasLimit: payload.callback_gas_limit,
        };
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::from(call.abi_encode()));

        let receipt = TxSender::new(self.client.clone()).send(tx, overrides).await?;
        let logs: Vec<Log> = receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect();

        let request_id = request_id_from_logs(self.address, &logs).ok_or(
            FunctionsError::EventNotFound {
                tx_hash: receipt.transaction_hash,
            },
        )?;

        Ok(RequestReceipt {
            request_id,
            transaction_hash: receipt.transaction_hash,
        })
    }

    async fn latest_error(&self) -> FunctionsResult<Bytes> {
        let contract = self.instance();
        Ok(self
            .client
            .call("latestError", contract.latestError().call())
            .await?)
    }

    async fn latest_response(&self) -> FunctionsResult<Bytes> {
        let contract = self.instance();
        Ok(self
            .client
            .call("latestResponse", contract.latestResponse().call())
            .await?)
    }
}

/// Find the request id in the `RequestSent` event emitted by `consumer`.
pub fn request_id_from_logs(consumer: Address, logs: &[Log]) -> Option<B256> {
    logs.iter()
        .filter(|log| log.address == consumer)
        .find_map(|log| match log.topics() {
            [signature, id, ..] if *signature == RecordLabel::RequestSent::SIGNATURE_HASH => {
                Some(*id)
            }
            _ => None,
        })
}
