//! RecordLabel deployment.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolValue;
use serde::Deserialize;
use std::path::Path;

use crate::blockchain::client::ChainClient;
use crate::blockchain::transaction::{TxOverrides, TxSender};
use crate::blockchain::types::{don_id_bytes32, parse_address, ChainError};
use crate::error::{FunctionsError, FunctionsResult};

/// The part of a compiled contract artifact needed to deploy it.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    #[serde(default, rename = "contractName")]
    pub contract_name: Option<String>,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn load(path: &Path) -> FunctionsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> FunctionsResult<Self> {
        let artifact: Self = serde_json::from_str(text)
            .map_err(|e| FunctionsError::Config(format!("invalid contract artifact: {}", e)))?;
        if artifact.bytecode.is_empty() {
            return Err(FunctionsError::Config(
                "contract artifact has no bytecode (abstract contract or interface?)".to_string(),
            ));
        }
        Ok(artifact)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
}

/// Creation code for `RecordLabel(router, donId, stableCoin)`.
pub fn record_label_init_code(
    artifact: &ContractArtifact,
    router: Address,
    don_id: &str,
    stable_coin: Address,
) -> FunctionsResult<Bytes> {
    let don_id = don_id_bytes32(don_id)?;
    let mut code = artifact.bytecode.to_vec();
    code.extend_from_slice(&(router, don_id, stable_coin).abi_encode_params());
    Ok(Bytes::from(code))
}

/// Deploy RecordLabel wired to the network's router and DON.
pub async fn deploy_record_label(
    client: &ChainClient,
    artifact: &ContractArtifact,
    stable_coin: Address,
) -> FunctionsResult<Deployment> {
    let config = client.config();
    let router = parse_address("router address", &config.functions_router)?;
    let code = record_label_init_code(artifact, router, &config.don_id, stable_coin)?;
    let overrides = TxOverrides::from_network(config);

    tracing::info!(
        network = %client.network_name(),
        router = %config.functions_router,
        don_id = %config.don_id,
        "Deploying RecordLabel"
    );

    let tx = TransactionRequest::default().with_deploy_code(code);
    let receipt = TxSender::new(client.clone()).send(tx, &overrides).await?;
    let address = receipt.contract_address.ok_or_else(|| {
        ChainError::Contract {
            call: "deploy",
            message: format!("receipt of {} has no contract address", receipt.transaction_hash),
        }
    })?;

    Ok(Deployment {
        address,
        transaction_hash: receipt.transaction_hash,
    })
}
