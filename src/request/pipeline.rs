//! End-to-end request execution.

use crate::error::FunctionsResult;
use crate::request::config::RequestConfig;
use crate::request::confirm::Confirmation;
use crate::request::submitter::RequestSubmitter;
use crate::request::types::RequestReceipt;
use crate::request::ConsumerContract;
use crate::secrets::{EncryptedSecretsReference, GistStore, SecretsEncryptor, SecretsReferenceResolver};
use crate::subscription::types::CostEstimate;
use crate::subscription::{GasOracle, SubscriptionSource};

/// What `execute_request` produced.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub receipt: RequestReceipt,
    pub estimate: CostEstimate,
    /// Gist holding the encrypted secrets. It stays online until deleted.
    pub gist_url: Option<String>,
}

/// Preflight, resolve secrets, then send.
///
/// `load_bundle` is only called when the request carries secrets. A failure
/// after the transaction is sent leaves it sent; nothing is rolled back.
pub async fn execute_request<S, C, G, P, St, E, L>(
    submitter: &RequestSubmitter<S, C, G, P>,
    resolver: &SecretsReferenceResolver<St, E>,
    request: &RequestConfig,
    load_bundle: L,
) -> FunctionsResult<ExecutionOutcome>
where
    S: SubscriptionSource,
    C: ConsumerContract,
    G: GasOracle,
    P: Confirmation,
    St: GistStore,
    E: SecretsEncryptor,
    L: FnOnce() -> FunctionsResult<String>,
{
    let estimate = submitter.preflight().await?;

    let reference = if request.has_secrets() {
        let bundle = load_bundle()?;
        resolver.resolve(request.secrets_location, &bundle).await?
    } else {
        tracing::debug!("Request has no secrets, sending an empty reference");
        EncryptedSecretsReference::empty()
    };

    let receipt = submitter.send(request, &reference).await?;

    Ok(ExecutionOutcome {
        receipt,
        estimate,
        gist_url: reference.urls.into_iter().next(),
    })
}
