//! Request submission subsystem.
//!
//! # Data Flow
//! ```text
//! RequestConfig (request file + environment)
//!     → submitter.rs preflight: consumer authorized? funded? operator confirms?
//!     → secrets::SecretsReferenceResolver (gist upload + URL encryption)
//!     → submitter.rs send: ConsumerContract::send_request
//!     → RequestReceipt (request id from the RequestSent event)
//! ```
//!
//! pipeline.rs strings these steps together for the `execute-request` command.

pub mod config;
pub mod confirm;
pub mod pipeline;
pub mod submitter;
pub mod types;

pub use config::RequestConfig;
pub use confirm::{AlwaysConfirm, Confirmation, ConsolePrompt};
pub use pipeline::{execute_request, ExecutionOutcome};
pub use submitter::{RequestSubmitter, SubmitParams};
pub use types::{CodeLanguage, Location, RequestPayload, RequestReceipt, ReturnType};

use alloy::primitives::Bytes;

use crate::blockchain::transaction::TxOverrides;
use crate::error::FunctionsResult;

/// Operations of a Functions consumer contract.
#[allow(async_fn_in_trait)]
pub trait ConsumerContract {
    /// Send a request transaction and return its request id.
    async fn send_request(
        &self,
        payload: &RequestPayload,
        overrides: &TxOverrides,
    ) -> FunctionsResult<RequestReceipt>;

    /// Error bytes stored by the last fulfillment.
    async fn latest_error(&self) -> FunctionsResult<Bytes>;

    /// Response bytes stored by the last fulfillment.
    async fn latest_response(&self) -> FunctionsResult<Bytes>;
}
