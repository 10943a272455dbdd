//! Chainlink Functions request client.
//!
//! Submits off-chain computation requests through a consumer contract,
//! hosts their encrypted secrets, and reads back the fulfillment.

pub mod blockchain;
pub mod config;
pub mod error;
pub mod fulfillment;
pub mod observability;
pub mod request;
pub mod secrets;
pub mod subscription;

pub use config::schema::ClientConfig;
pub use error::{FunctionsError, FunctionsResult};
pub use fulfillment::{decode_result, Fulfillment, FulfillmentReader};
pub use request::{execute_request, RequestSubmitter};
pub use secrets::SecretsReferenceResolver;
