//! Reads the last fulfillment stored by a consumer contract.

use alloy::primitives::Bytes;

use crate::error::FunctionsResult;
use crate::fulfillment::decode::{decode_bytes, DecodedValue};
use crate::request::types::ReturnType;
use crate::request::ConsumerContract;

/// State of the consumer's most recent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfillment {
    /// Neither a response nor an error has been written yet.
    Pending,
    Fulfilled { raw: Bytes, value: DecodedValue },
    /// The DON reported an error, decoded as UTF-8.
    Failed(String),
}

pub struct FulfillmentReader<C> {
    consumer: C,
    expected: ReturnType,
}

impl<C: ConsumerContract> FulfillmentReader<C> {
    pub fn new(consumer: C, expected: ReturnType) -> Self {
        Self { consumer, expected }
    }

    /// Read and decode `latestError` / `latestResponse`.
    ///
    /// A response that does not match the expected type is a `Decode` error.
    pub async fn read(&self) -> FunctionsResult<Fulfillment> {
        let error = self.consumer.latest_error().await?;
        let response = self.consumer.latest_response().await?;
        let fulfillment = interpret(&error, &response, self.expected)?;

        match &fulfillment {
            Fulfillment::Pending => tracing::info!("No fulfillment stored yet"),
            Fulfillment::Fulfilled { raw, .. } => {
                tracing::debug!(bytes = raw.len(), return_type = %self.expected, "Fulfillment decoded")
            }
            Fulfillment::Failed(message) => tracing::warn!(error = %message, "Request failed"),
        }
        Ok(fulfillment)
    }
}

/// Classify stored error/response bytes. An error takes precedence.
pub fn interpret(error: &[u8], response: &[u8], expected: ReturnType) -> FunctionsResult<Fulfillment> {
    if !error.is_empty() {
        return Ok(Fulfillment::Failed(String::from_utf8_lossy(error).into_owned()));
    }
    if response.is_empty() {
        return Ok(Fulfillment::Pending);
    }
    Ok(Fulfillment::Fulfilled {
        raw: Bytes::copy_from_slice(response),
        value: decode_bytes(response, expected)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FunctionsError;
    use alloy::primitives::U256;

    #[test]
    fn test_empty_is_pending() {
        assert_eq!(interpret(&[], &[], ReturnType::Uint256).unwrap(), Fulfillment::Pending);
    }

    #[test]
    fn test_error_wins_over_response() {
        let result = interpret(b"insufficient data", &[0u8; 32], ReturnType::Uint256).unwrap();
        assert_eq!(result, Fulfillment::Failed("insufficient data".to_string()));
    }

    #[test]
    fn test_fulfilled_uint() {
        let response = U256::from(1_000_000u64).to_be_bytes::<32>();
        match interpret(&[], &response, ReturnType::Uint256).unwrap() {
            Fulfillment::Fulfilled { raw, value } => {
                assert_eq!(raw.len(), 32);
                assert_eq!(value, DecodedValue::Uint256(U256::from(1_000_000u64)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let err = interpret(&[], b"hello", ReturnType::Uint256).unwrap_err();
        assert!(matches!(err, FunctionsError::Decode(_)));
    }
}
