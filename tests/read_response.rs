//! Reading fulfillments through a consumer contract.

use alloy::primitives::{Bytes, U256};

use functions_client::fulfillment::{DecodedValue, Fulfillment, FulfillmentReader};
use functions_client::request::ReturnType;
use functions_client::FunctionsError;

mod common;
use common::FakeConsumer;

#[tokio::test]
async fn test_nothing_stored_is_pending() {
    let reader = FulfillmentReader::new(FakeConsumer::default(), ReturnType::Uint256);
    assert_eq!(reader.read().await.unwrap(), Fulfillment::Pending);
}

#[tokio::test]
async fn test_listener_count_response() {
    let consumer = FakeConsumer {
        response: Bytes::copy_from_slice(&U256::from(1_042_877u64).to_be_bytes::<32>()),
        ..Default::default()
    };
    let reader = FulfillmentReader::new(consumer, ReturnType::Uint256);

    match reader.read().await.unwrap() {
        Fulfillment::Fulfilled { value, .. } => {
            assert_eq!(value, DecodedValue::Uint256(U256::from(1_042_877u64)));
            assert_eq!(value.to_string(), "1042877");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_script_error_is_reported() {
    let consumer = FakeConsumer {
        error: Bytes::from_static(b"Artist not found"),
        ..Default::default()
    };
    let reader = FulfillmentReader::new(consumer, ReturnType::Uint256);

    assert_eq!(
        reader.read().await.unwrap(),
        Fulfillment::Failed("Artist not found".to_string())
    );
}

#[tokio::test]
async fn test_wrong_expected_type() {
    let consumer = FakeConsumer {
        response: Bytes::from_static(b"Tones and I"),
        ..Default::default()
    };
    let reader = FulfillmentReader::new(consumer, ReturnType::Int256);

    assert!(matches!(reader.read().await, Err(FunctionsError::Decode(_))));
}
