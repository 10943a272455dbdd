//! Fulfillment reading and result decoding.

pub mod decode;
pub mod reader;

pub use decode::{decode_bytes, decode_result, DecodedValue};
pub use reader::{interpret, Fulfillment, FulfillmentReader};
