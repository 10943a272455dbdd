//! Result decoding per expected return type.

use alloy::hex;
use alloy::primitives::{Bytes, I256, U256};
use std::fmt;

use crate::error::{FunctionsError, FunctionsResult};
use crate::request::types::ReturnType;

/// A decoded fulfillment response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Uint256(U256),
    Int256(I256),
    String(String),
    Bytes(Bytes),
}

impl DecodedValue {
    /// Encode the value the way the off-chain script returns it.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            DecodedValue::Uint256(v) => Bytes::copy_from_slice(&v.to_be_bytes::<32>()),
            DecodedValue::Int256(v) => Bytes::copy_from_slice(&v.into_raw().to_be_bytes::<32>()),
            DecodedValue::String(s) => Bytes::from(s.clone().into_bytes()),
            DecodedValue::Bytes(b) => b.clone(),
        }
    }

    pub fn return_type(&self) -> ReturnType {
        match self {
            DecodedValue::Uint256(_) => ReturnType::Uint256,
            DecodedValue::Int256(_) => ReturnType::Int256,
            DecodedValue::String(_) => ReturnType::String,
            DecodedValue::Bytes(_) => ReturnType::Bytes,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint256(v) => write!(f, "{}", v),
            DecodedValue::Int256(v) => write!(f, "{}", v),
            DecodedValue::String(s) => f.write_str(s),
            DecodedValue::Bytes(b) => write!(f, "{}", b),
        }
    }
}

/// Decode a `0x`-prefixed hex result.
pub fn decode_result(result_hex: &str, expected: ReturnType) -> FunctionsResult<DecodedValue> {
    let digits = result_hex
        .strip_prefix("0x")
        .ok_or_else(|| FunctionsError::Decode(format!("'{}' is not a valid hexadecimal string", result_hex)))?;
    let raw = hex::decode(digits)
        .map_err(|_| FunctionsError::Decode(format!("'{}' is not a valid hexadecimal string", result_hex)))?;
    decode_bytes(&raw, expected)
}

/// Decode raw result bytes.
///
/// Integers must be exactly 32 bytes, big-endian (two's complement for
/// int256). Strings must be UTF-8.
pub fn decode_bytes(raw: &[u8], expected: ReturnType) -> FunctionsResult<DecodedValue> {
    match expected {
        ReturnType::Uint256 => Ok(DecodedValue::Uint256(word(raw, expected)?)),
        ReturnType::Int256 => Ok(DecodedValue::Int256(I256::from_raw(word(raw, expected)?))),
        ReturnType::String => String::from_utf8(raw.to_vec())
            .map(DecodedValue::String)
            .map_err(|e| FunctionsError::Decode(format!("response is not valid UTF-8: {}", e))),
        ReturnType::Bytes => Ok(DecodedValue::Bytes(Bytes::copy_from_slice(raw))),
    }
}

fn word(raw: &[u8], expected: ReturnType) -> FunctionsResult<U256> {
    if raw.len() != 32 {
        return Err(FunctionsError::Decode(format!(
            "response has {} bytes but must be 32 bytes long for a {}",
            raw.len(),
            expected
        )));
    }
    Ok(U256::from_be_slice(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uint256() {
        let hex = format!("0x{:064x}", 1234u64);
        assert_eq!(
            decode_result(&hex, ReturnType::Uint256).unwrap(),
            DecodedValue::Uint256(U256::from(1234))
        );
    }

    #[test]
    fn test_decode_negative_int256() {
        let hex = format!("0x{}", "f".repeat(63) + "e");
        let value = decode_result(&hex, ReturnType::Int256).unwrap();
        assert_eq!(value, DecodedValue::Int256("-2".parse::<I256>().unwrap()));
        assert_eq!(value.to_string(), "-2");
    }

    #[test]
    fn test_decode_string() {
        let value = decode_result("0x31323334", ReturnType::String).unwrap();
        assert_eq!(value, DecodedValue::String("1234".to_string()));
    }

    #[test]
    fn test_bytes_passthrough() {
        let value = decode_result("0xdeadbeef", ReturnType::Bytes).unwrap();
        assert_eq!(value.to_string(), "0xdeadbeef");
    }

    #[test]
    fn test_encoding_is_inverted_by_decoding() {
        let values = [
            DecodedValue::Uint256(U256::MAX),
            DecodedValue::Int256(I256::MIN),
            DecodedValue::Int256("1000042".parse::<I256>().unwrap()),
            DecodedValue::String("Tones&I: 1000 listeners".to_string()),
        ];
        for value in values {
            let decoded = decode_bytes(&value.to_bytes(), value.return_type()).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_type_mismatch() {
        // A short string response cannot be read as an integer.
        let err = decode_result("0x31323334", ReturnType::Int256).unwrap_err();
        assert!(matches!(err, FunctionsError::Decode(_)));
        assert!(err.to_string().contains("32 bytes"));

        let err = decode_bytes(&[0xff, 0xfe], ReturnType::String).unwrap_err();
        assert!(matches!(err, FunctionsError::Decode(_)));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(decode_result("1234", ReturnType::Bytes).is_err());
        assert!(decode_result("0xzz", ReturnType::Bytes).is_err());
    }
}
