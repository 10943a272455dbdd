//! Request lifecycle types.

use alloy::primitives::{Bytes, TxHash, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the DON finds a request's secrets.
///
/// Discriminants match the `uint8` the consumer contract forwards on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Inline = 0,
    Remote = 1,
    DonHosted = 2,
}

impl Location {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl FromStr for Location {
    type Err = String;

    /// Case-insensitive; `DONHosted`, `don_hosted` and `don-hosted` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "inline" => Ok(Location::Inline),
            "remote" => Ok(Location::Remote),
            "donhosted" => Ok(Location::DonHosted),
            _ => Err(format!(
                "unsupported secrets location '{}', expected one of inline, remote, don_hosted",
                s
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Inline => "Inline",
            Location::Remote => "Remote",
            Location::DonHosted => "DONHosted",
        };
        f.write_str(name)
    }
}

/// Source language of the request code. Only JavaScript is executed by the DON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    #[default]
    JavaScript = 0,
}

/// Expected type of the bytes returned by the off-chain computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    Uint256,
    Int256,
    String,
    Bytes,
}

impl FromStr for ReturnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uint256" => Ok(ReturnType::Uint256),
            "int256" => Ok(ReturnType::Int256),
            "string" => Ok(ReturnType::String),
            "bytes" => Ok(ReturnType::Bytes),
            other => Err(format!(
                "unsupported return type '{}', expected one of uint256, int256, string, bytes",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ReturnType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReturnType::Uint256 => "uint256",
            ReturnType::Int256 => "int256",
            ReturnType::String => "string",
            ReturnType::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// Arguments of the consumer contract's `sendRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub source: String,
    pub secrets_location: Location,
    pub encrypted_secrets_reference: Bytes,
    pub args: Vec<String>,
    pub bytes_args: Vec<Bytes>,
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
}

/// Proof of submission, used as the correlation key for fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestReceipt {
    pub request_id: B256,
    pub transaction_hash: TxHash,
}
