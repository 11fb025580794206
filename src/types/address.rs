use std::fmt;
use std::str::FromStr;

use ethabi::ethereum_types::H160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be 0x-prefixed")]
    MissingPrefix,
    #[error("address must be 20 bytes, got {0}")]
    Length(usize),
    #[error("invalid hex in address")]
    Hex,
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        let bytes = hex::decode(body).map_err(|_| AddressError::Hex)?;
        if bytes.len() != 20 {
            return Err(AddressError::Length(bytes.len()));
        }
        let mut a = [0u8; 20];
        a.copy_from_slice(&bytes);
        Ok(Address(a))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<H160> for Address {
    fn from(h: H160) -> Self {
        Address(h.0)
    }
}

impl From<Address> for H160 {
    fn from(a: Address) -> Self {
        H160(a.0)
    }
}

// Addresses travel as 0x-hex strings in config files and on the wire.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
