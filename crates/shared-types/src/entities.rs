//! # Core Value Types
//!
//! - **Hashing**: `Hash` (32-byte keccak256 digest)
//! - **Identity**: `EthAddress` (20 bytes), `ShardAddress` (32 bytes)
//! - **Amounts**: `U256` re-exported from primitive-types
//! - **Hex**: prefix stripping, fixed-width decoding, lowercase rendering

use crate::errors::{AmountError, HexError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte hash (keccak256).
pub type Hash = [u8; 32];

/// Milliseconds since the Unix epoch, as supplied by the host.
pub type Timestamp = u64;

// =============================================================================
// HEX HELPERS
// =============================================================================

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_0x(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decode a hex string (optional `0x` prefix) into bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(strip_0x(input)).map_err(|_| HexError::InvalidHex(input.to_string()))
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_hex_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_hex(input)?;
    if bytes.len() != N {
        return Err(HexError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Lowercase hex without prefix.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Lowercase hex with `0x` prefix.
pub fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a non-negative base-10 integer string into a `U256`.
///
/// Leading `+`/`-`, whitespace, decimal points and exponents are rejected
/// so that `"50"`, and only `"50"`, means fifty.
pub fn parse_amount(input: &str) -> Result<U256, AmountError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotANumber(input.to_string()));
    }
    U256::from_dec_str(input).map_err(|_| AmountError::Overflow(input.to_string()))
}

// =============================================================================
// ETH ADDRESS
// =============================================================================

/// A 20-byte Ethereum-style address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EthAddress(pub [u8; 20]);

impl EthAddress {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for EthAddress {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_fixed::<20>(s.trim()).map(Self)
    }
}

impl Serialize for EthAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EthAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// =============================================================================
// SHARD ADDRESS
// =============================================================================

/// Canonical 32-byte address that routes and owns an account in the
/// partitioned ledger. Rendered as 64 lowercase hex characters, no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShardAddress(pub [u8; 32]);

impl ShardAddress {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ShardAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ShardAddress {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_fixed::<32>(s.trim()).map(Self)
    }
}

impl Serialize for ShardAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ShardAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_0x() {
        assert_eq!(strip_0x("0xabc"), "abc");
        assert_eq!(strip_0x("0Xabc"), "abc");
        assert_eq!(strip_0x("abc"), "abc");
    }

    #[test]
    fn test_decode_hex_fixed_wrong_length() {
        let err = decode_hex_fixed::<20>("0x1234").unwrap_err();
        assert_eq!(
            err,
            HexError::InvalidLength {
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn test_eth_address_display_is_lowercase_prefixed() {
        let addr: EthAddress = "0xABCDEFabcdef0000000000000000000000000001".parse().unwrap();
        assert_eq!(addr.to_string(), "0xabcdefabcdef0000000000000000000000000001");
    }

    #[test]
    fn test_shard_address_serde() {
        let addr = ShardAddress([0xAB; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: ShardAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50").unwrap(), U256::from(50));
        assert_eq!(parse_amount("0").unwrap(), U256::zero());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount(" 5").is_err());
        assert!(matches!(
            parse_amount(&"9".repeat(100)),
            Err(AmountError::Overflow(_))
        ));
    }
}
