//! # Transport Fix-up
//!
//! Account snapshots cross process boundaries as JSON. Byte fields written
//! as hex strings sometimes come back as a plain array, an indexed object
//! (`{"0": 18, "1": 52}`) or a `{"type": "Buffer", "data": [...]}` wrapper
//! after passing through peers. Every byte field of every account kind is
//! deserialized through this module so the decoded value is always a byte
//! vector again.

use super::entities::Account;
use itx_01_addressing::AccountType;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Restore bytes from any of the transport shapes. `None` if the value is
/// not a byte sequence in any recognised shape.
pub fn restore_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(s) => shared_types::decode_hex(s).ok(),
        Value::Array(items) => items.iter().map(as_byte).collect(),
        Value::Object(map) => {
            if let (Some(Value::String(tag)), Some(data)) = (map.get("type"), map.get("data")) {
                if tag == "Buffer" {
                    return restore_bytes(data);
                }
            }
            // Indexed object: keys must be exactly 0..len
            let mut out = vec![0u8; map.len()];
            let mut seen = vec![false; map.len()];
            for (key, item) in map {
                let index: usize = key.parse().ok()?;
                if index >= out.len() || seen[index] {
                    return None;
                }
                out[index] = as_byte(item)?;
                seen[index] = true;
            }
            Some(out)
        }
        _ => None,
    }
}

fn as_byte(value: &Value) -> Option<u8> {
    value.as_u64().and_then(|n| u8::try_from(n).ok())
}

/// Decode a JSON account snapshot, restoring degraded byte fields.
pub fn account_from_json(value: Value) -> Result<Account, serde_json::Error> {
    serde_json::from_value(value)
}

/// Names of the JSON byte fields of each kind.
pub fn byte_fields(kind: AccountType) -> &'static [&'static str] {
    match kind {
        AccountType::Account | AccountType::Debug => &["hash"],
        AccountType::ContractStorage => &["hash", "key", "value"],
        AccountType::ContractCode => &["hash", "codeHash", "codeByte"],
        AccountType::Receipt => &["hash", "txId", "receipt"],
        AccountType::NetworkAccount => &["hash"],
        AccountType::NodeAccount => &["hash"],
        AccountType::InternalTxReceipt => &["hash", "txId"],
        AccountType::SecureAccount => &["hash"],
    }
}

/// `#[serde(with = "fixup::bytes")]` for `Vec<u8>` fields.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&shared_types::to_prefixed_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        restore_bytes(&value).ok_or_else(|| D::Error::custom("expected a byte sequence"))
    }
}

/// `#[serde(with = "fixup::hash")]` for 32-byte fields.
pub mod hash {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&shared_types::to_prefixed_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let value = Value::deserialize(deserializer)?;
        let bytes =
            restore_bytes(&value).ok_or_else(|| D::Error::custom("expected a byte sequence"))?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| D::Error::custom(format!("expected 32 bytes, got {}", bytes.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restore_all_shapes() {
        let expected = vec![0x12, 0x34];
        assert_eq!(restore_bytes(&json!("0x1234")), Some(expected.clone()));
        assert_eq!(restore_bytes(&json!("1234")), Some(expected.clone()));
        assert_eq!(restore_bytes(&json!([18, 52])), Some(expected.clone()));
        assert_eq!(restore_bytes(&json!({"1": 52, "0": 18})), Some(expected.clone()));
        assert_eq!(
            restore_bytes(&json!({"type": "Buffer", "data": [18, 52]})),
            Some(expected)
        );
    }

    #[test]
    fn test_restore_rejects_gaps_and_out_of_range() {
        assert_eq!(restore_bytes(&json!({"0": 1, "2": 3})), None);
        assert_eq!(restore_bytes(&json!([256])), None);
        assert_eq!(restore_bytes(&json!(12)), None);
    }

    #[test]
    fn test_empty_object_is_empty_bytes() {
        assert_eq!(restore_bytes(&json!({})), Some(vec![]));
    }
}
