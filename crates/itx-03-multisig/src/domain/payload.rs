//! # Signable Payload
//!
//! Signers sign the compact JSON of the payload with its `sign` field
//! removed. `serde_json` maps are ordered, so every replica renders the same
//! text regardless of the order fields arrived in.

use super::errors::MultisigError;
use serde_json::Value;

/// Field carrying the signatures; never part of the signed text.
pub const SIGN_FIELD: &str = "sign";

/// Canonical text of `payload` without its signatures.
pub fn canonical_message(payload: &Value) -> Result<String, MultisigError> {
    let Value::Object(fields) = payload else {
        return Err(MultisigError::InvalidPayload);
    };
    let mut fields = fields.clone();
    fields.remove(SIGN_FIELD);
    Ok(Value::Object(fields).to_string())
}
