//! # Key Silo
//!
//! Clusters a contract's storage and code near the contract in address
//! space by overwriting the top bits of a 32-byte key with the leading bits
//! of the owner's widened address.

/// Copy the first `prefix_bits` bits of `owner` over `key`.
///
/// Bits after the prefix keep their value from `key`. `prefix_bits` must be
/// at most 256; callers bound it to the owner width beforehand.
pub fn silo_key(owner: &[u8; 32], key: &[u8; 32], prefix_bits: u32) -> [u8; 32] {
    let mut out = *key;
    let full_bytes = (prefix_bits / 8) as usize;
    let rem_bits = prefix_bits % 8;

    out[..full_bytes].copy_from_slice(&owner[..full_bytes]);

    if rem_bits > 0 && full_bytes < 32 {
        let mask = 0xFFu8 << (8 - rem_bits);
        out[full_bytes] = (owner[full_bytes] & mask) | (key[full_bytes] & !mask);
    }
    out
}
