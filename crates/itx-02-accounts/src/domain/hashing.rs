//! # Content Hashing
//!
//! keccak256 over a canonical binary rendering; the rendering depends on
//! the kind:
//!
//! | Kind | Hashed bytes |
//! |------|--------------|
//! | `ContractStorage` | key ‖ value |
//! | `ContractCode` | code hash ‖ code bytes |
//! | `Account`, `Debug` | ledger record ‖ optional operator info ‖ timestamp |
//! | everything else | type id ‖ version ‖ record content without the hash |
//!
//! Plain accounts leave the address and kind tag out of the digest. Two
//! plain accounts with equal ledger state, operator info and timestamp hash
//! the same.

use super::codec::{BinaryCodec, BinaryWriter};
use super::entities::*;
use super::serialization::AccountContent;
use shared_crypto::keccak256;
use shared_types::Hash;

/// Compute the content hash without touching the stored one.
pub fn content_hash(account: &Account) -> Hash {
    let mut w = BinaryWriter::new();
    match account {
        Account::ContractStorage(a) => {
            w.write_hash(&a.key);
            w.write_bytes(&a.value);
        }
        Account::ContractCode(a) => {
            w.write_hash(&a.code_hash);
            w.write_bytes(&a.code_byte);
        }
        Account::Account(a) | Account::Debug(a) => {
            a.account.encode_record(&mut w);
            w.write_optional(a.operator_account_info.as_ref(), |w, v| v.encode_record(w));
            w.write_u64(a.timestamp);
        }
        Account::Receipt(a) => tagged(&mut w, account, ReceiptAccount::VERSION, a),
        Account::NetworkAccount(a) => tagged(&mut w, account, NetworkAccount::VERSION, a),
        Account::NodeAccount(a) => tagged(&mut w, account, NodeAccount::VERSION, a),
        Account::InternalTxReceipt(a) => {
            tagged(&mut w, account, InternalTxReceipt::VERSION, a)
        }
        Account::SecureAccount(a) => tagged(&mut w, account, SecureAccount::VERSION, a),
    }
    keccak256(w.as_slice())
}

fn tagged(w: &mut BinaryWriter, account: &Account, version: u8, content: &impl AccountContent) {
    w.write_u16(account.kind().type_id());
    w.write_u8(version);
    content.write_content(w);
}

/// Recompute and store the content hash.
pub fn update_hash(account: &mut Account) {
    let hash = content_hash(account);
    account.set_hash(hash);
}
