//! # Accounts (ITX-02)
//!
//! The closed set of account variants the ledger stores, plus the three
//! things every replica must agree on for each of them:
//!
//! - **Content hash** (`domain::hashing`): keccak256 over a canonical
//!   rendering; the rule differs per kind.
//! - **Binary wire format** (`domain::codec`, `domain::serialization`):
//!   one version byte per record, one presence byte before each optional
//!   field, a `u16` type identifier only at the root.
//! - **JSON transport fix-up** (`domain::fixup`): byte fields degraded into
//!   arrays or indexed objects are restored to bytes on decode.
//!
//! `domain::wrapped` holds the typed per-call view of account snapshots the
//! host passes into validate and apply.

pub mod domain;

pub use domain::codec::{BinaryCodec, BinaryReader, BinaryWriter};
pub use domain::entities::*;
pub use domain::errors::{CodecError, LookupError};
pub use domain::fixup::account_from_json;
pub use domain::hashing::{content_hash, update_hash};
pub use domain::serialization::{decode_account, encode_account};
pub use domain::wrapped::{WrappedAccount, WrappedStates};
