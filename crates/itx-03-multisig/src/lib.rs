//! # Multisig Authorization (ITX-03)
//!
//! Decides whether a set of `{owner, sig}` pairs authorizes a governance
//! payload.
//!
//! ## Flow
//!
//! 1. **Clean** the operation's candidate key list against the live key
//!    registry (`domain::keys`). Keys compare after trimming, lowercasing
//!    and dropping `0x`; surviving entries keep their configured text.
//! 2. **Verify** (`domain::verify`): at least `max(3, configured minimum)`
//!    distinct cleaned candidates at or above the required security level
//!    must have signed the canonical JSON of the payload.
//! 3. For key-rotation payloads, **classify** the change
//!    (`domain::key_change`) to pick which candidate list applies.
//!
//! Rejection is always the generic [`MultisigError::InvalidSignatures`];
//! per-signature diagnostics go to `tracing` only.

pub mod domain;

pub use domain::entities::{
    MultisigOperation, MultisigPermissions, SecurityLevel, Sign, MIN_SIGNATURES_FLOOR,
};
pub use domain::errors::MultisigError;
pub use domain::key_change::{classify_key_change, key_set_changed, permitted_signers, KeyChange};
pub use domain::keys::{clean_keys, clean_permissions, normalize_key, KeyRegistry};
pub use domain::payload::canonical_message;
pub use domain::verify::{required_signatures, verify_multisig, verify_owner_signature};
