//! # Key-Change Classification
//!
//! A config change that rotates keys is authorized by the holders of the
//! key set being rotated. When both sets rotate at once, only signers
//! permitted for both operations may sign.

use super::entities::{MultisigOperation, MultisigPermissions};
use super::keys::{normalize_key, KeyRegistry};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange {
    None,
    MultisigKeys,
    DevKeys,
    Both,
}

/// A registry changed if its size, membership or any key's level differs.
pub fn key_set_changed(old: &KeyRegistry, new: &KeyRegistry) -> bool {
    old.len() != new.len() || old.levels().ne(new.levels())
}

pub fn classify_key_change(
    old_multisig: &KeyRegistry,
    new_multisig: &KeyRegistry,
    old_dev: &KeyRegistry,
    new_dev: &KeyRegistry,
) -> KeyChange {
    match (
        key_set_changed(old_multisig, new_multisig),
        key_set_changed(old_dev, new_dev),
    ) {
        (false, false) => KeyChange::None,
        (true, false) => KeyChange::MultisigKeys,
        (false, true) => KeyChange::DevKeys,
        (true, true) => KeyChange::Both,
    }
}

/// Candidate signers for a change of this class. `fallback` applies when no
/// key set changes.
pub fn permitted_signers(
    change: KeyChange,
    permissions: &MultisigPermissions,
    fallback: MultisigOperation,
) -> Vec<String> {
    match change {
        KeyChange::None => permissions.candidates(fallback).to_vec(),
        KeyChange::MultisigKeys => permissions
            .candidates(MultisigOperation::ChangeMultisigKeys)
            .to_vec(),
        KeyChange::DevKeys => permissions
            .candidates(MultisigOperation::ChangeDevKeys)
            .to_vec(),
        KeyChange::Both => {
            let dev: BTreeSet<String> = permissions
                .candidates(MultisigOperation::ChangeDevKeys)
                .iter()
                .map(|k| normalize_key(k))
                .collect();
            permissions
                .candidates(MultisigOperation::ChangeMultisigKeys)
                .iter()
                .filter(|k| dev.contains(&normalize_key(k)))
                .cloned()
                .collect()
        }
    }
}
