//! # Account Errors

use itx_01_addressing::AccountType;
use shared_types::ShardAddress;
use thiserror::Error;

/// Binary decoding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Record version newer than this build understands (or zero).
    #[error("Version mismatch: supported up to {supported}, found {found}")]
    VersionMismatch { supported: u8, found: u8 },

    /// Input ended before the record did.
    #[error("Read past end: needed {needed} bytes, {remaining} remaining")]
    ReadPastEnd { needed: usize, remaining: usize },

    /// Root type identifier names no account kind.
    #[error("Unknown type identifier: {0}")]
    UnknownTypeId(u16),

    /// Presence flags are 0 or 1.
    #[error("Invalid presence flag: {0}")]
    InvalidPresenceFlag(u8),

    /// Booleans are 0 or 1.
    #[error("Invalid boolean byte: {0}")]
    InvalidBool(u8),

    /// String field is not UTF-8.
    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8,

    /// Enum discriminant out of range.
    #[error("Invalid discriminant {value} for {field}")]
    InvalidDiscriminant { field: &'static str, value: u8 },

    /// Embedded JSON payload does not parse.
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    /// Bytes left over after the root record.
    #[error("Trailing bytes after record: {0}")]
    TrailingBytes(usize),
}

/// Wrapped-state lookup failures; absence is explicit, never a default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No snapshot for the address in this call.
    #[error("Account not found: {0}")]
    NotFound(ShardAddress),

    /// Snapshot present but of a different kind.
    #[error("Account {address} is {found:?}, expected {expected:?}")]
    WrongKind {
        address: ShardAddress,
        expected: AccountType,
        found: AccountType,
    },
}
