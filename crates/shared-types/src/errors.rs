//! # Error Types
//!
//! Errors raised while parsing primitive values from their textual form.

use thiserror::Error;

/// Errors that can occur when parsing hex-encoded primitives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexError {
    /// The input contains a non-hex character.
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// The decoded value has the wrong width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors that can occur when parsing a decimal amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Empty string, sign, decimal point or any non-digit character.
    #[error("Amount must be a non-negative integer string: {0:?}")]
    NotANumber(String),

    /// Value does not fit in 256 bits.
    #[error("Amount exceeds 256 bits: {0}")]
    Overflow(String),
}
