//! # Shared Types Crate
//!
//! Primitive value types used across the internal-transaction workspace.
//!
//! ## Design Principles
//!
//! - **Fixed-width identities**: every canonical shard address is 32 bytes,
//!   every Ethereum-style address is 20 bytes. Both render as lowercase hex.
//! - **No floating point**: amounts are `U256` and timestamps are `u64`
//!   milliseconds so that every replica computes identical results.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
