//! # Domain Layer

pub mod entities;
pub mod errors;
pub mod key_change;
pub mod keys;
pub mod payload;
pub mod verify;
