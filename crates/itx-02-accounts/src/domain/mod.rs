//! # Domain Layer

pub mod codec;
pub mod entities;
pub mod errors;
pub mod fixup;
pub mod hashing;
pub mod serialization;
pub mod wrapped;
