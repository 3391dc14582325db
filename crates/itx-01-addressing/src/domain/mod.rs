//! # Domain Layer
//!
//! Pure address arithmetic, no I/O.

pub mod derive;
pub mod entities;
pub mod errors;
pub mod silo;
