//! Domain layer: transactions, configuration, validation and the pure
//! calculations behind apply.

pub mod config;
pub mod crack;
pub mod entities;
pub mod errors;
pub mod resolution;
pub mod rewards;
pub mod validators;
