//! # Adapters
//!
//! In-memory implementations of the outbound ports, used by the host in
//! single-process setups and by the tests.

mod apply_response;
mod archiver;
mod memory_store;

pub use apply_response::CollectingApplyResponse;
pub use archiver::StaticArchiver;
pub use memory_store::InMemoryExecutionStore;
