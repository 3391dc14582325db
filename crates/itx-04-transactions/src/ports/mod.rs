//! # Ports
//!
//! - `inbound`: what the host calls on this module.
//! - `outbound`: what this module needs from the host.

pub mod inbound;
pub mod outbound;

pub use inbound::InternalTxHandler;
pub use outbound::{ApplyResponse, ArchiverClient, ExecutionStateStore, HostServices};
