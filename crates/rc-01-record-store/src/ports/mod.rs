//! Ports layer for the Record Store.
//!
//! - Inbound (Driving) port: API consumed by the workflows and the admin CLI
//! - Outbound (Driven) port: durable document storage

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
