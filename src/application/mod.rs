//! Application layer: the transaction builder.
//!
//! `Gateway` maps each operation onto its action code and field set, sends it
//! through the transport port and classifies the reply.

pub mod gateway;
pub mod request;
