//! Payment gateway adapter for the Merchant e-Solutions Trident API.
//!
//! [`application::gateway::Gateway`] turns authorize, purchase, capture,
//! credit, void, verify, store and unstore calls into the processor's
//! form-encoded protocol and normalizes its replies into a
//! [`domain::transaction::TransactionResult`]. The network is reached through
//! the [`domain::ports::Transport`] port.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
