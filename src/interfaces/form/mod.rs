//! Wire codec for the processor's `key=value&key=value` protocol.

pub mod codec;

pub use codec::{Fields, decode, encode};
