pub mod amount;
pub mod card;
pub mod credentials;
pub mod options;
pub mod ports;
pub mod transaction;
