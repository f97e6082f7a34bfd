#![allow(dead_code)]

use std::collections::HashMap;
use trident_gateway::application::gateway::Gateway;
use trident_gateway::domain::card::{CreditCard, PaymentSource};
use trident_gateway::domain::credentials::Credentials;
use trident_gateway::domain::options::{Address, TransactionOptions};
use trident_gateway::infrastructure::in_memory::RecordingTransport;
use trident_gateway::interfaces::form::decode;

pub const APPROVED: &str = "errorCode=000&transactionId=T123&authResponseText=Approved";
pub const INSUFFICIENT_FUNDS: &str = "errorCode=200&authResponseText=Insufficient Funds";

pub fn gateway(transport: &RecordingTransport) -> Gateway {
    let credentials = Credentials::new("941000", "profilekey", true).unwrap();
    Gateway::new(credentials, Box::new(transport.clone()))
}

pub fn visa() -> CreditCard {
    CreditCard::new("4111111111111111", 12, 2030, Some("123".to_string())).unwrap()
}

pub fn visa_source() -> PaymentSource {
    PaymentSource::Card(visa())
}

pub fn qualified_options() -> TransactionOptions {
    TransactionOptions {
        order_id: Some("A1".to_string()),
        billing_address: Some(Address::new("1 Main St", "12345")),
        ..Default::default()
    }
}

pub async fn last_body(transport: &RecordingTransport) -> String {
    transport.last_request().await.unwrap().body
}

pub async fn last_fields(transport: &RecordingTransport) -> HashMap<String, String> {
    decode(&last_body(transport).await)
}
