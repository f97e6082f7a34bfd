use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub zip: Option<String>,
}

impl Address {
    pub fn new(address1: impl Into<String>, zip: impl Into<String>) -> Self {
        Self {
            address1: Some(address1.into()),
            zip: Some(zip.into()),
        }
    }
}

/// Optional per-call data.
///
/// `order_id` and an address qualify a charge for preferred interchange.
/// `card_exp_date` (`MMYY`) and `cvv2` are only read when the payment source
/// is a stored card, because the processor keeps neither.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionOptions {
    pub order_id: Option<String>,
    pub billing_address: Option<Address>,
    pub address: Option<Address>,
    pub card_exp_date: Option<String>,
    pub cvv2: Option<String>,
    pub moto_ecommerce_ind: Option<u8>,
}

impl TransactionOptions {
    /// The billing address wins over the generic one.
    pub fn effective_address(&self) -> Option<&Address> {
        self.billing_address.as_ref().or(self.address.as_ref())
    }
}
