use crate::domain::amount::Amount;
use crate::domain::card::{CreditCard, PaymentSource};
use crate::domain::options::TransactionOptions;
use crate::domain::transaction::ActionCode;

/// One call to the processor, with the inputs that operation takes.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    Authorize {
        amount: Amount,
        source: PaymentSource,
        options: TransactionOptions,
    },
    Purchase {
        amount: Amount,
        source: PaymentSource,
        options: TransactionOptions,
    },
    Capture {
        amount: Amount,
        reference: String,
        options: TransactionOptions,
    },
    Store {
        card: CreditCard,
        options: TransactionOptions,
    },
    Unstore {
        card_id: String,
    },
    Credit {
        amount: Amount,
        source: PaymentSource,
        options: TransactionOptions,
    },
    Void {
        reference: String,
    },
    Verify {
        source: PaymentSource,
        options: TransactionOptions,
    },
}

impl GatewayRequest {
    pub fn action(&self) -> ActionCode {
        match self {
            GatewayRequest::Authorize { .. } => ActionCode::Authorize,
            GatewayRequest::Purchase { .. } => ActionCode::Purchase,
            GatewayRequest::Capture { .. } => ActionCode::Capture,
            GatewayRequest::Store { .. } => ActionCode::Store,
            GatewayRequest::Unstore { .. } => ActionCode::Unstore,
            GatewayRequest::Credit { .. } => ActionCode::Credit,
            GatewayRequest::Void { .. } => ActionCode::Void,
            GatewayRequest::Verify { .. } => ActionCode::Verify,
        }
    }
}
