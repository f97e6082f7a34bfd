use crate::application::request::GatewayRequest;
use crate::domain::amount::Amount;
use crate::domain::card::{CreditCard, PaymentSource};
use crate::domain::options::{Address, TransactionOptions};
use crate::domain::transaction::ActionCode;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a batch file. Which columns matter depends on `operation`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RequestRecord {
    pub operation: ActionCode,
    pub amount: Option<Decimal>,
    pub reference: Option<String>,
    pub card_number: Option<String>,
    pub exp_month: Option<u8>,
    pub exp_year: Option<u16>,
    pub cvv: Option<String>,
    pub card_id: Option<String>,
    pub card_exp_date: Option<String>,
    pub order_id: Option<String>,
    pub address1: Option<String>,
    pub zip: Option<String>,
    pub moto: Option<u8>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl RequestRecord {
    fn amount(&self) -> Result<Amount> {
        let amount = self.amount.ok_or_else(|| {
            GatewayError::ValidationError(format!("{:?} requires an amount", self.operation))
        })?;
        Amount::new(amount)
    }

    fn reference(&self) -> Result<String> {
        non_empty(&self.reference).ok_or_else(|| {
            GatewayError::ValidationError(format!("{:?} requires a reference", self.operation))
        })
    }

    fn card(&self) -> Result<CreditCard> {
        match (non_empty(&self.card_number), self.exp_month, self.exp_year) {
            (Some(number), Some(month), Some(year)) => {
                CreditCard::new(number, month, year, non_empty(&self.cvv))
            }
            _ => Err(GatewayError::ValidationError(format!(
                "{:?} requires card_number, exp_month and exp_year",
                self.operation
            ))),
        }
    }

    /// A stored card id wins over raw card columns.
    fn source(&self) -> Result<PaymentSource> {
        match non_empty(&self.card_id) {
            Some(card_id) => Ok(PaymentSource::StoredCard(card_id)),
            None => self.card().map(PaymentSource::Card),
        }
    }

    fn options(&self) -> TransactionOptions {
        let address = match (non_empty(&self.address1), non_empty(&self.zip)) {
            (None, None) => None,
            (address1, zip) => Some(Address { address1, zip }),
        };
        TransactionOptions {
            order_id: non_empty(&self.order_id),
            billing_address: address,
            address: None,
            card_exp_date: non_empty(&self.card_exp_date),
            cvv2: non_empty(&self.cvv),
            moto_ecommerce_ind: self.moto,
        }
    }
}

impl TryFrom<RequestRecord> for GatewayRequest {
    type Error = GatewayError;

    fn try_from(record: RequestRecord) -> Result<Self> {
        let request = match record.operation {
            ActionCode::Authorize => GatewayRequest::Authorize {
                amount: record.amount()?,
                source: record.source()?,
                options: record.options(),
            },
            ActionCode::Purchase => GatewayRequest::Purchase {
                amount: record.amount()?,
                source: record.source()?,
                options: record.options(),
            },
            ActionCode::Capture => GatewayRequest::Capture {
                amount: record.amount()?,
                reference: record.reference()?,
                options: record.options(),
            },
            ActionCode::Store => GatewayRequest::Store {
                card: record.card()?,
                options: record.options(),
            },
            ActionCode::Unstore => GatewayRequest::Unstore {
                card_id: non_empty(&record.card_id)
                    .or_else(|| non_empty(&record.reference))
                    .ok_or_else(|| {
                        GatewayError::ValidationError("Unstore requires a card_id".to_string())
                    })?,
            },
            ActionCode::Credit => GatewayRequest::Credit {
                amount: record.amount()?,
                source: record.source()?,
                options: record.options(),
            },
            ActionCode::Void => GatewayRequest::Void {
                reference: record.reference()?,
            },
            ActionCode::Verify => GatewayRequest::Verify {
                source: record.source()?,
                options: record.options(),
            },
        };
        Ok(request)
    }
}

/// Reads gateway requests from a CSV source.
///
/// Rows are deserialized lazily; a row that cannot be parsed or does not
/// carry what its operation needs yields an `Err` without stopping the
/// stream.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<GatewayRequest>> {
        self.reader.into_deserialize().map(|result| {
            let record: RequestRecord = result?;
            GatewayRequest::try_from(record)
        })
    }
}
