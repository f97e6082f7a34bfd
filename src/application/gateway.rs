use crate::application::request::GatewayRequest;
use crate::domain::amount::Amount;
use crate::domain::card::{CreditCard, PaymentSource};
use crate::domain::credentials::Credentials;
use crate::domain::options::TransactionOptions;
use crate::domain::ports::TransportBox;
use crate::domain::transaction::{ActionCode, AvsResult, TransactionResult};
use crate::error::{GatewayError, Result};
use crate::interfaces::form::{Fields, decode, encode};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const TEST_URL: &str = "https://cert.merchante-solutions.com/mes-api/tridentApi";
pub const LIVE_URL: &str = "https://api.merchante-solutions.com/mes-api/tridentApi";

pub const DISPLAY_NAME: &str = "Merchant e-Solutions";
pub const HOMEPAGE_URL: &str = "http://www.merchante-solutions.com/";
pub const SUPPORTED_COUNTRIES: &[&str] = &["US"];
pub const SUPPORTED_CARD_TYPES: &[&str] =
    &["visa", "master", "american_express", "discover", "jcb"];

pub const APPROVED_MESSAGE: &str = "This transaction has been approved";
pub const DEFAULT_MOTO_ECOMMERCE_IND: u8 = 7;

/// Request and response field names of the Trident API.
pub mod keys {
    pub const PROFILE_ID: &str = "profileId";
    pub const PROFILE_KEY: &str = "profileKey";
    pub const TRANSACTION_TYPE: &str = "transactionType";
    pub const TRANSACTION_AMOUNT: &str = "transactionAmount";
    pub const TRANSACTION_ID: &str = "transactionId";
    pub const INVOICE_NUMBER: &str = "invoiceNumber";
    pub const CARD_NUMBER: &str = "cardNumber";
    pub const CARD_EXP_DATE: &str = "cardExpDate";
    pub const CARD_ID: &str = "cardId";
    pub const CVV2: &str = "cvv2";
    pub const STREET_ADDRESS: &str = "cardholderStreetAddress";
    pub const ZIP: &str = "cardholderZip";
    pub const MOTO_ECOMMERCE_IND: &str = "motoEcommerceInd";

    pub const ERROR_CODE: &str = "errorCode";
    pub const AUTH_RESPONSE_TEXT: &str = "authResponseText";
    pub const CVV2_RESULT: &str = "cvv2Result";
    pub const AVS_RESULT: &str = "avsResult";
}

/// Adapter for the Merchant e-Solutions Trident API.
///
/// Each operation builds its request from independent field sets, merges
/// them once, and performs exactly one round trip through the transport.
/// Nothing is kept between calls, so a `Gateway` can be shared freely.
pub struct Gateway {
    credentials: Credentials,
    transport: TransportBox,
    endpoint: Option<String>,
}

impl Gateway {
    pub fn new(credentials: Credentials, transport: TransportBox) -> Self {
        Self {
            credentials,
            transport,
            endpoint: None,
        }
    }

    /// Sends every request to `url` instead of the test or live endpoint.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        match &self.endpoint {
            Some(url) => url,
            None if self.credentials.is_test() => TEST_URL,
            None => LIVE_URL,
        }
    }

    pub fn is_test(&self) -> bool {
        self.credentials.is_test()
    }

    pub async fn authorize(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let parameters = invoice_fields(options)
            .merge(payment_source_fields(source, options)?)
            .merge(address_fields(options));
        self.commit(ActionCode::Authorize, Some(amount), parameters)
            .await
    }

    pub async fn purchase(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let moto = options
            .moto_ecommerce_ind
            .unwrap_or(DEFAULT_MOTO_ECOMMERCE_IND);
        let parameters = invoice_fields(options)
            .merge(payment_source_fields(source, options)?)
            .merge(address_fields(options))
            .with(keys::MOTO_ECOMMERCE_IND, moto.to_string());
        self.commit(ActionCode::Purchase, Some(amount), parameters)
            .await
    }

    pub async fn capture(
        &self,
        amount: Amount,
        reference: &str,
        _options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let parameters = reference_fields(keys::TRANSACTION_ID, reference)?;
        self.commit(ActionCode::Capture, Some(amount), parameters)
            .await
    }

    /// Stores the card number only; later charges against the returned card
    /// id must supply `card_exp_date` (and `cvv2` if wanted) themselves.
    pub async fn store(
        &self,
        card: &CreditCard,
        _options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        self.commit(ActionCode::Store, None, card_number_fields(card))
            .await
    }

    pub async fn unstore(&self, card_id: &str) -> Result<TransactionResult> {
        let parameters = reference_fields(keys::CARD_ID, card_id)?;
        self.commit(ActionCode::Unstore, None, parameters).await
    }

    pub async fn credit(
        &self,
        amount: Amount,
        source: &PaymentSource,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let parameters = payment_source_fields(source, options)?;
        self.commit(ActionCode::Credit, Some(amount), parameters)
            .await
    }

    pub async fn void(&self, reference: &str) -> Result<TransactionResult> {
        let parameters = reference_fields(keys::TRANSACTION_ID, reference)?;
        self.commit(ActionCode::Void, None, parameters).await
    }

    /// Card verification. The processor requires a zero amount and
    /// approves with its own code.
    pub async fn verify(
        &self,
        source: &PaymentSource,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let parameters = invoice_fields(options)
            .merge(address_fields(options))
            .merge(payment_source_fields(source, options)?);
        self.commit(ActionCode::Verify, Some(Amount::ZERO), parameters)
            .await
    }

    pub async fn execute(&self, request: &GatewayRequest) -> Result<TransactionResult> {
        match request {
            GatewayRequest::Authorize {
                amount,
                source,
                options,
            } => self.authorize(*amount, source, options).await,
            GatewayRequest::Purchase {
                amount,
                source,
                options,
            } => self.purchase(*amount, source, options).await,
            GatewayRequest::Capture {
                amount,
                reference,
                options,
            } => self.capture(*amount, reference, options).await,
            GatewayRequest::Store { card, options } => self.store(card, options).await,
            GatewayRequest::Unstore { card_id } => self.unstore(card_id).await,
            GatewayRequest::Credit {
                amount,
                source,
                options,
            } => self.credit(*amount, source, options).await,
            GatewayRequest::Void { reference } => self.void(reference).await,
            GatewayRequest::Verify { source, options } => self.verify(source, options).await,
        }
    }

    async fn commit(
        &self,
        action: ActionCode,
        amount: Option<Amount>,
        parameters: Fields,
    ) -> Result<TransactionResult> {
        let amount_fields = match amount {
            Some(amount) if action.sends_amount() => {
                Fields::new().with(keys::TRANSACTION_AMOUNT, amount.to_wire())
            }
            _ => Fields::new(),
        };
        let request = self.post_data(action, parameters.merge(amount_fields));

        debug!(action = %action, endpoint = self.endpoint(), "posting transaction");
        let raw = self.transport.post(self.endpoint(), encode(&request)).await?;

        let result = parse_result(action, decode(&raw), self.is_test());
        info!(
            action = %action,
            success = result.success,
            error_code = result.params.get(keys::ERROR_CODE).map(String::as_str),
            "transaction completed"
        );
        Ok(result)
    }

    fn post_data(&self, action: ActionCode, parameters: Fields) -> Fields {
        Fields::new()
            .with(keys::PROFILE_ID, self.credentials.login())
            .with(keys::PROFILE_KEY, self.credentials.password())
            .with(keys::TRANSACTION_TYPE, action.code())
            .merge(parameters)
    }
}

fn invoice_fields(options: &TransactionOptions) -> Fields {
    match &options.order_id {
        Some(order_id) => Fields::new().with(keys::INVOICE_NUMBER, sanitize_invoice(order_id)),
        None => {
            warn!("no order id given; add one to qualify the transaction for preferred interchange");
            Fields::new()
        }
    }
}

fn address_fields(options: &TransactionOptions) -> Fields {
    match options.effective_address() {
        Some(address) => Fields::new()
            .with(
                keys::STREET_ADDRESS,
                sanitize_street(address.address1.as_deref().unwrap_or_default()),
            )
            .with(keys::ZIP, address.zip.clone().unwrap_or_default()),
        None => {
            warn!("no billing address given; add one to qualify the transaction for preferred interchange");
            Fields::new()
        }
    }
}

fn payment_source_fields(source: &PaymentSource, options: &TransactionOptions) -> Result<Fields> {
    match source {
        PaymentSource::StoredCard(card_id) => {
            let exp_date = options
                .card_exp_date
                .as_deref()
                .filter(|exp| !exp.trim().is_empty())
                .ok_or_else(|| {
                    GatewayError::ConfigurationError(
                        "card_exp_date (MMYY) is required when charging a stored card".to_string(),
                    )
                })?;
            Ok(Fields::new()
                .with(keys::CARD_ID, card_id.as_str())
                .with(keys::CARD_EXP_DATE, exp_date)
                .with_opt(keys::CVV2, options.cvv2.clone()))
        }
        PaymentSource::Card(card) => Ok(card_number_fields(card)
            .with(keys::CARD_EXP_DATE, card.expiration())
            .with_opt(keys::CVV2, card.verification_value().map(str::to_string))),
    }
}

fn card_number_fields(card: &CreditCard) -> Fields {
    Fields::new().with(keys::CARD_NUMBER, card.number.as_str())
}

fn reference_fields(key: &str, reference: &str) -> Result<Fields> {
    if reference.trim().is_empty() {
        return Err(GatewayError::ValidationError(format!(
            "{key} must not be blank"
        )));
    }
    Ok(Fields::new().with(key, reference))
}

/// Word characters and `.` survive; every other character becomes a word
/// break, which form encoding writes as `+`.
fn sanitize_street(street: &str) -> String {
    street
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn sanitize_invoice(order_id: &str) -> String {
    order_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect()
}

fn parse_result(
    action: ActionCode,
    params: HashMap<String, String>,
    test: bool,
) -> TransactionResult {
    let field = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    let success = params.get(keys::ERROR_CODE).map(String::as_str) == Some(action.success_code());
    let message = if success {
        APPROVED_MESSAGE.to_string()
    } else {
        params
            .get(keys::AUTH_RESPONSE_TEXT)
            .cloned()
            .unwrap_or_default()
    };
    let authorization = field(keys::TRANSACTION_ID);
    let cvv_result = field(keys::CVV2_RESULT);
    let avs_result = AvsResult {
        code: field(keys::AVS_RESULT),
    };

    TransactionResult {
        success,
        message,
        params,
        authorization,
        cvv_result,
        avs_result,
        test,
    }
}
