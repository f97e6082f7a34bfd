use crate::error::GatewayError;
use std::fmt;

/// Raw card data as supplied by the cardholder.
#[derive(Clone, PartialEq)]
pub struct CreditCard {
    pub number: String,
    pub month: u8,
    pub year: u16,
    pub verification_value: Option<String>,
}

impl CreditCard {
    pub fn new(
        number: impl Into<String>,
        month: u8,
        year: u16,
        verification_value: Option<String>,
    ) -> Result<Self, GatewayError> {
        if !(1..=12).contains(&month) {
            return Err(GatewayError::ValidationError(format!(
                "Card expiration month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self {
            number: number.into(),
            month,
            year,
            verification_value,
        })
    }

    /// Expiration as `MMYY`: two-digit month, last two digits of the year.
    pub fn expiration(&self) -> String {
        format!("{:02}{:02}", self.month, self.year % 100)
    }

    /// The security code, if the card carries a non-blank one.
    pub fn verification_value(&self) -> Option<&str> {
        self.verification_value
            .as_deref()
            .filter(|cvv| !cvv.trim().is_empty())
    }

    /// Last four digits, safe to log.
    pub fn last_digits(&self) -> &str {
        let start = self.number.len().saturating_sub(4);
        self.number.get(start..).unwrap_or_default()
    }
}

// Card numbers and security codes never reach logs.
impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last_digits()))
            .field("month", &self.month)
            .field("year", &self.year)
            .field(
                "verification_value",
                &self.verification_value.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// Where the money comes from: a card presented now, or one the processor
/// stored earlier and returned an id for.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentSource {
    Card(CreditCard),
    StoredCard(String),
}

impl From<CreditCard> for PaymentSource {
    fn from(card: CreditCard) -> Self {
        Self::Card(card)
    }
}
