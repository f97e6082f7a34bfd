use crate::error::GatewayError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative monetary amount in major currency units.
///
/// Wraps `rust_decimal::Decimal` so callers can hand the gateway either a
/// decimal value (`10.00`) or an integer count of cents (`1000`). The wire
/// form is always two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(GatewayError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    /// Builds an amount from minor units, e.g. `1000` cents is `10.00`.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount the way the processor expects it: `10.00`.
    pub fn to_wire(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(2);
        rounded.to_string()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
