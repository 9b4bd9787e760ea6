//! Guard against negative money entering an account through a credit.

use std::{fmt, ops::Deref};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-negative amount of money, used for every transaction recorded on an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Build an amount from unsigned mantissa and decimal `scale`, so it can't be negative.
    ///
    /// `Amount::new(1050, 2)` is `10.50`.
    pub fn new(num: u64, scale: u32) -> Amount {
        Self(Decimal::from_i128_with_scale(num.into(), scale))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("amount is negative")]
/// Returned when a negative decimal is turned into an [`Amount`]
pub struct NegativeAmountErr;

impl TryFrom<Decimal> for Amount {
    type Error = NegativeAmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        // `-0` is still zero money
        if value.is_sign_negative() && !value.is_zero() {
            Err(NegativeAmountErr)
        } else {
            Ok(Self(value.abs()))
        }
    }
}

impl From<Amount> for Decimal {
    fn from(this: Amount) -> Self {
        this.0
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
