//! Amount type for operation values
//!
//! Operations always carry a strictly positive whole amount; the direction of
//! the movement (deposit, withdrawal, transfer) is encoded by the operation,
//! never by the sign. Balances are plain `i64` and may go negative.

use std::fmt;

use crate::error::ValidationError;

/// A strictly positive whole amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount, rejecting zero and negative values
    ///
    /// # Examples
    /// ```
    /// use finance_diary::models::Amount;
    /// assert!(Amount::new(500).is_ok());
    /// assert!(Amount::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
