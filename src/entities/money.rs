use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in the smallest denomination of its currency.
///
/// For USD an `amount` of `391444` is $3,914.44.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `USD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Money {
    /// The amount in major units, assuming a two-decimal currency.
    ///
    /// A missing amount is zero.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount.unwrap_or_default(), 2)
    }
}
