//! Money type with Colombian-market display conventions.
//!
//! Shopify returns decimal amounts as strings together with an ISO 4217
//! currency code. Catalog prices are shown in Colombian pesos: USD amounts
//! are converted at a fixed approximate rate and formatted in the es-CO
//! style (dot thousands separators, no decimals for COP).

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Approximate USD to COP conversion rate used for catalog display.
pub const USD_TO_COP_RATE: i64 = 4000;

/// Errors that can occur when parsing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// The amount string is not a valid decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The currency code is not supported.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// ISO 4217 currency codes handled by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Colombian peso.
    #[default]
    COP,
    /// United States dollar.
    USD,
}

impl CurrencyCode {
    /// Returns the ISO 4217 code as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::COP => "COP",
            Self::USD => "USD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COP" => Ok(Self::COP),
            "USD" => Ok(Self::USD),
            other => Err(MoneyError::UnsupportedCurrency(other.to_owned())),
        }
    }
}

/// A monetary amount with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (pesos or dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a Shopify money value (decimal string + currency code string).
    ///
    /// # Errors
    ///
    /// Returns `MoneyError` if the amount is not a decimal or the currency
    /// code is unsupported.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, MoneyError> {
        let amount = amount
            .parse::<Decimal>()
            .map_err(|_| MoneyError::InvalidAmount(amount.to_owned()))?;
        Ok(Self {
            amount,
            currency_code: currency_code.parse()?,
        })
    }

    /// The amount expressed in Colombian pesos.
    ///
    /// USD amounts are converted at [`USD_TO_COP_RATE`]; COP amounts are
    /// returned unchanged.
    #[must_use]
    pub fn in_cop(&self) -> Decimal {
        match self.currency_code {
            CurrencyCode::COP => self.amount,
            CurrencyCode::USD => self.amount * Decimal::from(USD_TO_COP_RATE),
        }
    }

    /// Format the amount for display in the es-CO style: whole pesos with
    /// dot thousands separators, e.g. `$ 120.000`.
    #[must_use]
    pub fn display_cop(&self) -> String {
        let pesos = self.in_cop().round().to_i128().unwrap_or(0);
        format!("$ {}", group_thousands(pesos))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_cop())
    }
}

/// Insert dot thousands separators into an integer amount.
fn group_thousands(value: i128) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let money = Money::parse("29.99", "USD").unwrap();
        assert_eq!(money.currency_code, CurrencyCode::USD);
        assert_eq!(money.amount, Decimal::new(2999, 2));
    }

    #[test]
    fn test_parse_invalid_amount() {
        assert!(matches!(
            Money::parse("abc", "USD"),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_unsupported_currency() {
        assert!(matches!(
            Money::parse("10.00", "EUR"),
            Err(MoneyError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_usd_converts_to_cop() {
        let money = Money::parse("30", "USD").unwrap();
        assert_eq!(money.in_cop(), Decimal::from(120_000));
    }

    #[test]
    fn test_cop_unchanged() {
        let money = Money::parse("85000", "COP").unwrap();
        assert_eq!(money.in_cop(), Decimal::from(85_000));
    }

    #[test]
    fn test_display_cop_grouping() {
        let money = Money::parse("120000", "COP").unwrap();
        assert_eq!(money.display_cop(), "$ 120.000");

        let money = Money::parse("1500000", "COP").unwrap();
        assert_eq!(money.display_cop(), "$ 1.500.000");

        let money = Money::parse("999", "COP").unwrap();
        assert_eq!(money.display_cop(), "$ 999");
    }

    #[test]
    fn test_display_rounds_fractional_pesos() {
        let money = Money::parse("85000.60", "COP").unwrap();
        assert_eq!(money.display_cop(), "$ 85.001");
    }

    #[test]
    fn test_display_usd_via_conversion() {
        let money = Money::parse("29.99", "USD").unwrap();
        // 29.99 * 4000 = 119,960
        assert_eq!(money.to_string(), "$ 119.960");
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(-1000000), "-1.000.000");
    }
}
