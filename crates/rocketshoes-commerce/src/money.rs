//! Money type for cart totals.
//!
//! The catalog API reports prices as decimal numbers. Totals are computed in
//! integer cents so that summing many line items never drifts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
        }
    }

    /// Thousands and decimal separators used when displaying amounts.
    fn separators(&self) -> (char, char) {
        match self {
            Currency::BRL => ('.', ','),
            Currency::USD => (',', '.'),
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use rocketshoes_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(179.9, Currency::BRL);
    /// assert_eq!(price.amount_cents, 17990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Add another amount, returning `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(quantity)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum amounts of a single currency, returning `None` on mismatch or overflow.
    pub fn checked_sum<'a>(
        items: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        items
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    /// Format for display with grouping, e.g. `R$ 1.234,50`.
    pub fn display(&self) -> String {
        let (thousands, decimal) = self.currency.separators();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        let whole = (cents / 100).to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(thousands);
            }
            grouped.push(c);
        }

        format!(
            "{}{} {}{}{:02}",
            sign,
            self.currency.symbol(),
            grouped,
            decimal,
            cents % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(139.9, Currency::BRL).amount_cents, 13990);
        assert_eq!(Money::from_decimal(19.999, Currency::BRL).amount_cents, 2000);
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(Money::new(17990, Currency::BRL).display(), "R$ 179,90");
        assert_eq!(Money::new(123456789, Currency::BRL).display(), "R$ 1.234.567,89");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
    }

    #[test]
    fn test_display_usd() {
        assert_eq!(Money::new(100050, Currency::USD).display(), "$ 1,000.50");
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::new(100, Currency::BRL);
        let b = Money::new(100, Currency::USD);
        assert!(a.checked_add(&b).is_none());
    }

    #[test]
    fn test_checked_mul_overflow() {
        let a = Money::new(i64::MAX, Currency::BRL);
        assert!(a.checked_mul(2).is_none());
        assert_eq!(Money::new(250, Currency::BRL).checked_mul(3).unwrap().amount_cents, 750);
    }

    #[test]
    fn test_checked_sum() {
        let items = [Money::new(100, Currency::BRL), Money::new(250, Currency::BRL)];
        let total = Money::checked_sum(items.iter(), Currency::BRL).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("brl"), Some(Currency::BRL));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
