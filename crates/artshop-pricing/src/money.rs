//! Money type for representing monetary values.
//!
//! Amounts are held as integers in the currency's minor unit (paise for
//! INR) so that repeated recomputation never drifts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., paise).
    pub minor_units: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Non-finite input becomes zero.
    ///
    /// ```
    /// use artshop_pricing::money::{Currency, Money};
    /// let price = Money::from_decimal(499.99, Currency::INR);
    /// assert_eq!(price.minor_units, 49999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Self::zero(currency);
        }
        let minor_units = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(minor_units, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Clamp negative amounts to zero.
    pub fn non_negative(&self) -> Self {
        Self::new(self.minor_units.max(0), self.currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.minor_units as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "₹295.60").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol, fixed to the currency's decimal places
    /// (e.g., "295.60").
    pub fn display_amount(&self) -> String {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let minor = self.minor_units.unsigned_abs();
        let per_major = self.currency.minor_per_major().unsigned_abs();
        let (major, fraction) = (minor / per_major, minor % per_major);
        match self.currency.decimal_places() as usize {
            0 => format!("{}{}", sign, major),
            places => format!("{}{}.{:0places$}", sign, major, fraction),
        }
    }

    /// Add another Money value, returning None if currencies don't match
    /// or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|sum| Money::new(sum, self.currency))
    }

    /// Multiply by a whole factor, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.minor_units
            .checked_mul(factor)
            .map(|product| Money::new(product, self.currency))
    }

    /// Calculate a percentage of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.minor_units as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Sum an iterator of Money values, skipping any in a foreign currency.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.fold(Money::zero(currency), |acc, m| acc.try_add(m).unwrap_or(acc))
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
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::INR);
        assert_eq!(m.minor_units, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.minor_units, 100);
    }

    #[test]
    fn test_money_from_non_finite() {
        assert!(Money::from_decimal(f64::NAN, Currency::INR).is_zero());
        assert!(Money::from_decimal(f64::INFINITY, Currency::INR).is_zero());
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(29560, Currency::INR);
        assert_eq!(m.display(), "\u{20b9}295.60");
        assert_eq!(m.display_amount(), "295.60");

        let m = Money::new(100, Currency::JPY);
        assert_eq!(m.display(), "\u{00a5}100");

        assert_eq!(Money::new(5, Currency::INR).display_amount(), "0.05");
        assert_eq!(Money::new(-1250, Currency::INR).display_amount(), "-12.50");
    }

    #[test]
    fn test_display_exact_at_saturation() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert_eq!(m.display_amount(), "92233720368547758.07");
        assert_eq!(Money::new(i64::MIN, Currency::INR).display_amount(), "-92233720368547758.08");
    }

    #[test]
    fn test_try_add_rejects_currency_mismatch() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert_eq!(inr.try_add(&usd), None);
        assert_eq!(inr.try_add(&inr).map(|m| m.minor_units), Some(2000));
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::INR);
        assert!(m.try_multiply(2).is_none());
        let doubled = Money::new(12000, Currency::INR).try_multiply(2);
        assert_eq!(doubled.map(|m| m.minor_units), Some(24000));
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(24000, Currency::INR);
        assert_eq!(m.percentage(19.0).minor_units, 4560);
        assert_eq!(m.percentage(0.0).minor_units, 0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Money::new(-500, Currency::INR).non_negative().minor_units, 0);
        assert_eq!(Money::new(500, Currency::INR).non_negative().minor_units, 500);
    }

    #[test]
    fn test_sum_skips_foreign_currency() {
        let items = [
            Money::new(100, Currency::INR),
            Money::new(50, Currency::USD),
            Money::new(200, Currency::INR),
        ];
        assert_eq!(Money::sum(items.iter(), Currency::INR).minor_units, 300);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("INR"), Some(Currency::INR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
