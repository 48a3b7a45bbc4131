//! Quantity coercion.
//!
//! Quantities arrive as free text from a number field or as integers from
//! stored state. Both are coerced into a [`Quantity`] that is always at
//! least one.

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A purchase quantity, guaranteed to be `>= 1`.
///
/// Decoding never fails: integers clamp, floats truncate, text goes
/// through [`Quantity::parse`], and anything else becomes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    /// The smallest allowed quantity.
    pub const ONE: Quantity = Quantity(1);

    /// Coerce an integer, clamping anything below one up to one.
    pub fn new(value: i64) -> Self {
        Self(value.max(1))
    }

    /// Coerce raw field text.
    ///
    /// Leading/trailing whitespace is ignored. Like a browser's `parseInt`,
    /// a numeric prefix is honoured ("3 pcs" -> 3) and anything without
    /// one falls back to one.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let prefix: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
        match prefix.parse::<i64>() {
            Ok(value) => Self::new(sign * value),
            // Overflowing digit runs are still a huge positive request.
            Err(_) if !prefix.is_empty() && sign > 0 => Self(i64::MAX),
            Err(_) => Self::ONE,
        }
    }

    /// Coerce a fractional amount, truncating toward zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ONE;
        }
        // `as` saturates at the i64 bounds.
        Self::new(value.trunc() as i64)
    }

    /// Get the value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Self::new(value),
            Raw::Float(value) => Self::from_f64(value),
            Raw::Text(raw) => Self::parse(&raw),
            Raw::Other(_) => Self::ONE,
        })
    }
}

impl From<Quantity> for i64 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
