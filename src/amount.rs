//! Monetary amount type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so the transaction
//! amount field always renders as a plain two-fraction-digit string, as the
//! BR Code standard requires (no currency symbol, no thousands separator).

use crate::error::{PixError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A positive BRL amount carrying exactly 2 decimal places.
///
/// Construction validates positivity; amounts with more than two fraction
/// digits are rounded half-away-from-zero at the boundary, so every value
/// held by this type already formats canonically.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use pix_brcode::Amount;
///
/// let amount = Amount::from_str("12.5").unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Creates a new `Amount` from a `Decimal`, normalizing to 2 decimal places.
    ///
    /// Returns [`PixError::InvalidAmount`] for zero or negative values;
    /// the standard has no representation for a non-positive charge.
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PixError::InvalidAmount {
                amount: value.to_string(),
                reason: "amount must be positive".to_string(),
            });
        }

        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Ok(Amount(normalized))
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).map_err(|e| PixError::InvalidAmount {
            amount: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Amount::new(decimal)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
