//! Fixed-point price representation for feed values
//!
//! Feed prices arrive either as native fixed-point values or as floating
//! point. Both are normalized into [`Price`], a scaled integer with eight
//! decimal places, so cached prices compare exactly and mid-price arithmetic
//! never drifts.
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: values stored as scaled integers
//! - **Overflow Protection**: checked conversions with clear errors
//! - **Transparency**: explicit conversion points from `f64` and decimal text

use crate::common::errors::PriceError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point price with 8 decimal places precision
///
/// Scale factor: 100,000,000 (10^8)
///
/// Examples:
/// - 10.00 = Price(1_000_000_000)
/// - 0.01 = Price(1_000_000)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Price(pub i64);

impl Price {
    /// Scale factor for 8 decimal places
    pub const SCALE: i64 = 100_000_000;

    /// Zero, also the "unset" price on the wire
    pub const ZERO: Self = Self(0);

    /// Smallest quoted increment most venues use (0.01)
    pub const ONE_CENT: Self = Self(1_000_000);

    /// Create from a decimal string with exact parsing
    ///
    /// # Examples
    /// ```
    /// use feed_types::Price;
    ///
    /// let price = Price::from_decimal_str("10.05").unwrap();
    /// assert_eq!(price.raw_value(), 1_005_000_000);
    /// ```
    pub fn from_decimal_str(s: &str) -> Result<Self, PriceError> {
        use std::str::FromStr;

        let decimal = Decimal::from_str(s.trim()).map_err(|_| PriceError::InvalidDecimal {
            input: s.to_string(),
        })?;

        let scaled = decimal * Decimal::from(Self::SCALE);

        match scaled.round().to_i64() {
            Some(value) => Ok(Self(value)),
            None => {
                let float_val = decimal.to_f64().unwrap_or(f64::NAN);
                if float_val > 0.0 {
                    Err(PriceError::Overflow { value: float_val })
                } else {
                    Err(PriceError::Underflow { value: float_val })
                }
            }
        }
    }

    /// Create from a floating-point wire value
    ///
    /// Rejects NaN and infinities, rounds to the nearest representable value.
    pub fn try_from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite { value });
        }

        let scaled = value * Self::SCALE as f64;

        if scaled > i64::MAX as f64 {
            return Err(PriceError::Overflow { value });
        }
        if scaled < i64::MIN as f64 {
            return Err(PriceError::Underflow { value });
        }

        Ok(Self(scaled.round() as i64))
    }

    /// Create from a whole-unit integer price
    pub fn try_from_units(units: i64) -> Result<Self, PriceError> {
        units
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(PriceError::Overflow {
                value: units as f64,
            })
    }

    /// Convert to f64 for display or floating-point consumers
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Exact decimal form
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 8)
    }

    /// Get the raw scaled integer value
    pub fn raw_value(self) -> i64 {
        self.0
    }

    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Arithmetic mean of two prices, exact to the last scaled unit
    ///
    /// Computed in 128-bit space so two extreme prices cannot overflow.
    pub fn midpoint(self, other: Self) -> Self {
        let sum = self.0 as i128 + other.0 as i128;
        Self((sum / 2) as i64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::from_decimal_str("10.10").unwrap();
        assert_eq!(price.raw_value(), 1_010_000_000);
        assert_eq!(price.to_f64(), 10.10);

        let from_float = Price::try_from_f64(10.10).unwrap();
        assert_eq!(from_float, price);

        assert_eq!(Price::try_from_units(7).unwrap(), Price(700_000_000));
    }

    #[test]
    fn test_midpoint_is_exact() {
        let bid = Price::from_decimal_str("10.00").unwrap();
        let ask = Price::from_decimal_str("10.10").unwrap();
        assert_eq!(bid.midpoint(ask), Price::from_decimal_str("10.05").unwrap());

        let max = Price(i64::MAX);
        assert_eq!(max.midpoint(max), max);
    }

    #[test]
    fn test_error_handling() {
        assert!(matches!(
            Price::try_from_f64(f64::NAN),
            Err(PriceError::NotFinite { .. })
        ));
        assert!(matches!(
            Price::try_from_f64(1e30),
            Err(PriceError::Overflow { .. })
        ));
        assert!(matches!(
            Price::from_decimal_str("ten"),
            Err(PriceError::InvalidDecimal { .. })
        ));
        assert!(Price::try_from_units(i64::MAX).is_err());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Price::from_decimal_str("10.05").unwrap().to_string(), "10.05");
        assert_eq!(Price::ZERO.to_string(), "0");
    }
}
