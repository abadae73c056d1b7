//! Error types for fixed-point prices and coded enumerations
//!
//! Conversion failures are reported with the offending input so that feed
//! anomalies can be traced back to the field that produced them.

use thiserror::Error;

/// Errors that can occur while converting values into a [`Price`](crate::Price)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceError {
    /// Value exceeds the maximum representable price
    #[error("Overflow: value {value} exceeds maximum representable price")]
    Overflow { value: f64 },

    /// Value is below the minimum representable price
    #[error("Underflow: value {value} is below minimum representable price")]
    Underflow { value: f64 },

    /// Invalid decimal string format
    #[error("Invalid decimal string: '{input}' - expected numeric format")]
    InvalidDecimal { input: String },

    /// Value is not finite (NaN or infinity)
    #[error("Value is not finite: {value}")]
    NotFinite { value: f64 },
}

/// Errors raised when a wire code or name does not map onto a coded enum
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodeError {
    /// Numeric code not present in the enum table
    #[error("Unknown {enum_name} code {code}")]
    UnknownCode { enum_name: &'static str, code: i64 },

    /// Text matched neither a numeric code nor a canonical name
    #[error("Unknown {enum_name} name '{name}'")]
    UnknownName { enum_name: &'static str, name: String },
}

impl CodeError {
    pub fn unknown_code(enum_name: &'static str, code: i64) -> Self {
        Self::UnknownCode { enum_name, code }
    }

    pub fn unknown_name(enum_name: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            enum_name,
            name: name.into(),
        }
    }
}
