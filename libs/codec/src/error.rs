//! Engine-level errors
//!
//! Two layers: [`DecodeError`] describes one field whose wire value could not
//! be normalized, and never escapes the dispatcher; [`EngineError`] describes
//! conditions that stop a whole message from being processed.

use feed_types::{CodeError, FieldId, PriceError, WireType};
use thiserror::Error;

/// A single field value the update rule could not normalize
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Wire type outside the set the rule knows how to coerce
    #[error("Unexpected wire type {got} (expected {expected})")]
    UnexpectedType {
        expected: &'static str,
        got: WireType,
    },

    /// Integer value does not fit the target attribute
    #[error("Value {value} out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    /// Floating-point value not representable as a price
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Strict enum decode failed
    #[error("Invalid code: {0}")]
    InvalidCode(#[from] CodeError),
}

impl DecodeError {
    pub fn unexpected(expected: &'static str, got: WireType) -> Self {
        Self::UnexpectedType { expected, got }
    }

    pub fn out_of_range(value: impl Into<i128>, target: &'static str) -> Self {
        Self::OutOfRange {
            value: value.into(),
            target,
        }
    }
}

/// Conditions that prevent a message from producing any output
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Field dictionary not configured, or missing fields this kind requires
    #[error("Schema not ready for {kind} (missing: {missing})")]
    SchemaNotReady { kind: &'static str, missing: String },

    /// Dictionary reported a field id beyond its own maximum
    #[error("Field {field} resolved to {id} beyond max field id {max} ({kind})")]
    FieldOutOfRange {
        kind: &'static str,
        field: String,
        id: FieldId,
        max: u16,
    },
}

impl EngineError {
    /// Schema dictionary has not been populated yet
    pub fn schema_not_ready(kind: &'static str) -> Self {
        Self::SchemaNotReady {
            kind,
            missing: "dictionary not configured".to_string(),
        }
    }

    /// Schema is populated but lacks fields this kind cannot work without
    pub fn missing_fields(kind: &'static str, missing: &[&str]) -> Self {
        Self::SchemaNotReady {
            kind,
            missing: missing.join(", "),
        }
    }

    pub fn is_schema_not_ready(&self) -> bool {
        matches!(self, Self::SchemaNotReady { .. })
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
