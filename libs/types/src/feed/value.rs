//! Wire-level field values
//!
//! A feed message is a sparse list of `(FieldId, RawFieldValue)` pairs. The
//! same logical attribute may be published with different wire types by
//! different feed handlers, so values stay tagged until an update rule
//! normalizes them.

use crate::common::fixed_point::Price;
use crate::common::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One field value as carried on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawFieldValue {
    I64(i64),
    U32(u32),
    F64(f64),
    Price(Price),
    Timestamp(Timestamp),
    Char(char),
    Bool(bool),
    String(String),
}

/// Discriminant of [`RawFieldValue`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    I64,
    U32,
    F64,
    Price,
    Timestamp,
    Char,
    Bool,
    String,
}

impl WireType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::I64 => "i64",
            Self::U32 => "u32",
            Self::F64 => "f64",
            Self::Price => "price",
            Self::Timestamp => "timestamp",
            Self::Char => "char",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RawFieldValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::I64(_) => WireType::I64,
            Self::U32(_) => WireType::U32,
            Self::F64(_) => WireType::F64,
            Self::Price(_) => WireType::Price,
            Self::Timestamp(_) => WireType::Timestamp,
            Self::Char(_) => WireType::Char,
            Self::Bool(_) => WireType::Bool,
            Self::String(_) => WireType::String,
        }
    }
}

impl From<i64> for RawFieldValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<u32> for RawFieldValue {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<f64> for RawFieldValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<Price> for RawFieldValue {
    fn from(value: Price) -> Self {
        Self::Price(value)
    }
}

impl From<Timestamp> for RawFieldValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<char> for RawFieldValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for RawFieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for RawFieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawFieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
