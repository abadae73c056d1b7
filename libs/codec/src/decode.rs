//! Wire value coercion shared by every update rule
//!
//! Each helper accepts the set of wire types the feed is known to publish for
//! one kind of attribute and normalizes them to a single in-cache type.
//! Anything outside that set is a [`DecodeError`]; the dispatcher logs it and
//! moves on to the next field.

use crate::error::DecodeError;
use feed_types::{Price, RawFieldValue, Timestamp, WireCode};

pub fn price_value(value: &RawFieldValue) -> Result<Price, DecodeError> {
    match value {
        RawFieldValue::Price(price) => Ok(*price),
        RawFieldValue::F64(v) => Ok(Price::try_from_f64(*v)?),
        RawFieldValue::I64(v) => Ok(Price::try_from_units(*v)?),
        RawFieldValue::U32(v) => Ok(Price::try_from_units(i64::from(*v))?),
        RawFieldValue::String(s) => Ok(Price::from_decimal_str(s)?),
        other => Err(DecodeError::unexpected("price", other.wire_type())),
    }
}

/// Sizes, volumes and ratios
pub fn f64_value(value: &RawFieldValue) -> Result<f64, DecodeError> {
    match value {
        RawFieldValue::F64(v) => Ok(*v),
        RawFieldValue::Price(price) => Ok(price.to_f64()),
        RawFieldValue::I64(v) => Ok(*v as f64),
        RawFieldValue::U32(v) => Ok(f64::from(*v)),
        other => Err(DecodeError::unexpected("number", other.wire_type())),
    }
}

pub fn i64_value(value: &RawFieldValue) -> Result<i64, DecodeError> {
    match value {
        RawFieldValue::I64(v) => Ok(*v),
        RawFieldValue::U32(v) => Ok(i64::from(*v)),
        other => Err(DecodeError::unexpected("integer", other.wire_type())),
    }
}

pub fn u64_value(value: &RawFieldValue) -> Result<u64, DecodeError> {
    match value {
        RawFieldValue::I64(v) => u64::try_from(*v).map_err(|_| DecodeError::out_of_range(*v, "u64")),
        RawFieldValue::U32(v) => Ok(u64::from(*v)),
        other => Err(DecodeError::unexpected("integer", other.wire_type())),
    }
}

pub fn bool_value(value: &RawFieldValue) -> Result<bool, DecodeError> {
    match value {
        RawFieldValue::Bool(v) => Ok(*v),
        RawFieldValue::I64(v) => Ok(*v != 0),
        RawFieldValue::U32(v) => Ok(*v != 0),
        other => Err(DecodeError::unexpected("boolean", other.wire_type())),
    }
}

/// Timestamps arrive natively or as integer nanoseconds
pub fn timestamp_value(value: &RawFieldValue) -> Result<Timestamp, DecodeError> {
    match value {
        RawFieldValue::Timestamp(ts) => Ok(*ts),
        RawFieldValue::I64(v) => u64::try_from(*v)
            .map(Timestamp::from_nanos)
            .map_err(|_| DecodeError::out_of_range(*v, "timestamp")),
        other => Err(DecodeError::unexpected("timestamp", other.wire_type())),
    }
}

/// Single-character attribute
///
/// Some feed handlers publish these as length-1 strings; an empty string is a
/// blank indicator.
pub fn char_value(value: &RawFieldValue) -> Result<char, DecodeError> {
    match value {
        RawFieldValue::Char(c) => Ok(*c),
        RawFieldValue::String(s) => Ok(s.chars().next().unwrap_or(' ')),
        other => Err(DecodeError::unexpected("char or string", other.wire_type())),
    }
}

pub fn string_value(value: &RawFieldValue) -> Result<String, DecodeError> {
    match value {
        RawFieldValue::String(s) => Ok(s.clone()),
        other => Err(DecodeError::unexpected("string", other.wire_type())),
    }
}

/// String attribute that some feeds publish as an integer
pub fn text_value(value: &RawFieldValue) -> Result<String, DecodeError> {
    match value {
        RawFieldValue::String(s) => Ok(s.clone()),
        RawFieldValue::I64(v) => Ok(v.to_string()),
        RawFieldValue::U32(v) => Ok(v.to_string()),
        other => Err(DecodeError::unexpected("string or integer", other.wire_type())),
    }
}

/// Coded enum published as an integer, a numeric string or a canonical name
pub fn code_value<E: WireCode>(value: &RawFieldValue) -> Result<E, DecodeError> {
    match value {
        RawFieldValue::I64(v) => Ok(E::from_code(*v)),
        RawFieldValue::U32(v) => Ok(E::from_code(i64::from(*v))),
        RawFieldValue::String(s) => Ok(E::parse(s)),
        other => Err(DecodeError::unexpected("integer or string", other.wire_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_types::{SecurityStatus, TradeSide, WireType};

    #[test]
    fn test_char_as_string_quirk() {
        assert_eq!(char_value(&RawFieldValue::Char('A')), Ok('A'));
        assert_eq!(char_value(&"B".into()), Ok('B'));
        assert_eq!(char_value(&"".into()), Ok(' '));
        assert_eq!(
            char_value(&RawFieldValue::I64(65)),
            Err(DecodeError::unexpected("char or string", WireType::I64))
        );
    }

    #[test]
    fn test_code_value_spellings() {
        let by_int: SecurityStatus = code_value(&RawFieldValue::I64(3)).unwrap();
        let by_u32: SecurityStatus = code_value(&RawFieldValue::U32(3)).unwrap();
        let by_text: SecurityStatus = code_value(&"3".into()).unwrap();
        let by_name: SecurityStatus = code_value(&"Halted".into()).unwrap();
        assert_eq!(by_int, SecurityStatus::Halted);
        assert_eq!(by_u32, by_int);
        assert_eq!(by_text, by_int);
        assert_eq!(by_name, by_int);

        assert!(code_value::<TradeSide>(&RawFieldValue::F64(1.0)).is_err());
    }

    #[test]
    fn test_price_coercions() {
        assert_eq!(price_value(&RawFieldValue::F64(10.05)), Ok(Price(1_005_000_000)));
        assert_eq!(price_value(&RawFieldValue::I64(10)), Ok(Price(1_000_000_000)));
        assert_eq!(price_value(&"10.10".into()), Ok(Price(1_010_000_000)));
        assert!(matches!(
            price_value(&RawFieldValue::F64(f64::NAN)),
            Err(DecodeError::InvalidPrice(_))
        ));
        assert!(price_value(&RawFieldValue::Bool(true)).is_err());
    }

    #[test]
    fn test_integer_ranges() {
        assert_eq!(u64_value(&RawFieldValue::I64(-1)), Err(DecodeError::out_of_range(-1i64, "u64")));
        assert_eq!(u64_value(&RawFieldValue::U32(7)), Ok(7));
        assert_eq!(text_value(&RawFieldValue::I64(42)), Ok("42".to_string()));
        assert_eq!(
            timestamp_value(&RawFieldValue::I64(1_000)),
            Ok(Timestamp::from_nanos(1_000))
        );
    }
}
