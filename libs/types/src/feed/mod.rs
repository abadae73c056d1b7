//! Feed-level data model: field ids, wire values, messages and coded enums

pub mod codes;
pub mod field;
pub mod message;
pub mod value;
