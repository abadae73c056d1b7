//! # Feed Types
//!
//! Data model for normalizing sparse market-data field updates into typed
//! entity snapshots.
//!
//! ## Design Philosophy
//!
//! - **Tagged wire values**: every field arrives as a [`RawFieldValue`] and
//!   keeps its wire type until an update rule normalizes it
//! - **No Precision Loss**: prices stored as scaled integers ([`Price`])
//! - **Freshness is data**: every cached attribute is an [`Attribute<T>`]
//!   carrying a [`FieldState`] next to its value
//! - **One decode path for coded enums**: integer, numeric text and canonical
//!   name all resolve through [`WireCode`]
//!
//! ## Quick Start
//!
//! ```rust
//! use feed_types::{FeedMessage, FieldId, MessageKind, Price, SecurityStatus, WireCode};
//!
//! let msg = FeedMessage::new(MessageKind::Trade)
//!     .with(FieldId(101), Price::from_decimal_str("10.05").unwrap())
//!     .with(FieldId(7), "IBM.N");
//! assert_eq!(msg.len(), 2);
//!
//! assert_eq!(SecurityStatus::parse("3"), SecurityStatus::Halted);
//! assert_eq!(SecurityStatus::parse("Halted"), SecurityStatus::Halted);
//! ```
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec (dispatch, caches, classification)
//!     ↑              ↓
//! Pure Data     Entity events
//! ```

pub mod common;
pub mod feed;

pub use common::errors::{CodeError, PriceError};
pub use common::fixed_point::Price;
pub use common::time::Timestamp;
pub use feed::codes::{ImbalanceType, SecurityStatus, SecurityStatusQualifier, TradeSide, WireCode};
pub use feed::field::{Attribute, FieldId, FieldState};
pub use feed::message::{FeedMessage, MessageKind};
pub use feed::value::{RawFieldValue, WireType};
