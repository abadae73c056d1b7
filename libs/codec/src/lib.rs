//! # Feed Codec - Decode/Cache/Classify Engine
//!
//! ## Purpose
//!
//! Normalizes sparse field updates from a market-data feed into complete,
//! strongly typed entity snapshots, and classifies every message into a
//! small set of domain events:
//! - Per-kind dispatch tables from field identifiers to update rules
//! - Entity caches tracking value and freshness per attribute
//! - Sequence gap and duplicate detection with conflation compensation
//! - Classification and notification of one handler per entity
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec engine] → handler
//!     ↑             ↓
//! Raw values   Dispatch, cache,
//! FeedMessage  derive, classify
//! ```
//!
//! ## Entity Kinds
//!
//! | Kind | Events |
//! |---|---|
//! | [`TradeKind`] | recap, report, cancel, error, correction, closing, gap |
//! | [`QuoteKind`] | recap, update, gap |
//! | [`ImbalanceKind`] | recap, order imbalance, no order imbalance |
//! | [`SecurityStatusKind`] | recap, update |
//! | [`FundamentalsKind`] | fundamentals |
//!
//! ## Usage
//!
//! ```rust
//! use feed_codec::{DispatchRegistry, EntityListener, FieldDictionary, QuoteKind};
//! use feed_config::EngineSettings;
//! use feed_types::{FeedMessage, MessageKind};
//! use std::sync::Arc;
//!
//! let dictionary = FieldDictionary::from_entries([("wBidPrice", 1), ("wAskPrice", 2)]);
//! let registry = Arc::new(DispatchRegistry::new(Arc::new(dictionary)));
//! let quotes = EntityListener::<QuoteKind>::new(registry, EngineSettings::default());
//!
//! let message = FeedMessage::new(MessageKind::Quote)
//!     .with(1u16, 10.00)
//!     .with(2u16, 10.10);
//! let outcome = quotes.on_message(&message)?;
//! assert_eq!(outcome.events.len(), 1);
//! assert!(quotes.with_cache(|cache| cache.mid_price()).is_some());
//! # Ok::<(), feed_codec::EngineError>(())
//! ```

pub mod cache;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod kinds;
pub mod listener;
pub mod registry;
pub mod schema;
pub mod sequence;

pub use cache::{CacheAttributes, CommonAttributes, CommonRecord, EntityCache, MessageRecord};
pub use dispatch::{Binding, DispatchSummary, DispatchTable, UpdateRule};
pub use error::{DecodeError, EngineError, EngineResult};
pub use kinds::{
    fundamentals::{FundamentalsCache, FundamentalsEvent, FundamentalsKind},
    imbalance::{ImbalanceCache, ImbalanceEvent, ImbalanceKind},
    quote::{QuoteCache, QuoteEvent, QuoteKind},
    security_status::{SecurityStatusCache, SecurityStatusEvent, SecurityStatusKind},
    trade::{TradeCache, TradeEvent, TradeKind},
};
pub use listener::{EntityKind, EntityListener, EventHandler, MessageOutcome, Notifications};
pub use registry::{DispatchRegistry, TableSlot};
pub use schema::{FieldAliases, FieldDictionary, FieldSchema};
pub use sequence::{SequenceCheck, SequenceGapDetector};
