//! Shared fixtures for the engine integration tests
//!
//! Every field name the entity kinds bind is given a stable identifier, in
//! declaration order, so tests can address fields by name.

#![allow(dead_code)]

use feed_codec::fields::{common, fundamentals, imbalance, quote, security_status, trade};
use feed_codec::{DispatchRegistry, EntityKind, EntityListener, FieldDictionary, FieldSchema};
use feed_config::EngineSettings;
use feed_types::{FeedMessage, FieldId, MessageKind, RawFieldValue};
use std::sync::Arc;

const NAMES: &[&[&str]] = &[
    &[
        common::SYMBOL,
        common::ISSUE_SYMBOL,
        common::PART_ID,
        common::SRC_TIME,
        common::ACTIVITY_TIME,
        common::LINE_TIME,
        common::SEND_TIME,
        common::PUB_ID,
        common::SEQ_NUM,
    ],
    &[
        trade::TRADE_PRICE,
        trade::TRADE_VOLUME,
        trade::TRADE_PART_ID,
        trade::TRADE_TIME,
        trade::IRREG_PRICE,
        trade::IRREG_SIZE,
        trade::IRREG_PART_ID,
        trade::IRREG_TIME,
        trade::AGGRESSOR_SIDE,
        trade::TRADE_SIDE,
        trade::TRADE_COUNT,
        trade::CONFLATE_COUNT,
        trade::UPDATE_AS_TRADE,
        trade::CANCEL_TIME,
        trade::CORR_TIME,
        trade::CORR_PRICE,
        trade::ACCUM_VOLUME,
        trade::IS_IRREGULAR,
    ],
    &[
        quote::BID_PRICE,
        quote::BID_SIZE,
        quote::ASK_PRICE,
        quote::ASK_SIZE,
        quote::QUOTE_TIME,
        quote::QUOTE_COUNT,
        quote::CONFLATE_COUNT,
        quote::SHORT_SALE_BID_TICK,
    ],
    &[
        imbalance::SECURITY_STATUS_QUAL,
        imbalance::BUY_VOLUME,
        imbalance::SELL_VOLUME,
        imbalance::INDICATION_PRICE,
        imbalance::AUCTION_TIME,
    ],
    &[
        security_status::SECURITY_STATUS,
        security_status::SECURITY_STATUS_NATIVE,
        security_status::REASON,
        security_status::SHORT_SALE_CIRCUIT_BREAKER,
    ],
    &[
        fundamentals::DIVIDEND_PRICE,
        fundamentals::SHARES_OUT,
        fundamentals::MARKET_SECTOR,
    ],
];

/// Ready dictionary holding every fixture field
pub fn dictionary() -> Arc<FieldDictionary> {
    let dictionary = FieldDictionary::new();
    let mut next = 1u16;
    for name in NAMES.iter().flat_map(|group| group.iter()) {
        if dictionary.resolve(name).is_none() {
            dictionary.insert(*name, FieldId(next));
            next += 1;
        }
    }
    dictionary.mark_ready();
    Arc::new(dictionary)
}

pub fn registry() -> Arc<DispatchRegistry> {
    Arc::new(DispatchRegistry::new(dictionary()))
}

pub fn listener<K: EntityKind>() -> EntityListener<K> {
    EntityListener::new(registry(), EngineSettings::default())
}

/// Identifier of a fixture field
pub fn id(name: &str) -> FieldId {
    dictionary()
        .resolve(name)
        .unwrap_or_else(|| panic!("{name} is not a fixture field"))
}

/// Message builder addressing fields by name
pub fn message(kind: MessageKind, fields: &[(&str, RawFieldValue)]) -> FeedMessage {
    let mut message = FeedMessage::with_capacity(kind, fields.len());
    for (name, value) in fields {
        message.push(id(name), value.clone());
    }
    message
}
