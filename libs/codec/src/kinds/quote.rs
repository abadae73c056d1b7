//! Quote kind: best bid and offer of one instrument
//!
//! Quote messages always report; trade and generic update messages report
//! only when they carried a bid or ask field. The mid price is computed from
//! the current cache on every read.

use super::{assign, common_bindings};
use crate::cache::{entity_cache, message_record, CommonRecord};
use crate::decode::{char_value, f64_value, i64_value, price_value, string_value, timestamp_value, u64_value};
use crate::dispatch::{Binding, UpdateRule};
use crate::fields::quote as f;
use crate::listener::{EntityKind, Notifications};
use crate::registry::{DispatchRegistry, TableSlot};
use crate::sequence::{SequenceCheck, SequenceGapDetector};
use feed_config::EngineSettings;
use feed_types::{MessageKind, Price, Timestamp};
use tracing::debug;

entity_cache! {
    /// Quote snapshot
    pub struct QuoteCache {
        common;
        attributes {
            bid_price: Price,
            bid_size: f64,
            bid_part_id: String,
            bid_depth: f64,
            bid_close: Price,
            prev_bid_close: Price,
            bid_high: Price,
            bid_low: Price,
            ask_price: Price,
            ask_size: f64,
            ask_part_id: String,
            ask_depth: f64,
            ask_close: Price,
            prev_ask_close: Price,
            ask_high: Price,
            ask_low: Price,
            quote_seq_num: u64,
            quote_date: Timestamp,
            quote_time: Timestamp,
            event_time: Timestamp,
            quote_qualifier: String,
            condition: String,
            quote_count: u64,
            conflate_count: u64,
            short_sale_bid_tick: char,
            short_sale_circuit_breaker: char,
        }
        state {
            sequence: SequenceGapDetector,
        }
    }
}

impl QuoteCache {
    /// Midpoint of bid and ask, when both are strictly positive
    pub fn mid_price(&self) -> Option<Price> {
        let bid = self.bid_price.copied();
        let ask = self.ask_price.copied();
        (bid.is_positive() && ask.is_positive()).then(|| bid.midpoint(ask))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteRecord {
    pub common: CommonRecord,
    /// Any bid or ask price, size, depth or participant arrived
    pub got_bid_ask: bool,
    pub quote_count: Option<i64>,
    pub conflate_count: Option<u64>,
}

message_record!(QuoteRecord);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEvent {
    Recap,
    Update,
    /// Quote counters `begin..=end` were never delivered
    Gap { begin: u64, end: u64 },
}

pub struct QuoteKind;

type Rule = UpdateRule<QuoteKind>;

fn bind(field: &'static str, rule: Rule) -> Binding<QuoteKind> {
    Binding::new(field, rule)
}

impl EntityKind for QuoteKind {
    const NAME: &'static str = "quote";
    const REQUIRED_FIELDS: &'static [&'static str] = f::REQUIRED;

    type Cache = QuoteCache;
    type Record = QuoteRecord;
    type Event = QuoteEvent;

    fn bindings() -> Vec<Binding<Self>> {
        let mut bindings = common_bindings::<Self>();
        bindings.extend([
            bind(f::BID_PRICE, |c, v, r| {
                c.bid_price.set(price_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::BID_SIZE, |c, v, r| {
                c.bid_size.set(f64_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::BID_PART_ID, |c, v, r| {
                c.bid_part_id.set(string_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::BID_DEPTH, |c, v, r| {
                c.bid_depth.set(f64_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::BID_CLOSE, |c, v, _| assign(&mut c.bid_close, price_value(v))),
            bind(f::PREV_BID_CLOSE, |c, v, _| assign(&mut c.prev_bid_close, price_value(v))),
            bind(f::BID_HIGH, |c, v, _| assign(&mut c.bid_high, price_value(v))),
            bind(f::BID_LOW, |c, v, _| assign(&mut c.bid_low, price_value(v))),
            bind(f::ASK_PRICE, |c, v, r| {
                c.ask_price.set(price_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::ASK_SIZE, |c, v, r| {
                c.ask_size.set(f64_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::ASK_PART_ID, |c, v, r| {
                c.ask_part_id.set(string_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::ASK_DEPTH, |c, v, r| {
                c.ask_depth.set(f64_value(v)?);
                r.got_bid_ask = true;
                Ok(true)
            }),
            bind(f::ASK_CLOSE, |c, v, _| assign(&mut c.ask_close, price_value(v))),
            bind(f::PREV_ASK_CLOSE, |c, v, _| assign(&mut c.prev_ask_close, price_value(v))),
            bind(f::ASK_HIGH, |c, v, _| assign(&mut c.ask_high, price_value(v))),
            bind(f::ASK_LOW, |c, v, _| assign(&mut c.ask_low, price_value(v))),
            bind(f::QUOTE_SEQ_NUM, |c, v, _| assign(&mut c.quote_seq_num, u64_value(v))),
            bind(f::QUOTE_DATE, |c, v, _| assign(&mut c.quote_date, timestamp_value(v))),
            bind(f::QUOTE_TIME, |c, v, _| {
                let time = timestamp_value(v)?;
                c.quote_time.set(time);
                c.event_time.set(time);
                Ok(true)
            }),
            bind(f::QUOTE_QUALIFIER, |c, v, _| assign(&mut c.quote_qualifier, string_value(v))),
            bind(f::CONDITION, |c, v, _| assign(&mut c.condition, string_value(v))),
            bind(f::QUOTE_COUNT, |c, v, r| {
                let count = i64_value(v)?;
                r.quote_count = Some(count);
                c.quote_count.set(u64::try_from(count).unwrap_or(0));
                Ok(true)
            }),
            bind(f::CONFLATE_COUNT, |c, v, r| {
                let count = u64_value(v)?;
                r.conflate_count = Some(count);
                c.conflate_count.set(count);
                Ok(true)
            }),
            bind(f::SHORT_SALE_BID_TICK, |c, v, _| {
                assign(&mut c.short_sale_bid_tick, char_value(v))
            }),
            bind(f::SHORT_SALE_CIRCUIT_BREAKER, |c, v, _| {
                assign(&mut c.short_sale_circuit_breaker, char_value(v))
            }),
        ]);
        bindings
    }

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self> {
        &registry.quote
    }

    fn new_cache(_settings: &EngineSettings) -> QuoteCache {
        QuoteCache::default()
    }

    fn accepts(kind: MessageKind) -> bool {
        kind.is_recap()
            || matches!(
                kind,
                MessageKind::Quote | MessageKind::Trade | MessageKind::Update
            )
    }

    fn derive(_cache: &mut QuoteCache, _record: &QuoteRecord, _kind: MessageKind) {}

    fn classify(
        cache: &mut QuoteCache,
        record: &QuoteRecord,
        kind: MessageKind,
        settings: &EngineSettings,
    ) -> Notifications<QuoteEvent> {
        if kind.is_recap() {
            if let Some(counter) = record.quote_count {
                cache.sequence.observe_recap(counter, record.conflate_count);
            }
            return Notifications::primary(QuoteEvent::Recap);
        }

        // Trade and update messages are sequenced only when they carried a quote
        let sequenced = kind == MessageKind::Quote || record.got_bid_ask;
        let check = match record.quote_count.filter(|_| sequenced) {
            Some(counter) => {
                cache
                    .sequence
                    .observe(counter, record.conflate_count, settings.default_conflation)
            }
            None => SequenceCheck::Accepted,
        };

        let gap = check.gap().map(|(begin, end)| QuoteEvent::Gap { begin, end });
        if check.is_duplicate() {
            debug!(symbol = %cache.common.symbol.value(), %kind, "duplicate quote suppressed");
            return Notifications { gap, primary: None };
        }

        let primary = match kind {
            MessageKind::Quote => Some(QuoteEvent::Update),
            _ => record.got_bid_ask.then_some(QuoteEvent::Update),
        };

        Notifications { gap, primary }
    }
}
