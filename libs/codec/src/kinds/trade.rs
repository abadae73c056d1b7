//! # Trade Kind
//!
//! ## Purpose
//!
//! Maintains the trade tape of one instrument and classifies each message
//! as a recap, a trade report, a cancel/error, a correction or a closing
//! report, plus a gap event when the trade counter skips.
//!
//! ## Regular and irregular trades
//!
//! The feed reports trades through two field groups: the regular "last"
//! group (`wTradePrice`, `wTradeVolume`, `wTradePartId`, `wTradeTime`) and
//! the irregular group (`wIrregPrice`, `wIrregSize`, `wIrregPartId`,
//! `wIrregTime`). The canonical `trade_*` attributes are copied from
//! whichever group the message implied:
//!
//! - a regular field present: regular (also when irregular fields came too)
//! - only non-empty irregular fields present: irregular
//! - neither group present: an explicit `wIsIrregular` flag, if sent
//! - otherwise the previous decision stands
//!
//! Recaps keep the decision the entity had before the recap.

use super::{assign, common_bindings};
use crate::cache::{entity_cache, message_record, CommonRecord};
use crate::decode::{
    bool_value, char_value, f64_value, i64_value, price_value, string_value, text_value,
    timestamp_value, u64_value,
};
use crate::dispatch::{Binding, UpdateRule};
use crate::error::DecodeError;
use crate::fields::trade as f;
use crate::listener::{EntityKind, Notifications};
use crate::registry::{DispatchRegistry, TableSlot};
use crate::sequence::{SequenceCheck, SequenceGapDetector};
use feed_config::EngineSettings;
use feed_types::{Attribute, MessageKind, Price, RawFieldValue, Timestamp, TradeSide, WireCode};
use tracing::debug;

entity_cache! {
    /// Trade tape snapshot
    pub struct TradeCache {
        common;
        attributes {
            last_price: Price,
            last_volume: f64,
            last_part_id: String,
            last_time: Timestamp,
            trade_date: Timestamp,
            irreg_price: Price,
            irreg_volume: f64,
            irreg_part_id: String,
            irreg_time: Timestamp,
            /// Canonical trade, from the regular or irregular group
            trade_price: Price,
            trade_volume: f64,
            trade_part_id: String,
            event_time: Timestamp,
            is_irregular: bool,
            trade_direction: String,
            aggressor_side: TradeSide,
            trade_side: TradeSide,
            trade_count: u64,
            conflate_count: u64,
            accum_volume: f64,
            open_price: Price,
            high_price: Price,
            low_price: Price,
            close_price: Price,
            prev_close_price: Price,
            net_change: Price,
            pct_change: f64,
            trade_qualifier: String,
            sale_condition: String,
            stop_stock_indicator: char,
            exec_venue: String,
            trade_id: String,
            orig_trade_id: String,
            corr_trade_id: String,
            orig_price: Price,
            orig_volume: f64,
            orig_part_id: String,
            orig_seq_num: u64,
            corr_price: Price,
            corr_volume: f64,
            corr_part_id: String,
            corr_time: Timestamp,
            cancel_time: Timestamp,
            short_sale_circuit_breaker: char,
            vwap: Price,
            total_value: f64,
        }
        state {
            sequence: SequenceGapDetector,
            /// Report Update messages that carry trade fields
            process_update_as_trade: bool,
        }
    }
}

/// What one message told the trade derivation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeRecord {
    pub common: CommonRecord,
    pub irregular_seen: bool,
    pub regular_seen: bool,
    pub got_trade_price: bool,
    pub got_trade_size: bool,
    pub got_trade_time: bool,
    pub got_cancel_time: bool,
    pub got_corr_time: bool,
    /// `wIsIrregular` as sent by the feed
    pub explicit_irregular: Option<bool>,
    pub trade_count: Option<i64>,
    pub conflate_count: Option<u64>,
}

message_record!(TradeRecord);

impl TradeRecord {
    pub fn got_trade_fields(&self) -> bool {
        self.got_trade_price || self.got_trade_size || self.got_trade_time
    }
}

/// Classified trade events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeEvent {
    Recap,
    Report { event_time: Timestamp },
    Cancel { event_time: Timestamp },
    Error { event_time: Timestamp },
    Correction { event_time: Timestamp },
    Closing,
    /// Trade counters `begin..=end` were never delivered
    Gap { begin: u64, end: u64 },
}

pub struct TradeKind;

type Rule = UpdateRule<TradeKind>;

fn bind(field: &'static str, rule: Rule) -> Binding<TradeKind> {
    Binding::new(field, rule)
}

/// Side fields arrive as a char, an integer code or text
fn side_value(value: &RawFieldValue) -> Result<TradeSide, DecodeError> {
    match value {
        RawFieldValue::Char(c) => Ok(TradeSide::from_char(*c)),
        RawFieldValue::I64(v) => Ok(TradeSide::from_code(*v)),
        RawFieldValue::U32(v) => Ok(TradeSide::from_code(i64::from(*v))),
        RawFieldValue::String(s) => Ok(TradeSide::parse_text(s)),
        other => Err(DecodeError::unexpected("char, integer or string", other.wire_type())),
    }
}

/// Copy `source` into `target` when it is fresh or the group switched
fn reconcile<T: Clone>(target: &mut Attribute<T>, source: &Attribute<T>, switched: bool) {
    if source.is_initialized() && (switched || source.is_modified()) {
        target.set(source.value().clone());
    }
}

impl EntityKind for TradeKind {
    const NAME: &'static str = "trade";
    const REQUIRED_FIELDS: &'static [&'static str] = f::REQUIRED;

    type Cache = TradeCache;
    type Record = TradeRecord;
    type Event = TradeEvent;

    fn bindings() -> Vec<Binding<Self>> {
        let mut bindings = common_bindings::<Self>();
        bindings.extend([
            bind(f::TRADE_PRICE, |c, v, r| {
                c.last_price.set(price_value(v)?);
                r.regular_seen = true;
                r.got_trade_price = true;
                Ok(true)
            }),
            bind(f::TRADE_VOLUME, |c, v, r| {
                c.last_volume.set(f64_value(v)?);
                r.regular_seen = true;
                r.got_trade_size = true;
                Ok(true)
            }),
            bind(f::TRADE_PART_ID, |c, v, r| {
                c.last_part_id.set(string_value(v)?);
                r.regular_seen = true;
                Ok(true)
            }),
            bind(f::TRADE_TIME, |c, v, r| {
                c.last_time.set(timestamp_value(v)?);
                r.got_trade_time = true;
                Ok(true)
            }),
            bind(f::TRADE_DATE, |c, v, _| assign(&mut c.trade_date, timestamp_value(v))),
            bind(f::IRREG_PRICE, |c, v, r| {
                let price = price_value(v)?;
                c.irreg_price.set(price);
                r.irregular_seen |= !price.is_zero();
                r.got_trade_price = true;
                Ok(true)
            }),
            bind(f::IRREG_SIZE, |c, v, r| {
                let size = f64_value(v)?;
                c.irreg_volume.set(size);
                r.irregular_seen |= size != 0.0;
                r.got_trade_size = true;
                Ok(true)
            }),
            bind(f::IRREG_PART_ID, |c, v, r| {
                let part_id = string_value(v)?;
                r.irregular_seen |= !part_id.is_empty();
                c.irreg_part_id.set(part_id);
                Ok(true)
            }),
            bind(f::IRREG_TIME, |c, v, r| {
                let time = timestamp_value(v)?;
                c.irreg_time.set(time);
                r.irregular_seen |= time.is_set();
                r.got_trade_time = true;
                Ok(true)
            }),
            bind(f::IS_IRREGULAR, |_, v, r| {
                r.explicit_irregular = Some(bool_value(v)?);
                Ok(true)
            }),
            bind(f::TRADE_DIRECTION, |c, v, _| assign(&mut c.trade_direction, text_value(v))),
            bind(f::AGGRESSOR_SIDE, |c, v, _| assign(&mut c.aggressor_side, side_value(v))),
            bind(f::TRADE_SIDE, |c, v, _| assign(&mut c.trade_side, side_value(v))),
            bind(f::TRADE_COUNT, |c, v, r| {
                let count = i64_value(v)?;
                r.trade_count = Some(count);
                c.trade_count.set(u64::try_from(count).unwrap_or(0));
                Ok(true)
            }),
            bind(f::CONFLATE_COUNT, |c, v, r| {
                let count = u64_value(v)?;
                r.conflate_count = Some(count);
                c.conflate_count.set(count);
                Ok(true)
            }),
            bind(f::UPDATE_AS_TRADE, |c, v, _| {
                c.process_update_as_trade = bool_value(v)?;
                Ok(true)
            }),
            bind(f::ACCUM_VOLUME, |c, v, _| assign(&mut c.accum_volume, f64_value(v))),
            bind(f::OPEN_PRICE, |c, v, _| assign(&mut c.open_price, price_value(v))),
            bind(f::HIGH_PRICE, |c, v, _| assign(&mut c.high_price, price_value(v))),
            bind(f::LOW_PRICE, |c, v, _| assign(&mut c.low_price, price_value(v))),
            bind(f::CLOSE_PRICE, |c, v, _| assign(&mut c.close_price, price_value(v))),
            bind(f::PREV_CLOSE_PRICE, |c, v, _| assign(&mut c.prev_close_price, price_value(v))),
            bind(f::NET_CHANGE, |c, v, _| assign(&mut c.net_change, price_value(v))),
            bind(f::PCT_CHANGE, |c, v, _| assign(&mut c.pct_change, f64_value(v))),
            bind(f::TRADE_QUALIFIER, |c, v, _| assign(&mut c.trade_qualifier, string_value(v))),
            bind(f::SALE_CONDITION, |c, v, _| assign(&mut c.sale_condition, string_value(v))),
            bind(f::STOP_STOCK_INDICATOR, |c, v, _| {
                assign(&mut c.stop_stock_indicator, char_value(v))
            }),
            bind(f::EXEC_VENUE, |c, v, _| assign(&mut c.exec_venue, text_value(v))),
            bind(f::TRADE_ID, |c, v, _| assign(&mut c.trade_id, text_value(v))),
            bind(f::ORIG_TRADE_ID, |c, v, _| assign(&mut c.orig_trade_id, text_value(v))),
            bind(f::CORR_TRADE_ID, |c, v, _| assign(&mut c.corr_trade_id, text_value(v))),
            bind(f::ORIG_PRICE, |c, v, _| assign(&mut c.orig_price, price_value(v))),
            bind(f::ORIG_SIZE, |c, v, _| assign(&mut c.orig_volume, f64_value(v))),
            bind(f::ORIG_PART_ID, |c, v, _| assign(&mut c.orig_part_id, string_value(v))),
            bind(f::ORIG_SEQ_NUM, |c, v, _| assign(&mut c.orig_seq_num, u64_value(v))),
            bind(f::CORR_PRICE, |c, v, _| assign(&mut c.corr_price, price_value(v))),
            bind(f::CORR_SIZE, |c, v, _| assign(&mut c.corr_volume, f64_value(v))),
            bind(f::CORR_PART_ID, |c, v, _| assign(&mut c.corr_part_id, string_value(v))),
            bind(f::CORR_TIME, |c, v, r| {
                c.corr_time.set(timestamp_value(v)?);
                r.got_corr_time = true;
                Ok(true)
            }),
            bind(f::CANCEL_TIME, |c, v, r| {
                c.cancel_time.set(timestamp_value(v)?);
                r.got_cancel_time = true;
                Ok(true)
            }),
            bind(f::SHORT_SALE_CIRCUIT_BREAKER, |c, v, _| {
                assign(&mut c.short_sale_circuit_breaker, char_value(v))
            }),
            bind(f::VWAP, |c, v, _| assign(&mut c.vwap, price_value(v))),
            bind(f::TOTAL_VALUE, |c, v, _| assign(&mut c.total_value, f64_value(v))),
        ]);
        bindings
    }

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self> {
        &registry.trade
    }

    fn new_cache(settings: &EngineSettings) -> TradeCache {
        TradeCache {
            process_update_as_trade: settings.process_update_as_trade,
            ..TradeCache::default()
        }
    }

    fn accepts(kind: MessageKind) -> bool {
        kind.is_recap()
            || matches!(
                kind,
                MessageKind::Trade
                    | MessageKind::Update
                    | MessageKind::Cancel
                    | MessageKind::Error
                    | MessageKind::Correction
                    | MessageKind::Closing
            )
    }

    fn derive(cache: &mut TradeCache, record: &TradeRecord, kind: MessageKind) {
        let previous = cache.is_irregular.copied();
        let decided = if kind.is_recap() {
            None
        } else if record.regular_seen {
            Some(false)
        } else if record.irregular_seen {
            Some(true)
        } else {
            record.explicit_irregular
        };

        if let Some(flag) = decided {
            cache.is_irregular.set(flag);
        }
        let irregular = decided.unwrap_or(previous);

        let switched = irregular != previous;
        if irregular {
            reconcile(&mut cache.trade_price, &cache.irreg_price, switched);
            reconcile(&mut cache.trade_volume, &cache.irreg_volume, switched);
            reconcile(&mut cache.trade_part_id, &cache.irreg_part_id, switched);
            // Some feeds only publish the regular time
            if cache.irreg_time.value().is_set() {
                reconcile(&mut cache.event_time, &cache.irreg_time, switched);
            } else {
                reconcile(&mut cache.event_time, &cache.last_time, switched);
            }
        } else {
            reconcile(&mut cache.trade_price, &cache.last_price, switched);
            reconcile(&mut cache.trade_volume, &cache.last_volume, switched);
            reconcile(&mut cache.trade_part_id, &cache.last_part_id, switched);
            reconcile(&mut cache.event_time, &cache.last_time, switched);
        }
    }

    fn classify(
        cache: &mut TradeCache,
        record: &TradeRecord,
        kind: MessageKind,
        settings: &EngineSettings,
    ) -> Notifications<TradeEvent> {
        if kind.is_recap() {
            if let Some(counter) = record.trade_count {
                cache.sequence.observe_recap(counter, record.conflate_count);
            }
            return Notifications::primary(TradeEvent::Recap);
        }

        // Updates are dropped entirely unless reported as trades
        let sequenced = kind != MessageKind::Update || cache.process_update_as_trade;
        let check = match record.trade_count.filter(|_| sequenced) {
            Some(counter) => {
                cache
                    .sequence
                    .observe(counter, record.conflate_count, settings.default_conflation)
            }
            None => SequenceCheck::Accepted,
        };

        let gap = check.gap().map(|(begin, end)| TradeEvent::Gap { begin, end });
        if check.is_duplicate() {
            debug!(symbol = %cache.common.symbol.value(), %kind, "duplicate trade suppressed");
            return Notifications { gap, primary: None };
        }

        let event_time = cache.event_time.copied();
        let cancel_time = if record.got_cancel_time {
            cache.cancel_time.copied()
        } else {
            event_time
        };

        let primary = match kind {
            MessageKind::Trade => Some(TradeEvent::Report { event_time }),
            MessageKind::Update => (cache.process_update_as_trade && record.got_trade_fields())
                .then_some(TradeEvent::Report { event_time }),
            MessageKind::Cancel => Some(TradeEvent::Cancel {
                event_time: cancel_time,
            }),
            MessageKind::Error => Some(TradeEvent::Error {
                event_time: cancel_time,
            }),
            MessageKind::Correction => Some(TradeEvent::Correction {
                event_time: if record.got_corr_time {
                    cache.corr_time.copied()
                } else {
                    event_time
                },
            }),
            MessageKind::Closing => Some(TradeEvent::Closing),
            _ => None,
        };

        Notifications { gap, primary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_value_spellings() {
        assert_eq!(side_value(&RawFieldValue::Char('B')), Ok(TradeSide::Buy));
        assert_eq!(side_value(&RawFieldValue::I64(2)), Ok(TradeSide::Sell));
        assert_eq!(side_value(&"Sell".into()), Ok(TradeSide::Sell));
        assert_eq!(side_value(&"2".into()), Ok(TradeSide::Sell));
        assert_eq!(side_value(&"S".into()), Ok(TradeSide::Sell));
        assert_eq!(side_value(&"?".into()), Ok(TradeSide::Unknown));
        assert!(side_value(&RawFieldValue::F64(1.0)).is_err());
    }

    #[test]
    fn test_regular_wins_over_irregular() {
        let mut cache = TradeKind::new_cache(&EngineSettings::default());
        cache.last_price.set(Price(100));
        cache.irreg_price.set(Price(200));

        let record = TradeRecord {
            irregular_seen: true,
            regular_seen: true,
            ..TradeRecord::default()
        };
        TradeKind::derive(&mut cache, &record, MessageKind::Trade);

        assert!(!cache.is_irregular.copied());
        assert_eq!(cache.trade_price.copied(), Price(100));
    }

    #[test]
    fn test_irregular_time_falls_back_to_last_time() {
        let mut cache = TradeKind::new_cache(&EngineSettings::default());
        cache.last_time.set(Timestamp::from_nanos(10));
        cache.irreg_price.set(Price(200));
        cache.irreg_time.set(Timestamp::EMPTY);

        let record = TradeRecord {
            irregular_seen: true,
            ..TradeRecord::default()
        };
        TradeKind::derive(&mut cache, &record, MessageKind::Trade);

        assert!(cache.is_irregular.copied());
        assert_eq!(cache.event_time.copied(), Timestamp::from_nanos(10));
    }

    #[test]
    fn test_explicit_flag_decides_when_no_group_seen() {
        let mut cache = TradeKind::new_cache(&EngineSettings::default());
        cache.last_price.set(Price(100));
        cache.irreg_price.set(Price(200));

        let flagged = TradeRecord {
            explicit_irregular: Some(true),
            ..TradeRecord::default()
        };
        TradeKind::derive(&mut cache, &flagged, MessageKind::Trade);
        assert!(cache.is_irregular.copied());
        assert_eq!(cache.trade_price.copied(), Price(200));

        // Field groups outrank the flag
        let regular = TradeRecord {
            regular_seen: true,
            explicit_irregular: Some(true),
            ..TradeRecord::default()
        };
        TradeKind::derive(&mut cache, &regular, MessageKind::Trade);
        assert!(!cache.is_irregular.copied());
        assert_eq!(cache.trade_price.copied(), Price(100));
    }

    #[test]
    fn test_recap_keeps_irregular_decision() {
        let mut cache = TradeKind::new_cache(&EngineSettings::default());
        cache.is_irregular.set(true);
        cache.last_price.set(Price(100));

        let record = TradeRecord {
            regular_seen: true,
            ..TradeRecord::default()
        };
        TradeKind::derive(&mut cache, &record, MessageKind::Recap);
        assert!(cache.is_irregular.copied());
    }
}
