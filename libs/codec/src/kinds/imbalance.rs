//! Order imbalance kind
//!
//! Any imbalance field in an update marks the message as imbalance content;
//! the status qualifier then decides between an order imbalance and a
//! "no imbalance" notice.

use super::{assign, common_bindings};
use crate::cache::{entity_cache, message_record, CommonRecord};
use crate::decode::{char_value, code_value, f64_value, price_value, string_value, timestamp_value, u64_value};
use crate::dispatch::{Binding, UpdateRule};
use crate::error::DecodeError;
use crate::fields::imbalance as f;
use crate::listener::{EntityKind, Notifications};
use crate::registry::{DispatchRegistry, TableSlot};
use feed_config::EngineSettings;
use feed_types::{ImbalanceType, MessageKind, Price, Timestamp};

entity_cache! {
    /// Order imbalance snapshot
    pub struct ImbalanceCache {
        common;
        attributes {
            high_indication_price: Price,
            low_indication_price: Price,
            indication_price: Price,
            buy_volume: f64,
            sell_volume: f64,
            match_volume: f64,
            security_status_qual: ImbalanceType,
            inside_match_price: Price,
            far_clearing_price: Price,
            near_clearing_price: Price,
            no_clearing_price: char,
            price_var_ind: char,
            cross_type: char,
            event_time: Timestamp,
            event_seq_num: u64,
            security_status_time: Timestamp,
            auction_time: Timestamp,
            security_status_orig: String,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImbalanceRecord {
    pub common: CommonRecord,
    pub got_imbalance: bool,
}

message_record!(ImbalanceRecord);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImbalanceEvent {
    Recap,
    OrderImbalance,
    NoOrderImbalance,
}

pub struct ImbalanceKind;

type Rule = UpdateRule<ImbalanceKind>;

fn bind(field: &'static str, rule: Rule) -> Binding<ImbalanceKind> {
    Binding::new(field, rule)
}

/// Assign and mark the message as imbalance content
fn imbalance<T>(
    attr: &mut feed_types::Attribute<T>,
    record: &mut ImbalanceRecord,
    value: Result<T, DecodeError>,
) -> Result<bool, DecodeError> {
    let assigned = assign(attr, value)?;
    record.got_imbalance = true;
    Ok(assigned)
}

impl EntityKind for ImbalanceKind {
    const NAME: &'static str = "imbalance";
    const REQUIRED_FIELDS: &'static [&'static str] = f::REQUIRED;

    type Cache = ImbalanceCache;
    type Record = ImbalanceRecord;
    type Event = ImbalanceEvent;

    fn bindings() -> Vec<Binding<Self>> {
        let mut bindings = common_bindings::<Self>();
        bindings.extend([
            bind(f::HIGH_INDICATION_PRICE, |c, v, r| {
                imbalance(&mut c.high_indication_price, r, price_value(v))
            }),
            bind(f::LOW_INDICATION_PRICE, |c, v, r| {
                imbalance(&mut c.low_indication_price, r, price_value(v))
            }),
            bind(f::INDICATION_PRICE, |c, v, r| {
                imbalance(&mut c.indication_price, r, price_value(v))
            }),
            bind(f::BUY_VOLUME, |c, v, r| imbalance(&mut c.buy_volume, r, f64_value(v))),
            bind(f::SELL_VOLUME, |c, v, r| imbalance(&mut c.sell_volume, r, f64_value(v))),
            bind(f::MATCH_VOLUME, |c, v, r| imbalance(&mut c.match_volume, r, f64_value(v))),
            bind(f::SECURITY_STATUS_QUAL, |c, v, r| {
                imbalance(&mut c.security_status_qual, r, code_value(v))
            }),
            bind(f::INSIDE_MATCH_PRICE, |c, v, r| {
                imbalance(&mut c.inside_match_price, r, price_value(v))
            }),
            bind(f::FAR_CLEARING_PRICE, |c, v, r| {
                imbalance(&mut c.far_clearing_price, r, price_value(v))
            }),
            bind(f::NEAR_CLEARING_PRICE, |c, v, r| {
                imbalance(&mut c.near_clearing_price, r, price_value(v))
            }),
            bind(f::NO_CLEARING_PRICE, |c, v, r| {
                imbalance(&mut c.no_clearing_price, r, char_value(v))
            }),
            bind(f::PRICE_VAR_IND, |c, v, r| imbalance(&mut c.price_var_ind, r, char_value(v))),
            bind(f::CROSS_TYPE, |c, v, r| imbalance(&mut c.cross_type, r, char_value(v))),
            bind(f::EVENT_TIME, |c, v, r| imbalance(&mut c.event_time, r, timestamp_value(v))),
            bind(f::EVENT_SEQ_NUM, |c, v, r| imbalance(&mut c.event_seq_num, r, u64_value(v))),
            bind(f::SECURITY_STATUS_TIME, |c, v, r| {
                imbalance(&mut c.security_status_time, r, timestamp_value(v))
            }),
            bind(f::AUCTION_TIME, |c, v, r| imbalance(&mut c.auction_time, r, timestamp_value(v))),
            bind(f::SECURITY_STATUS_ORIG, |c, v, r| {
                imbalance(&mut c.security_status_orig, r, string_value(v))
            }),
        ]);
        bindings
    }

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self> {
        &registry.imbalance
    }

    fn new_cache(_settings: &EngineSettings) -> ImbalanceCache {
        ImbalanceCache::default()
    }

    fn accepts(kind: MessageKind) -> bool {
        matches!(
            kind,
            MessageKind::Initial | MessageKind::Recap | MessageKind::Update
        )
    }

    fn derive(_cache: &mut ImbalanceCache, _record: &ImbalanceRecord, _kind: MessageKind) {}

    fn classify(
        cache: &mut ImbalanceCache,
        record: &ImbalanceRecord,
        kind: MessageKind,
        _settings: &EngineSettings,
    ) -> Notifications<ImbalanceEvent> {
        if kind.is_recap() {
            return Notifications::primary(ImbalanceEvent::Recap);
        }
        if !record.got_imbalance {
            return Notifications::none();
        }

        let qualifier = cache.security_status_qual.copied();
        if qualifier.is_imbalance_order() || qualifier == ImbalanceType::Unknown {
            Notifications::primary(ImbalanceEvent::OrderImbalance)
        } else {
            Notifications::primary(ImbalanceEvent::NoOrderImbalance)
        }
    }
}
