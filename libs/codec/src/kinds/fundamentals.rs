//! Fundamentals kind: dividends, share counts and valuation ratios

use super::{assign, common_bindings};
use crate::cache::{entity_cache, message_record, CommonRecord};
use crate::decode::{f64_value, price_value, string_value, text_value, timestamp_value};
use crate::dispatch::{Binding, UpdateRule};
use crate::fields::fundamentals as f;
use crate::listener::{EntityKind, Notifications};
use crate::registry::{DispatchRegistry, TableSlot};
use feed_config::EngineSettings;
use feed_types::{MessageKind, Price, Timestamp};

entity_cache! {
    /// Fundamentals snapshot
    pub struct FundamentalsCache {
        common;
        attributes {
            corp_act_type: String,
            div_freq: String,
            div_ex_date: Timestamp,
            div_pay_date: Timestamp,
            div_record_date: Timestamp,
            div_currency: String,
            dividend_price: Price,
            market_segment: String,
            market_sector: String,
            market_segment_native: String,
            market_sector_native: String,
            shares_out: f64,
            shares_float: f64,
            shares_auth: f64,
            earn_per_share: f64,
            pe_ratio: f64,
            dividend_yield: f64,
            volatility: f64,
            hist_volatility: f64,
            risk_free_rate: f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundamentalsRecord {
    pub common: CommonRecord,
}

message_record!(FundamentalsRecord);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundamentalsEvent {
    Fundamentals { recap: bool },
}

pub struct FundamentalsKind;

type Rule = UpdateRule<FundamentalsKind>;

fn bind(field: &'static str, rule: Rule) -> Binding<FundamentalsKind> {
    Binding::new(field, rule)
}

impl EntityKind for FundamentalsKind {
    const NAME: &'static str = "fundamentals";
    const REQUIRED_FIELDS: &'static [&'static str] = f::REQUIRED;

    type Cache = FundamentalsCache;
    type Record = FundamentalsRecord;
    type Event = FundamentalsEvent;

    fn bindings() -> Vec<Binding<Self>> {
        let mut bindings = common_bindings::<Self>();
        bindings.extend([
            bind(f::CORP_ACT_TYPE, |c, v, _| assign(&mut c.corp_act_type, string_value(v))),
            bind(f::DIV_FREQ, |c, v, _| assign(&mut c.div_freq, text_value(v))),
            bind(f::DIV_EX_DATE, |c, v, _| assign(&mut c.div_ex_date, timestamp_value(v))),
            bind(f::DIV_PAY_DATE, |c, v, _| assign(&mut c.div_pay_date, timestamp_value(v))),
            bind(f::DIV_RECORD_DATE, |c, v, _| assign(&mut c.div_record_date, timestamp_value(v))),
            bind(f::DIV_CURRENCY, |c, v, _| assign(&mut c.div_currency, string_value(v))),
            bind(f::DIVIDEND_PRICE, |c, v, _| assign(&mut c.dividend_price, price_value(v))),
            bind(f::MARKET_SEGMENT, |c, v, _| assign(&mut c.market_segment, text_value(v))),
            bind(f::MARKET_SECTOR, |c, v, _| assign(&mut c.market_sector, text_value(v))),
            bind(f::MARKET_SEGMENT_NATIVE, |c, v, _| {
                assign(&mut c.market_segment_native, string_value(v))
            }),
            bind(f::MARKET_SECTOR_NATIVE, |c, v, _| {
                assign(&mut c.market_sector_native, string_value(v))
            }),
            bind(f::SHARES_OUT, |c, v, _| assign(&mut c.shares_out, f64_value(v))),
            bind(f::SHARES_FLOAT, |c, v, _| assign(&mut c.shares_float, f64_value(v))),
            bind(f::SHARES_AUTH, |c, v, _| assign(&mut c.shares_auth, f64_value(v))),
            bind(f::EARN_PER_SHARE, |c, v, _| assign(&mut c.earn_per_share, f64_value(v))),
            bind(f::PE_RATIO, |c, v, _| assign(&mut c.pe_ratio, f64_value(v))),
            bind(f::DIVIDEND_YIELD, |c, v, _| assign(&mut c.dividend_yield, f64_value(v))),
            bind(f::VOLATILITY, |c, v, _| assign(&mut c.volatility, f64_value(v))),
            bind(f::HIST_VOLATILITY, |c, v, _| assign(&mut c.hist_volatility, f64_value(v))),
            bind(f::RISK_FREE_RATE, |c, v, _| assign(&mut c.risk_free_rate, f64_value(v))),
        ]);
        bindings
    }

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self> {
        &registry.fundamentals
    }

    fn new_cache(_settings: &EngineSettings) -> FundamentalsCache {
        FundamentalsCache::default()
    }

    fn accepts(kind: MessageKind) -> bool {
        matches!(
            kind,
            MessageKind::Initial | MessageKind::Recap | MessageKind::Update
        )
    }

    fn derive(_cache: &mut FundamentalsCache, _record: &FundamentalsRecord, _kind: MessageKind) {}

    fn classify(
        _cache: &mut FundamentalsCache,
        _record: &FundamentalsRecord,
        kind: MessageKind,
        _settings: &EngineSettings,
    ) -> Notifications<FundamentalsEvent> {
        Notifications::primary(FundamentalsEvent::Fundamentals {
            recap: kind.is_recap(),
        })
    }
}
