//! Entity kinds
//!
//! Each kind is a configuration of the shared engine: a cache declared with
//! `entity_cache!`, a per-message record, its bindings, and the derivation
//! and classification steps.

pub mod fundamentals;
pub mod imbalance;
pub mod quote;
pub mod security_status;
pub mod trade;

use crate::cache::{EntityCache, MessageRecord};
use crate::decode::{string_value, timestamp_value, u64_value};
use crate::dispatch::Binding;
use crate::error::DecodeError;
use crate::fields::common as f;
use crate::listener::EntityKind;
use feed_types::Attribute;

/// Assign a decoded value, marking the attribute Modified
#[inline]
pub(crate) fn assign<T>(attr: &mut Attribute<T>, value: Result<T, DecodeError>) -> Result<bool, DecodeError> {
    attr.set(value?);
    Ok(true)
}

/// Assign only if the value differs from the cached one
#[inline]
pub(crate) fn assign_if_changed<T: PartialEq>(
    attr: &mut Attribute<T>,
    value: Result<T, DecodeError>,
) -> Result<bool, DecodeError> {
    Ok(attr.set_if_changed(value?))
}

/// Bindings for the attributes every kind carries
pub(crate) fn common_bindings<K: EntityKind>() -> Vec<Binding<K>> {
    vec![
        Binding::<K>::new(f::SYMBOL, |c, v, _| assign(&mut c.common_mut().symbol, string_value(v))),
        Binding::<K>::new(f::ISSUE_SYMBOL, |c, v, r| {
            c.common_mut().issue_symbol.set(string_value(v)?);
            r.common_mut().got_issue_symbol = true;
            Ok(true)
        }),
        Binding::<K>::new(f::PART_ID, |c, v, r| {
            c.common_mut().part_id.set(string_value(v)?);
            r.common_mut().got_part_id = true;
            Ok(true)
        }),
        Binding::<K>::new(f::SRC_TIME, |c, v, _| assign(&mut c.common_mut().src_time, timestamp_value(v))),
        Binding::<K>::new(f::ACTIVITY_TIME, |c, v, _| {
            assign(&mut c.common_mut().activity_time, timestamp_value(v))
        }),
        Binding::<K>::new(f::LINE_TIME, |c, v, _| assign(&mut c.common_mut().line_time, timestamp_value(v))),
        Binding::<K>::new(f::SEND_TIME, |c, v, _| assign(&mut c.common_mut().send_time, timestamp_value(v))),
        Binding::<K>::new(f::PUB_ID, |c, v, _| assign(&mut c.common_mut().pub_id, string_value(v))),
        Binding::<K>::new(f::SEQ_NUM, |c, v, _| assign(&mut c.common_mut().seq_num, u64_value(v))),
    ]
}
