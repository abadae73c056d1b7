//! Security status kind
//!
//! Status attributes are republished redundantly by many message kinds.
//! Their rules compare against the cached value and only an actual change
//! marks the attribute Modified; an update that changed none of them is not
//! reported.

use super::{assign, assign_if_changed, common_bindings};
use crate::cache::{entity_cache, message_record, CommonRecord};
use crate::decode::{char_value, code_value, string_value, text_value, timestamp_value, u64_value};
use crate::dispatch::{Binding, UpdateRule};
use crate::error::DecodeError;
use crate::fields::security_status as f;
use crate::listener::{EntityKind, Notifications};
use crate::registry::{DispatchRegistry, TableSlot};
use feed_config::EngineSettings;
use feed_types::{Attribute, MessageKind, SecurityStatus, SecurityStatusQualifier, Timestamp};

entity_cache! {
    /// Security status snapshot
    pub struct SecurityStatusCache {
        common;
        attributes {
            security_status: SecurityStatus,
            security_status_qual: SecurityStatusQualifier,
            security_status_native: String,
            security_status_orig: String,
            security_type: String,
            security_action: char,
            short_sale_circuit_breaker: char,
            reason: String,
            free_text: String,
            event_time: Timestamp,
            event_seq_num: u64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityStatusRecord {
    pub common: CommonRecord,
    /// A change-suppressed attribute took a new value
    pub changed: bool,
}

message_record!(SecurityStatusRecord);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatusEvent {
    Recap,
    Update,
}

pub struct SecurityStatusKind;

type Rule = UpdateRule<SecurityStatusKind>;

fn bind(field: &'static str, rule: Rule) -> Binding<SecurityStatusKind> {
    Binding::new(field, rule)
}

fn changed<T: PartialEq>(
    attr: &mut Attribute<T>,
    record: &mut SecurityStatusRecord,
    value: Result<T, DecodeError>,
) -> Result<bool, DecodeError> {
    let assigned = assign_if_changed(attr, value)?;
    record.changed |= assigned;
    Ok(assigned)
}

impl EntityKind for SecurityStatusKind {
    const NAME: &'static str = "security_status";
    const REQUIRED_FIELDS: &'static [&'static str] = f::REQUIRED;

    type Cache = SecurityStatusCache;
    type Record = SecurityStatusRecord;
    type Event = SecurityStatusEvent;

    fn bindings() -> Vec<Binding<Self>> {
        let mut bindings = common_bindings::<Self>();
        bindings.extend([
            bind(f::SECURITY_STATUS, |c, v, r| {
                changed(&mut c.security_status, r, code_value(v))
            }),
            bind(f::SECURITY_STATUS_QUAL, |c, v, r| {
                changed(&mut c.security_status_qual, r, code_value(v))
            }),
            bind(f::SECURITY_STATUS_NATIVE, |c, v, r| {
                changed(&mut c.security_status_native, r, text_value(v))
            }),
            bind(f::SECURITY_STATUS_ORIG, |c, v, r| {
                changed(&mut c.security_status_orig, r, string_value(v))
            }),
            bind(f::SECURITY_TYPE, |c, v, r| changed(&mut c.security_type, r, text_value(v))),
            bind(f::SECURITY_ACTION, |c, v, r| changed(&mut c.security_action, r, char_value(v))),
            bind(f::SHORT_SALE_CIRCUIT_BREAKER, |c, v, r| {
                changed(&mut c.short_sale_circuit_breaker, r, char_value(v))
            }),
            bind(f::REASON, |c, v, _| assign(&mut c.reason, string_value(v))),
            bind(f::FREE_TEXT, |c, v, _| assign(&mut c.free_text, string_value(v))),
            bind(f::SECURITY_STATUS_TIME, |c, v, _| assign(&mut c.event_time, timestamp_value(v))),
            bind(f::EVENT_SEQ_NUM, |c, v, _| assign(&mut c.event_seq_num, u64_value(v))),
        ]);
        bindings
    }

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self> {
        &registry.security_status
    }

    fn new_cache(_settings: &EngineSettings) -> SecurityStatusCache {
        SecurityStatusCache::default()
    }

    fn accepts(kind: MessageKind) -> bool {
        matches!(
            kind,
            MessageKind::Initial
                | MessageKind::Recap
                | MessageKind::PreOpening
                | MessageKind::SecStatus
                | MessageKind::Update
                | MessageKind::Quote
                | MessageKind::Trade
                | MessageKind::BookUpdate
                | MessageKind::Misc
        )
    }

    fn derive(_cache: &mut SecurityStatusCache, _record: &SecurityStatusRecord, _kind: MessageKind) {}

    fn classify(
        _cache: &mut SecurityStatusCache,
        record: &SecurityStatusRecord,
        kind: MessageKind,
        _settings: &EngineSettings,
    ) -> Notifications<SecurityStatusEvent> {
        if kind.is_recap() {
            Notifications::primary(SecurityStatusEvent::Recap)
        } else if record.changed {
            Notifications::primary(SecurityStatusEvent::Update)
        } else {
            Notifications::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_types::{FieldState, RawFieldValue};

    fn status_rule() -> Rule {
        SecurityStatusKind::bindings()
            .into_iter()
            .find(|binding| binding.field == f::SECURITY_STATUS)
            .map(|binding| binding.rule)
            .unwrap()
    }

    #[test]
    fn test_unchanged_status_is_suppressed() {
        let rule = status_rule();
        let mut cache = SecurityStatusCache::default();

        let mut record = SecurityStatusRecord::default();
        assert_eq!(rule(&mut cache, &RawFieldValue::I64(3), &mut record), Ok(true));
        assert!(record.changed);

        cache.security_status.demote();
        let mut record = SecurityStatusRecord::default();
        assert_eq!(rule(&mut cache, &"Halted".into(), &mut record), Ok(false));
        assert!(!record.changed);
        assert_eq!(cache.security_status.state(), FieldState::Unmodified);
    }

    #[test]
    fn test_recap_always_reports() {
        let mut cache = SecurityStatusCache::default();
        let record = SecurityStatusRecord::default();
        let settings = EngineSettings::default();

        assert_eq!(
            SecurityStatusKind::classify(&mut cache, &record, MessageKind::Recap, &settings).primary,
            Some(SecurityStatusEvent::Recap)
        );
        assert_eq!(
            SecurityStatusKind::classify(&mut cache, &record, MessageKind::SecStatus, &settings),
            Notifications::none()
        );
    }
}
