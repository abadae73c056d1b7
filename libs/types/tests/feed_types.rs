//! Integration tests for the feed data model

use feed_types::{
    Attribute, FeedMessage, FieldId, FieldState, ImbalanceType, MessageKind, Price, RawFieldValue,
    SecurityStatus, SecurityStatusQualifier, Timestamp, TradeSide, WireCode,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_decimal_text_is_exact(units in 0i64..10_000_000, cents in 0i64..100) {
        let text = format!("{units}.{cents:02}");
        let price = Price::from_decimal_str(&text).unwrap();
        prop_assert_eq!(price, Price(units * Price::SCALE + cents * Price::ONE_CENT.0));
    }

    #[test]
    fn prop_qualifier_spellings_agree(code in 0i64..64) {
        let by_code = SecurityStatusQualifier::from_code(code);
        prop_assume!(by_code != SecurityStatusQualifier::UNKNOWN);

        prop_assert_eq!(SecurityStatusQualifier::parse(&code.to_string()), by_code);
        prop_assert_eq!(SecurityStatusQualifier::parse(by_code.name()), by_code);
        prop_assert_eq!(by_code.code(), code);
    }

    #[test]
    fn prop_unrecognised_text_is_unknown(text in "[a-z]{12}") {
        prop_assert_eq!(SecurityStatus::parse(&text), SecurityStatus::Unknown);
        prop_assert!(SecurityStatus::try_parse(&text).is_err());
    }
}

#[test]
fn test_attribute_lifecycle() {
    let mut attr: Attribute<Price> = Attribute::default();
    assert_eq!(attr.state(), FieldState::Uninitialized);
    assert_eq!(attr.get(), None);

    attr.set(Price(5));
    assert!(attr.is_modified());

    attr.demote();
    assert_eq!(attr.state(), FieldState::Unmodified);
    assert_eq!(attr.get(), Some(&Price(5)));

    // Demoting again never forgets the value
    attr.demote();
    assert_eq!(attr.copied(), Price(5));

    assert!(!attr.set_if_changed(Price(5)));
    assert_eq!(attr.state(), FieldState::Unmodified);
    assert!(attr.set_if_changed(Price(6)));
    assert!(attr.is_modified());

    attr.clear();
    assert_eq!(attr.state(), FieldState::Uninitialized);
    assert_eq!(attr.copied(), Price::ZERO);
}

#[test]
fn test_imbalance_codes() {
    assert!(ImbalanceType::MocImbBuy.is_imbalance_order());
    assert!(!ImbalanceType::OrderImbNone.is_imbalance_order());
    assert!(!ImbalanceType::Unknown.is_imbalance_order());
    assert_eq!(ImbalanceType::parse("UNKNOWN"), ImbalanceType::Unknown);
    assert_eq!(ImbalanceType::from_code(-99), ImbalanceType::Unknown);
    assert_eq!(ImbalanceType::from_code(5), ImbalanceType::Unknown);
}

#[test]
fn test_trade_side_text_forms() {
    assert_eq!(TradeSide::parse_text("1"), TradeSide::Buy);
    assert_eq!(TradeSide::parse_text("Buy"), TradeSide::Buy);
    assert_eq!(TradeSide::parse_text("b"), TradeSide::Buy);
    assert_eq!(TradeSide::parse_text("Bid"), TradeSide::Unknown);
}

#[test]
fn test_message_serializes_for_capture_replay() {
    let msg = FeedMessage::new(MessageKind::Quote)
        .with(FieldId(1), Price::from_decimal_str("10.05").unwrap())
        .with(FieldId(2), RawFieldValue::Char('B'))
        .with(FieldId(3), Timestamp::from_nanos(1_700_000_000_000_000_000))
        .with(FieldId(4), "IBM.N");

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("Quote"));

    let replayed: FeedMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(replayed, msg);
    assert_eq!(replayed.kind(), MessageKind::Quote);
}

#[test]
fn test_message_kind_wire_codes() {
    assert_eq!(MessageKind::from_code(26), MessageKind::SecStatus);
    assert_eq!(MessageKind::from_code(12), MessageKind::PreOpening);
    assert!(MessageKind::from_code(12).is_recap());
    assert_eq!(MessageKind::Misc.to_string(), "Misc");
}
