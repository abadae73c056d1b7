//! # Coded enumerations carried by the feed
//!
//! Enumerated attributes are polymorphic on the wire: the same value may be
//! published as an integer code, as that code written out as text, or as the
//! enum's canonical name. [`WireCode`] gives every coded enum one shared
//! decode path so all three spellings land on the same cached value.
//!
//! Unrecognised input decodes to the enum's `UNKNOWN` member instead of
//! failing; the feed routinely adds codes ahead of its consumers.

use crate::common::errors::CodeError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared decode surface of every feed enumeration
pub trait WireCode: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Enum name used in diagnostics
    const ENUM_NAME: &'static str;

    /// Member used when the wire value is not recognised
    const UNKNOWN: Self;

    fn try_from_code(code: i64) -> Result<Self, CodeError>;

    fn try_from_name(name: &str) -> Result<Self, CodeError>;

    fn code(self) -> i64;

    /// Canonical name, also the normalized string form
    fn name(self) -> &'static str;

    fn from_code(code: i64) -> Self {
        Self::try_from_code(code).unwrap_or(Self::UNKNOWN)
    }

    /// Accepts either a numeric code written as text or a canonical name
    fn try_parse(text: &str) -> Result<Self, CodeError> {
        let trimmed = text.trim();
        match trimmed.parse::<i64>() {
            Ok(code) => Self::try_from_code(code),
            Err(_) => Self::try_from_name(trimmed),
        }
    }

    fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or(Self::UNKNOWN)
    }
}

macro_rules! wire_codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $repr:ty, unknown = $unknown:ident {
            $( $variant:ident = $code:expr => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            TryFromPrimitive,
            IntoPrimitive,
            Serialize,
            Deserialize,
        )]
        pub enum $name {
            $( $variant = $code, )+
        }

        impl WireCode for $name {
            const ENUM_NAME: &'static str = stringify!($name);
            const UNKNOWN: Self = Self::$unknown;

            fn try_from_code(code: i64) -> Result<Self, CodeError> {
                <$repr>::try_from(code)
                    .ok()
                    .and_then(|raw| Self::try_from_primitive(raw).ok())
                    .ok_or_else(|| CodeError::unknown_code(Self::ENUM_NAME, code))
            }

            fn try_from_name(name: &str) -> Result<Self, CodeError> {
                match name {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(CodeError::unknown_name(Self::ENUM_NAME, name)),
                }
            }

            fn code(self) -> i64 {
                i64::from(<$repr>::from(self))
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$unknown
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

wire_codes! {
    /// Side of a trade, shared by the trade-side and aggressor-side attributes
    pub enum TradeSide: u8, unknown = Unknown {
        Unknown = 0 => "Unknown",
        Buy = 1 => "Buy",
        Sell = 2 => "Sell",
    }
}

impl TradeSide {
    /// Single-character side codes ('B'/'S', or the numeric codes as chars)
    pub fn from_char(c: char) -> Self {
        match c {
            'B' | 'b' | '1' => Self::Buy,
            'S' | 's' | '2' => Self::Sell,
            _ => Self::Unknown,
        }
    }

    /// Text form: numeric code, canonical name, or a one-character code
    pub fn parse_text(text: &str) -> Self {
        if let Ok(side) = Self::try_parse(text) {
            return side;
        }
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Self::Unknown,
        }
    }
}

wire_codes! {
    /// Normalized security status
    pub enum SecurityStatus: u8, unknown = Unknown {
        None = 0 => "None",
        Normal = 1 => "Normal",
        Closed = 2 => "Closed",
        Halted = 3 => "Halted",
        NotExist = 4 => "NotExist",
        Deleted = 5 => "Deleted",
        Auction = 6 => "Auction",
        Crossing = 7 => "Crossing",
        Unknown = 99 => "Unknown",
    }
}

wire_codes! {
    /// Qualifier attached to a security status or an imbalance publication
    pub enum SecurityStatusQualifier: u16, unknown = Unknown {
        None = 0 => "None",
        Opening = 1 => "Opening",
        Excused = 7 => "Excused",
        Withdrawn = 8 => "Withdrawn",
        Suspended = 9 => "Suspended",
        Resume = 11 => "Resume",
        QuoteResume = 12 => "QuoteResume",
        TradeResume = 13 => "TradeResume",
        ResumeTime = 14 => "ResumeTime",
        MktImbBuy = 16 => "MktImbBuy",
        MktImbSell = 17 => "MktImbSell",
        NoMktImb = 18 => "NoMktImb",
        MocImbBuy = 19 => "MocImbBuy",
        MocImbSell = 20 => "MocImbSell",
        NoMocImb = 21 => "NoMocImb",
        OrderImb = 22 => "OrderImb",
        OrderInf = 23 => "OrderInf",
        OrderImbBuy = 24 => "OrderImbBuy",
        OrderImbSell = 25 => "OrderImbSell",
        OrderImbNone = 26 => "OrderImbNone",
        LoaImbBuy = 27 => "LoaImbBuy",
        LoaImbSell = 28 => "LoaImbSell",
        LoaNoImb = 29 => "LoaNoImb",
        OrdersEliminated = 30 => "OrdersEliminated",
        RangeInd = 31 => "RangeInd",
        ItsPreOpen = 32 => "ItsPreOpen",
        Reserved = 33 => "Reserved",
        Frozen = 34 => "Frozen",
        PreOpen = 35 => "PreOpen",
        ThoImbBuy = 36 => "ThoImbBuy",
        ThoImbSell = 37 => "ThoImbSell",
        ThoNoImb = 38 => "ThoNoImb",
        AddInfo = 41 => "AddInfo",
        IpoImbBuy = 42 => "IpoImbBuy",
        IpoImbSell = 43 => "IpoImbSell",
        IpoNoImb = 44 => "IpoNoImb",
        EmcImbBuy = 46 => "EmcImbBuy",
        EmcImbSell = 47 => "EmcImbSell",
        EmcImbNone = 48 => "EmcImbNone",
        OpenDelay = 51 => "OpenDelay",
        NoOpenNoResume = 52 => "NoOpenNoResume",
        PriceInd = 53 => "PriceInd",
        Equipment = 54 => "Equipment",
        Filings = 55 => "Filings",
        News = 56 => "News",
        NewsDissem = 57 => "NewsDissem",
        Listing = 58 => "Listing",
        Operation = 59 => "Operation",
        Info = 60 => "Info",
        Sec = 61 => "SEC",
        Times = 62 => "Times",
        Other = 63 => "Other",
        Related = 64 => "Related",
        Ipo = 65 => "IPO",
        PreCross = 66 => "Pre-Cross",
        Cross = 67 => "Cross",
        ReleasedForQuotation = 68 => "Released For Quotation (IPO)",
        IpoWindowExtension = 69 => "IPO Window Extension",
        PreClosing = 70 => "PreClosing",
        AuctionExtension = 71 => "Auction Extension",
        VolatilityAuction = 72 => "Volatility Auction",
        SecurityAuthorized = 73 => "SecurityAuthorized",
        SecurityForbidden = 74 => "SecurityForbidden",
        FastMarket = 75 => "FastMarket",
        SlowMarket = 76 => "SlowMarket",
        SubPennyTrading = 77 => "SubPennyTrading",
        OrderInput = 78 => "OrderInput",
        PreOrderMatching = 79 => "PreOrderMatching",
        OrderMatching = 80 => "OrderMatching",
        Blocking = 81 => "Blocking",
        OrderCancel = 82 => "OrderCancel",
        FixedPrice = 83 => "FixedPrice",
        SalesInput = 84 => "SalesInput",
        ExchangeIntervention = 85 => "ExchangeIntervention",
        PreAuction = 86 => "PreAuction",
        Adjust = 87 => "Adjust",
        AdjustOn = 88 => "AdjustOn",
        LateTrading = 89 => "LateTrading",
        Enquire = 90 => "Enquire",
        PreNightTrading = 91 => "PreNightTrading",
        OpenNightTrading = 92 => "OpenNightTrading",
        SubHoliday = 93 => "SubHoliday",
        BidOnly = 94 => "BidOnly",
        AskOnly = 95 => "AskOnly",
        Unknown = 99 => "Unknown",
        OpeningDelayCommon = 101 => "OpeningDelayCommon",
        ResumeCommon = 102 => "ResumeCommon",
        NoOpenNoResumeCommon = 103 => "NoOpenNoResumeCommon",
        NewsDisseminationRelated = 104 => "NewsDisseminationRelated",
        OrderInfluxRelated = 105 => "OrderInfluxRelated",
        OrderImbRelated = 106 => "OrderImbRelated",
        InfoRequestedRelated = 107 => "InfoRequestedRelated",
        NewsPendingRelated = 108 => "NewsPendingRelated",
        EquipChangeOverRelated = 109 => "EquipChangeOverRelated",
        SubPennyTradingRelated = 110 => "SubPennyTradingRelated",
        ImbPreOpenBuy = 112 => "ImbPreOpenBuy",
        ImbPreOpenSell = 113 => "ImbPreOpenSell",
        ImbPreCloseBuy = 114 => "ImbPreCloseBuy",
        ImbPreCloseSell = 115 => "ImbPreCloseSell",
        VolatilityPause = 116 => "VolatilityPause",
        VolatilityPauseQuoteResume = 117 => "VolatilityPauseQuoteResume",
        VolatilityGuard = 118 => "VolatilityGuard",
        VolatilityGuardQuoteResume = 119 => "VolatilityGuardQuoteResume",
    }
}

wire_codes! {
    /// Order-imbalance classification published in the status qualifier field
    pub enum ImbalanceType: i16, unknown = Unknown {
        MktImbBuy = 16 => "MktImbBuy",
        MktImbSell = 17 => "MktImbSell",
        NoMktImb = 18 => "NoMktImb",
        MocImbBuy = 19 => "MocImbBuy",
        MocImbSell = 20 => "MocImbSell",
        NoMocImb = 21 => "NoMocImb",
        OrderImb = 22 => "OrderImb",
        OrderInf = 23 => "OrderInf",
        OrderImbBuy = 24 => "OrderImbBuy",
        OrderImbSell = 25 => "OrderImbSell",
        OrderImbNone = 26 => "OrderImbNone",
        Unknown = -99 => "UNKNOWN",
    }
}

impl ImbalanceType {
    /// Any recognised imbalance code, including the "no imbalance" ones
    pub fn is_imbalance_type(self) -> bool {
        self != Self::Unknown
    }

    /// Codes announcing an actual imbalance
    pub fn is_imbalance_order(self) -> bool {
        !matches!(
            self,
            Self::NoMktImb | Self::NoMocImb | Self::OrderImbNone | Self::Unknown
        )
    }
}
