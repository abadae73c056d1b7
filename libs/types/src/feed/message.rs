//! Message kinds and the decoded message container

use crate::feed::field::FieldId;
use crate::feed::value::RawFieldValue;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Out-of-band message kind signalled by the transport
///
/// Discriminants follow the feed's numeric message-type codes.
#[repr(u8)]
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
pub enum MessageKind {
    Update = 0,
    Initial = 1,
    Cancel = 2,
    Error = 3,
    Correction = 4,
    Closing = 5,
    Recap = 6,
    Delete = 7,
    Expire = 8,
    Snapshot = 9,
    PreOpening = 12,
    Quote = 13,
    Trade = 14,
    Order = 15,
    BookInitial = 16,
    BookUpdate = 17,
    BookClear = 18,
    BookRecap = 19,
    BookSnapshot = 20,
    NotPermissioned = 21,
    NotFound = 22,
    EndOfInitials = 23,
    SecStatus = 26,
    Misc = 100,
    Unknown = 199,
}

impl MessageKind {
    /// Baseline snapshot kinds; these are never subject to duplicate suppression
    pub const fn is_recap(self) -> bool {
        matches!(self, Self::Initial | Self::Recap | Self::PreOpening)
    }

    /// Decode a wire code, mapping unassigned codes to `Unknown`
    pub fn from_code(code: u8) -> Self {
        Self::try_from(code).unwrap_or(Self::Unknown)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Update => "Update",
            Self::Initial => "Initial",
            Self::Cancel => "Cancel",
            Self::Error => "Error",
            Self::Correction => "Correction",
            Self::Closing => "Closing",
            Self::Recap => "Recap",
            Self::Delete => "Delete",
            Self::Expire => "Expire",
            Self::Snapshot => "Snapshot",
            Self::PreOpening => "PreOpening",
            Self::Quote => "Quote",
            Self::Trade => "Trade",
            Self::Order => "Order",
            Self::BookInitial => "BookInitial",
            Self::BookUpdate => "BookUpdate",
            Self::BookClear => "BookClear",
            Self::BookRecap => "BookRecap",
            Self::BookSnapshot => "BookSnapshot",
            Self::NotPermissioned => "NotPermissioned",
            Self::NotFound => "NotFound",
            Self::EndOfInitials => "EndOfInitials",
            Self::SecStatus => "SecStatus",
            Self::Misc => "Misc",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One already-deserialized feed message
///
/// Field order carries no meaning; every update rule touches only its own
/// attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    kind: MessageKind,
    fields: Vec<(FieldId, RawFieldValue)>,
}

impl FeedMessage {
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    pub fn with_capacity(kind: MessageKind, capacity: usize) -> Self {
        Self {
            kind,
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style field append
    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<RawFieldValue>) -> Self {
        self.push(id, value);
        self
    }

    pub fn push(&mut self, id: impl Into<FieldId>, value: impl Into<RawFieldValue>) {
        self.fields.push((id.into(), value.into()));
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn fields(&self) -> &[(FieldId, RawFieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
