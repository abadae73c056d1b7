//! # Entity Caches
//!
//! ## Purpose
//!
//! An entity cache is the always-current snapshot of one subscribed entity:
//! one [`Attribute`](feed_types::Attribute) per logical attribute plus any
//! kind-specific processing state (sequence detector, irregular-trade flag).
//!
//! Caches are declared with [`entity_cache!`], which generates the struct and
//! the single "begin message" sweep that demotes every `Modified` attribute
//! to `Unmodified`. Attributes shared by every kind live in
//! [`CommonAttributes`] and are embedded in each cache as `common`.
//!
//! ## Message record
//!
//! Update rules report what they saw through a per-message record owned by
//! the listener for the duration of one message (`Default` at the start).
//! Derivation reads the record instead of flags threaded through the cache.

use feed_types::FieldState;

/// Attribute bookkeeping generated by [`entity_cache!`]
pub trait CacheAttributes {
    /// Demote every `Modified` attribute to `Unmodified`
    fn begin_message(&mut self);

    /// Return every attribute to `Uninitialized`
    fn clear_attributes(&mut self);

    /// Freshness of every attribute, in declaration order
    fn field_states(&self) -> Vec<(&'static str, FieldState)>;

    /// Attributes touched by the last processed message
    fn modified_fields(&self) -> Vec<&'static str> {
        self.field_states()
            .into_iter()
            .filter(|(_, state)| *state == FieldState::Modified)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Declare an entity cache
///
/// ```ignore
/// entity_cache! {
///     pub struct QuoteCache {
///         attributes {
///             bid_price: Price,
///         }
///         state {
///             sequence: SequenceGapDetector,
///         }
///     }
/// }
/// ```
///
/// With `common` the cache embeds [`CommonAttributes`] and implements
/// [`EntityCache`].
macro_rules! entity_cache {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            attributes {
                $( $(#[$fmeta:meta])* $field:ident: $ty:ty, )+
            }
            $( state {
                $( $(#[$smeta:meta])* $sfield:ident: $sty:ty, )*
            } )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: ::feed_types::Attribute<$ty>, )+
            $( $( $(#[$smeta])* pub $sfield: $sty, )* )?
        }

        impl $crate::cache::CacheAttributes for $name {
            fn begin_message(&mut self) {
                $( self.$field.demote(); )+
            }

            fn clear_attributes(&mut self) {
                $( self.$field.clear(); )+
            }

            fn field_states(&self) -> Vec<(&'static str, ::feed_types::FieldState)> {
                vec![ $( (stringify!($field), self.$field.state()), )+ ]
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            common;
            attributes {
                $( $(#[$fmeta:meta])* $field:ident: $ty:ty, )+
            }
            $( state {
                $( $(#[$smeta:meta])* $sfield:ident: $sty:ty, )*
            } )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub common: $crate::cache::CommonAttributes,
            $( $(#[$fmeta])* pub $field: ::feed_types::Attribute<$ty>, )+
            $( $( $(#[$smeta])* pub $sfield: $sty, )* )?
        }

        impl $crate::cache::CacheAttributes for $name {
            fn begin_message(&mut self) {
                self.common.begin_message();
                $( self.$field.demote(); )+
            }

            fn clear_attributes(&mut self) {
                self.common.clear_attributes();
                $( self.$field.clear(); )+
            }

            fn field_states(&self) -> Vec<(&'static str, ::feed_types::FieldState)> {
                let mut states = self.common.field_states();
                states.extend([ $( (stringify!($field), self.$field.state()), )+ ]);
                states
            }
        }

        impl $crate::cache::EntityCache for $name {
            fn common(&self) -> &$crate::cache::CommonAttributes {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::cache::CommonAttributes {
                &mut self.common
            }
        }
    };
}

pub(crate) use entity_cache;

entity_cache! {
    /// Attributes carried by every entity kind
    pub struct CommonAttributes {
        attributes {
            symbol: String,
            issue_symbol: String,
            part_id: String,
            src_time: feed_types::Timestamp,
            activity_time: feed_types::Timestamp,
            line_time: feed_types::Timestamp,
            send_time: feed_types::Timestamp,
            pub_id: String,
            seq_num: u64,
        }
    }
}

/// Cache with the common attribute block
pub trait EntityCache: CacheAttributes + Clone + Send + 'static {
    fn common(&self) -> &CommonAttributes;

    fn common_mut(&mut self) -> &mut CommonAttributes;
}

/// What the common update rules saw during one message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonRecord {
    pub got_issue_symbol: bool,
    pub got_part_id: bool,
}

/// Per-message decision record of one entity kind
pub trait MessageRecord: Default {
    fn common(&self) -> &CommonRecord;

    fn common_mut(&mut self) -> &mut CommonRecord;
}

/// Implement [`MessageRecord`] for a record with a `common` field
macro_rules! message_record {
    ($name:ident) => {
        impl $crate::cache::MessageRecord for $name {
            fn common(&self) -> &$crate::cache::CommonRecord {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::cache::CommonRecord {
                &mut self.common
            }
        }
    };
}

pub(crate) use message_record;

/// Derivations every kind runs after dispatch
///
/// The issue symbol replaces the symbol when one arrived. Without an
/// explicit participant id, a symbol of the form `IBM.N` yields `N`.
pub fn derive_common(common: &mut CommonAttributes, record: &CommonRecord) {
    if record.got_issue_symbol {
        let issue_symbol = common.issue_symbol.value().clone();
        common.symbol.set(issue_symbol);
    }

    if !record.got_part_id {
        if let Some(part_id) = part_id_from_symbol(common.symbol.value()) {
            if part_id != common.part_id.value() {
                common.part_id.set(part_id.to_string());
            }
        }
    }
}

/// Suffix after the last `.`, when non-empty
pub fn part_id_from_symbol(symbol: &str) -> Option<&str> {
    symbol
        .rsplit_once('.')
        .map(|(_, suffix)| suffix)
        .filter(|suffix| !suffix.is_empty())
}
