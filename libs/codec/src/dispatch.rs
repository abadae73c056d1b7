//! # Dispatch Tables
//!
//! ## Purpose
//!
//! A dispatch table maps field identifiers straight to update rules: a dense
//! vector indexed by [`FieldId`], one slot per id up to the dictionary's
//! maximum. Lookup on the hot path is one bounds check and one index.
//!
//! ## Construction
//!
//! Each entity kind supplies a fixed list of [`Binding`]s. Building resolves
//! every binding's field name (after aliasing) through the [`FieldSchema`]:
//!
//! - schema not ready, or a required field unresolved: `SchemaNotReady`
//! - optional field absent from the dictionary: skipped, logged at `debug`
//! - identifier beyond the reported maximum: `FieldOutOfRange`
//!
//! Tables are immutable once built; [`crate::registry`] shares them.

use crate::error::{DecodeError, EngineError, EngineResult};
use crate::listener::EntityKind;
use crate::schema::{FieldAliases, FieldSchema};
use feed_types::{FieldId, RawFieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Decode one raw value into the cache
///
/// `Ok(true)`: a value was assigned and marked Modified. `Ok(false)`: a
/// deliberate no-op (unchanged value under change suppression). `Err`: the
/// wire value could not be normalized; nothing was assigned.
pub type UpdateRule<K> = fn(
    &mut <K as EntityKind>::Cache,
    &RawFieldValue,
    &mut <K as EntityKind>::Record,
) -> Result<bool, DecodeError>;

/// Field name bound to its update rule
pub struct Binding<K: EntityKind> {
    pub field: &'static str,
    pub rule: UpdateRule<K>,
}

impl<K: EntityKind> Binding<K> {
    pub fn new(field: &'static str, rule: UpdateRule<K>) -> Self {
        Self { field, rule }
    }
}

impl<K: EntityKind> Clone for Binding<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EntityKind> Copy for Binding<K> {}

impl<K: EntityKind> fmt::Debug for Binding<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("field", &self.field).finish()
    }
}

/// Per-message dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Rules that assigned a value
    pub applied: usize,
    /// Rules that found the value unchanged
    pub unchanged: usize,
    /// Fields with no rule in this table
    pub ignored: usize,
    /// Fields whose wire value could not be decoded
    pub rejected: usize,
}

/// Immutable field-id to update-rule table for one entity kind
pub struct DispatchTable<K: EntityKind> {
    slots: Vec<Option<UpdateRule<K>>>,
    bound: usize,
}

impl<K: EntityKind> DispatchTable<K> {
    pub fn build(schema: &dyn FieldSchema, aliases: &FieldAliases) -> EngineResult<Self> {
        if !schema.is_ready() {
            return Err(EngineError::schema_not_ready(K::NAME));
        }

        let missing: Vec<&str> = K::REQUIRED_FIELDS
            .iter()
            .map(|field| aliases.resolve_name(field))
            .filter(|name| schema.resolve(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::missing_fields(K::NAME, &missing));
        }

        let max_id = schema.max_field_id();
        let mut slots: Vec<Option<UpdateRule<K>>> = vec![None; usize::from(max_id) + 1];
        let mut bound = 0;

        for binding in K::bindings() {
            let name = aliases.resolve_name(binding.field);
            match schema.resolve(name) {
                Some(id) if id.index() < slots.len() => {
                    if slots[id.index()].replace(binding.rule).is_none() {
                        bound += 1;
                    }
                }
                Some(id) => {
                    return Err(EngineError::FieldOutOfRange {
                        kind: K::NAME,
                        field: name.to_string(),
                        id,
                        max: max_id,
                    });
                }
                None => {
                    debug!(kind = K::NAME, field = name, "field not in dictionary, not bound");
                }
            }
        }

        Ok(Self { slots, bound })
    }

    #[inline]
    pub fn rule(&self, id: FieldId) -> Option<UpdateRule<K>> {
        self.slots.get(id.index()).copied().flatten()
    }

    /// Number of field ids with a rule
    pub fn bound_fields(&self) -> usize {
        self.bound
    }

    /// Slot count, `max_field_id + 1`
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Run every field of one message through its rule
    ///
    /// Decode anomalies skip that field only.
    pub fn dispatch(
        &self,
        cache: &mut K::Cache,
        fields: &[(FieldId, RawFieldValue)],
        record: &mut K::Record,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for (id, value) in fields {
            let Some(rule) = self.rule(*id) else {
                summary.ignored += 1;
                continue;
            };

            match rule(cache, value, record) {
                Ok(true) => summary.applied += 1,
                Ok(false) => summary.unchanged += 1,
                Err(e) => {
                    debug!(kind = K::NAME, field = %id, error = %e, "field decode skipped");
                    summary.rejected += 1;
                }
            }
        }

        summary
    }
}

impl<K: EntityKind> fmt::Debug for DispatchTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("kind", &K::NAME)
            .field("capacity", &self.slots.len())
            .field("bound", &self.bound)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::quote as f;
    use crate::kinds::quote::QuoteKind;
    use crate::schema::FieldDictionary;
    use crate::cache::CacheAttributes;
    use feed_config::EngineSettings;
    use feed_types::Price;

    fn quote_dictionary() -> FieldDictionary {
        FieldDictionary::from_entries([(f::BID_PRICE, 10), (f::ASK_PRICE, 11), (f::BID_SIZE, 12)])
    }

    #[test]
    fn test_build_requires_ready_schema() {
        let dictionary = FieldDictionary::new();
        dictionary.insert(f::BID_PRICE, FieldId(10));
        dictionary.insert(f::ASK_PRICE, FieldId(11));

        let err = DispatchTable::<QuoteKind>::build(&dictionary, &FieldAliases::new()).unwrap_err();
        assert!(err.is_schema_not_ready());

        dictionary.mark_ready();
        assert!(DispatchTable::<QuoteKind>::build(&dictionary, &FieldAliases::new()).is_ok());
    }

    #[test]
    fn test_build_reports_missing_required_fields() {
        let dictionary = FieldDictionary::from_entries([(f::BID_PRICE, 10)]);
        let err = DispatchTable::<QuoteKind>::build(&dictionary, &FieldAliases::new()).unwrap_err();
        assert_eq!(err, EngineError::missing_fields("quote", &[f::ASK_PRICE]));
    }

    #[test]
    fn test_table_sized_by_max_field_id() {
        let table = DispatchTable::<QuoteKind>::build(&quote_dictionary(), &FieldAliases::new()).unwrap();
        assert_eq!(table.capacity(), 13);
        assert_eq!(table.bound_fields(), 3);
        assert!(table.rule(FieldId(10)).is_some());
        assert!(table.rule(FieldId(3)).is_none());
        assert!(table.rule(FieldId(500)).is_none());
    }

    #[test]
    fn test_aliases_rename_bound_fields() {
        let dictionary =
            FieldDictionary::from_entries([("BID", 1), ("ASK", 2)]);
        let mut aliases = FieldAliases::new();
        aliases.insert(f::BID_PRICE, "BID");
        aliases.insert(f::ASK_PRICE, "ASK");

        let table = DispatchTable::<QuoteKind>::build(&dictionary, &aliases).unwrap();
        assert_eq!(table.bound_fields(), 2);
    }

    #[test]
    fn test_dispatch_summary() {
        let table = DispatchTable::<QuoteKind>::build(&quote_dictionary(), &FieldAliases::new()).unwrap();
        let mut cache = <QuoteKind as EntityKind>::new_cache(&EngineSettings::default());
        let mut record = Default::default();

        let fields = vec![
            (FieldId(10), RawFieldValue::F64(10.0)),
            (FieldId(11), RawFieldValue::Bool(true)),
            (FieldId(99), RawFieldValue::I64(1)),
        ];
        let summary = table.dispatch(&mut cache, &fields, &mut record);

        assert_eq!(
            summary,
            DispatchSummary {
                applied: 1,
                unchanged: 0,
                ignored: 1,
                rejected: 1,
            }
        );
        assert_eq!(cache.bid_price.copied(), Price(1_000_000_000));
        assert_eq!(cache.modified_fields(), vec!["bid_price"]);
    }
}
