//! # Dispatch Table Registry
//!
//! Owns the schema handle and one lazily built table per entity kind.
//! Subscriptions for the same kind may be created from several threads
//! before the schema is confirmed ready, so each slot builds under
//! double-checked locking:
//!
//! ```text
//! built? ──yes──▶ share
//!   │no
//!   ▼
//! lock kind ─▶ built? ──yes──▶ share
//!                 │no
//!                 ▼
//!            build ─▶ publish ─▶ share
//! ```
//!
//! A failed build (schema not ready) publishes nothing, so the next caller
//! retries. Readers observe either an error or a complete, immutable table.

use crate::dispatch::DispatchTable;
use crate::error::EngineResult;
use crate::kinds::{
    fundamentals::FundamentalsKind, imbalance::ImbalanceKind, quote::QuoteKind,
    security_status::SecurityStatusKind, trade::TradeKind,
};
use crate::listener::EntityKind;
use crate::schema::{FieldAliases, FieldSchema};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// Build-once holder of one kind's table
pub struct TableSlot<K: EntityKind> {
    table: OnceCell<Arc<DispatchTable<K>>>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl<K: EntityKind> TableSlot<K> {
    pub fn new() -> Self {
        Self {
            table: OnceCell::new(),
            build_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn get(&self) -> Option<Arc<DispatchTable<K>>> {
        self.table.get().cloned()
    }

    pub fn get_or_build(
        &self,
        schema: &dyn FieldSchema,
        aliases: &FieldAliases,
    ) -> EngineResult<Arc<DispatchTable<K>>> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let _guard = self.build_lock.lock();
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(DispatchTable::<K>::build(schema, aliases)?);
        info!(
            kind = K::NAME,
            capacity = table.capacity(),
            bound = table.bound_fields(),
            "dispatch table built"
        );

        self.builds.fetch_add(1, Ordering::Relaxed);
        // Under the build lock nothing else can have published
        let _ = self.table.set(Arc::clone(&table));
        Ok(table)
    }

    /// Successful builds, at most one
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl<K: EntityKind> Default for TableSlot<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared dispatch tables for every entity kind over one schema
pub struct DispatchRegistry {
    schema: Arc<dyn FieldSchema>,
    aliases: FieldAliases,
    pub(crate) trade: TableSlot<TradeKind>,
    pub(crate) quote: TableSlot<QuoteKind>,
    pub(crate) imbalance: TableSlot<ImbalanceKind>,
    pub(crate) security_status: TableSlot<SecurityStatusKind>,
    pub(crate) fundamentals: TableSlot<FundamentalsKind>,
}

impl DispatchRegistry {
    pub fn new(schema: Arc<dyn FieldSchema>) -> Self {
        Self::with_aliases(schema, FieldAliases::new())
    }

    pub fn with_aliases(schema: Arc<dyn FieldSchema>, aliases: FieldAliases) -> Self {
        Self {
            schema,
            aliases,
            trade: TableSlot::new(),
            quote: TableSlot::new(),
            imbalance: TableSlot::new(),
            security_status: TableSlot::new(),
            fundamentals: TableSlot::new(),
        }
    }

    /// Table for `K`, built on first use
    pub fn table<K: EntityKind>(&self) -> EngineResult<Arc<DispatchTable<K>>> {
        K::slot(self).get_or_build(self.schema.as_ref(), &self.aliases)
    }

    pub fn build_count<K: EntityKind>(&self) -> usize {
        K::slot(self).build_count()
    }

    pub fn schema(&self) -> &dyn FieldSchema {
        self.schema.as_ref()
    }
}

impl fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("schema_ready", &self.schema.is_ready())
            .field("aliases", &self.aliases.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{quote, trade};
    use crate::schema::FieldDictionary;
    use feed_types::FieldId;

    #[test]
    fn test_failed_build_is_retried() {
        let dictionary = Arc::new(FieldDictionary::new());
        let registry = DispatchRegistry::new(dictionary.clone());

        assert!(registry.table::<TradeKind>().unwrap_err().is_schema_not_ready());
        assert_eq!(registry.build_count::<TradeKind>(), 0);

        dictionary.insert(trade::TRADE_PRICE, FieldId(1));
        dictionary.insert(trade::TRADE_VOLUME, FieldId(2));
        dictionary.mark_ready();

        let first = registry.table::<TradeKind>().unwrap();
        let second = registry.table::<TradeKind>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.build_count::<TradeKind>(), 1);
    }

    #[test]
    fn test_kinds_have_independent_slots() {
        let dictionary = Arc::new(FieldDictionary::from_entries([
            (trade::TRADE_PRICE, 1),
            (trade::TRADE_VOLUME, 2),
        ]));
        let registry = DispatchRegistry::new(dictionary);

        assert!(registry.table::<TradeKind>().is_ok());
        // Quote prices are not in this dictionary
        let err = registry.table::<QuoteKind>().unwrap_err();
        assert!(err.to_string().contains(quote::BID_PRICE));
        assert_eq!(registry.build_count::<QuoteKind>(), 0);
    }
}
