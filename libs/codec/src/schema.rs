//! # Field Schema
//!
//! ## Purpose
//!
//! Abstraction over the schema dictionary that assigns field identifiers to
//! field names. The engine only ever asks three questions of it: resolve a
//! name, is the dictionary populated, and how large is the id space (to size
//! dispatch tables).
//!
//! [`FieldDictionary`] is the in-process implementation: created empty,
//! filled at startup, then published with [`FieldDictionary::mark_ready`].
//! Readers on other threads either see "not ready" or the complete table.

use feed_config::SchemaConfig;
use feed_types::FieldId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

/// Name-to-identifier dictionary consumed by dispatch table construction
pub trait FieldSchema: Send + Sync {
    fn resolve(&self, name: &str) -> Option<FieldId>;

    fn is_ready(&self) -> bool;

    fn max_field_id(&self) -> u16;
}

/// Thread-safe field dictionary
#[derive(Debug, Default)]
pub struct FieldDictionary {
    by_name: RwLock<HashMap<String, FieldId>>,
    max_id: AtomicU16,
    ready: AtomicBool,
}

impl FieldDictionary {
    /// Empty dictionary, not ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Populated and ready dictionary
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u16)>,
        S: Into<String>,
    {
        let dictionary = Self::new();
        for (name, id) in entries {
            dictionary.insert(name, FieldId(id));
        }
        dictionary.mark_ready();
        dictionary
    }

    pub fn insert(&self, name: impl Into<String>, id: FieldId) {
        self.by_name.write().insert(name.into(), id);
        self.max_id.fetch_max(id.0, Ordering::AcqRel);
    }

    /// Publish the dictionary to dispatch table builders
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.by_name.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.read().is_empty()
    }
}

impl FieldSchema for FieldDictionary {
    fn resolve(&self, name: &str) -> Option<FieldId> {
        self.by_name.read().get(name).copied()
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn max_field_id(&self) -> u16 {
        self.max_id.load(Ordering::Acquire)
    }
}

/// Deployment-specific renames of the field names entity kinds bind to
#[derive(Debug, Clone, Default)]
pub struct FieldAliases {
    names: HashMap<String, String>,
}

impl FieldAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn from_config(config: &SchemaConfig) -> Self {
        Self::from_map(config.alias_map())
    }

    pub fn insert(&mut self, field: impl Into<String>, name: impl Into<String>) {
        self.names.insert(field.into(), name.into());
    }

    /// Name to look up in the dictionary for a logical field
    pub fn resolve_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.names.get(field).map(String::as_str).unwrap_or(field)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_lifecycle() {
        let dictionary = FieldDictionary::new();
        assert!(!dictionary.is_ready());
        assert_eq!(dictionary.max_field_id(), 0);

        dictionary.insert("wSymbol", FieldId(470));
        dictionary.insert("wTradePrice", FieldId(12));
        assert!(!dictionary.is_ready());
        assert_eq!(dictionary.max_field_id(), 470);

        dictionary.mark_ready();
        assert!(dictionary.is_ready());
        assert_eq!(dictionary.resolve("wTradePrice"), Some(FieldId(12)));
        assert_eq!(dictionary.resolve("wNothing"), None);
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn test_from_entries_is_ready() {
        let dictionary = FieldDictionary::from_entries([("wBidPrice", 1), ("wAskPrice", 2)]);
        assert!(dictionary.is_ready());
        assert_eq!(dictionary.max_field_id(), 2);
    }

    #[test]
    fn test_aliases() {
        let mut aliases = FieldAliases::new();
        aliases.insert("wTradeVolume", "wTradeSize");
        assert_eq!(aliases.resolve_name("wTradeVolume"), "wTradeSize");
        assert_eq!(aliases.resolve_name("wTradePrice"), "wTradePrice");
    }
}
