//! # Entity Listener
//!
//! ## Purpose
//!
//! Runs the per-message pipeline for one subscribed entity and notifies the
//! registered handler:
//!
//! ```text
//! begin message ─▶ dispatch fields ─▶ derive ─▶ sequence check ─▶ classify ─▶ notify
//! ```
//!
//! The whole sequence runs under the listener's cache lock; a concurrent
//! reader (`with_cache`, `snapshot`) never observes a half-dispatched cache.
//!
//! ## Entity kinds
//!
//! The five kinds are configurations of this one pipeline. [`EntityKind`]
//! supplies the cache type, the bindings, the accepted message kinds and the
//! kind-specific derivation and classification steps.

use crate::cache::{derive_common, CacheAttributes, EntityCache, MessageRecord};
use crate::dispatch::{Binding, DispatchSummary};
use crate::error::EngineResult;
use crate::registry::{DispatchRegistry, TableSlot};
use feed_config::EngineSettings;
use feed_types::{FeedMessage, MessageKind};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// One configuration of the decode/cache/classify engine
pub trait EntityKind: Sized + Send + Sync + 'static {
    /// Kind name used in logs and errors
    const NAME: &'static str;

    /// Fields without which a table for this kind is not built
    const REQUIRED_FIELDS: &'static [&'static str];

    type Cache: EntityCache;
    type Record: MessageRecord;
    type Event: Clone + fmt::Debug + PartialEq + Send;

    /// Every field this kind binds, common fields included
    fn bindings() -> Vec<Binding<Self>>;

    fn slot(registry: &DispatchRegistry) -> &TableSlot<Self>;

    fn new_cache(settings: &EngineSettings) -> Self::Cache;

    /// Message kinds this entity processes; others leave the cache untouched
    fn accepts(kind: MessageKind) -> bool;

    /// Post-dispatch adjustments specific to this kind
    fn derive(cache: &mut Self::Cache, record: &Self::Record, kind: MessageKind);

    /// Sequence check and event selection
    fn classify(
        cache: &mut Self::Cache,
        record: &Self::Record,
        kind: MessageKind,
        settings: &EngineSettings,
    ) -> Notifications<Self::Event>;
}

/// Events one message produced
#[derive(Debug, Clone, PartialEq)]
pub struct Notifications<E> {
    pub gap: Option<E>,
    pub primary: Option<E>,
}

impl<E> Notifications<E> {
    pub fn none() -> Self {
        Self {
            gap: None,
            primary: None,
        }
    }

    pub fn primary(event: E) -> Self {
        Self {
            gap: None,
            primary: Some(event),
        }
    }

    /// Delivery order: gap first
    pub fn into_events(self) -> Vec<E> {
        self.gap.into_iter().chain(self.primary).collect()
    }
}

/// Receiver of classified events
///
/// `on_event` runs while the listener's lock is held. Read state through the
/// `cache` argument: calling [`EntityListener::with_cache`] or
/// [`EntityListener::snapshot`] on the same listener from inside the handler
/// deadlocks, as the lock is not reentrant.
pub trait EventHandler<K: EntityKind>: Send {
    fn on_event(&mut self, event: &K::Event, cache: &K::Cache);
}

impl<K, F> EventHandler<K> for F
where
    K: EntityKind,
    F: FnMut(&K::Event, &K::Cache) + Send,
{
    fn on_event(&mut self, event: &K::Event, cache: &K::Cache) {
        self(event, cache)
    }
}

/// What processing one message did
#[derive(Debug, Clone, PartialEq)]
pub struct MessageOutcome<E> {
    pub kind: MessageKind,
    /// False when this entity does not process the message kind
    pub accepted: bool,
    pub summary: DispatchSummary,
    pub events: Vec<E>,
}

impl<E> MessageOutcome<E> {
    fn ignored(kind: MessageKind) -> Self {
        Self {
            kind,
            accepted: false,
            summary: DispatchSummary::default(),
            events: Vec::new(),
        }
    }
}

struct ListenerState<K: EntityKind> {
    cache: K::Cache,
    handler: Option<Box<dyn EventHandler<K>>>,
}

/// Cache, sequence state and handler of one subscribed entity
pub struct EntityListener<K: EntityKind> {
    registry: Arc<DispatchRegistry>,
    settings: EngineSettings,
    state: Mutex<ListenerState<K>>,
}

impl<K: EntityKind> EntityListener<K> {
    pub fn new(registry: Arc<DispatchRegistry>, settings: EngineSettings) -> Self {
        let cache = K::new_cache(&settings);
        Self {
            registry,
            settings,
            state: Mutex::new(ListenerState {
                cache,
                handler: None,
            }),
        }
    }

    /// Register the handler, replacing any previous one
    pub fn set_handler(&self, handler: impl EventHandler<K> + 'static) {
        self.state.lock().handler = Some(Box::new(handler));
    }

    pub fn clear_handler(&self) {
        self.state.lock().handler = None;
    }

    /// Process one message
    ///
    /// Returns `SchemaNotReady` when no dispatch table can be built yet; the
    /// message is dropped and the cache is left as it was.
    pub fn on_message(&self, message: &FeedMessage) -> EngineResult<MessageOutcome<K::Event>> {
        let kind = message.kind();
        if !K::accepts(kind) {
            trace!(entity = K::NAME, %kind, "message kind not processed");
            return Ok(MessageOutcome::ignored(kind));
        }

        let table = match self.registry.table::<K>() {
            Ok(table) => table,
            Err(e) => {
                warn!(entity = K::NAME, %kind, error = %e, "dropping message");
                return Err(e);
            }
        };

        let mut guard = self.state.lock();
        let state = &mut *guard;

        state.cache.begin_message();
        let mut record = K::Record::default();
        let summary = table.dispatch(&mut state.cache, message.fields(), &mut record);

        derive_common(state.cache.common_mut(), record.common());
        K::derive(&mut state.cache, &record, kind);

        let events = K::classify(&mut state.cache, &record, kind, &self.settings).into_events();

        if let Some(handler) = state.handler.as_mut() {
            for event in &events {
                handler.on_event(event, &state.cache);
            }
        }

        Ok(MessageOutcome {
            kind,
            accepted: true,
            summary,
            events,
        })
    }

    /// Return the cache to its freshly created state
    pub fn reset(&self) {
        self.state.lock().cache = K::new_cache(&self.settings);
    }

    /// Read the cache under the listener lock
    pub fn with_cache<R>(&self, f: impl FnOnce(&K::Cache) -> R) -> R {
        f(&self.state.lock().cache)
    }

    pub fn snapshot(&self) -> K::Cache {
        self.state.lock().cache.clone()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl<K: EntityKind> fmt::Debug for EntityListener<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityListener")
            .field("kind", &K::NAME)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::quote as f;
    use crate::kinds::quote::{QuoteEvent, QuoteKind};
    use crate::schema::FieldDictionary;
    use feed_types::{FieldId, FieldState, Price};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn listener(dictionary: Arc<FieldDictionary>) -> EntityListener<QuoteKind> {
        EntityListener::new(
            Arc::new(DispatchRegistry::new(dictionary)),
            EngineSettings::default(),
        )
    }

    #[test]
    fn test_schema_not_ready_drops_message() {
        let quotes = listener(Arc::new(FieldDictionary::new()));
        let message = FeedMessage::new(MessageKind::Quote).with(1u16, 10.0);

        let err = quotes.on_message(&message).unwrap_err();
        assert!(err.is_schema_not_ready());
        quotes.with_cache(|cache| assert_eq!(cache.bid_price.state(), FieldState::Uninitialized));
    }

    #[test]
    fn test_unaccepted_kind_is_ignored() {
        let dictionary = FieldDictionary::from_entries([(f::BID_PRICE, 1), (f::ASK_PRICE, 2)]);
        let quotes = listener(Arc::new(dictionary));

        let message = FeedMessage::new(MessageKind::Cancel).with(1u16, 10.0);
        let outcome = quotes.on_message(&message).unwrap();
        assert!(!outcome.accepted);
        assert!(outcome.events.is_empty());
        quotes.with_cache(|cache| assert!(!cache.bid_price.is_initialized()));
    }

    #[test]
    fn test_handler_sees_consistent_cache() {
        let dictionary = FieldDictionary::from_entries([(f::BID_PRICE, 1), (f::ASK_PRICE, 2)]);
        let quotes = listener(Arc::new(dictionary));

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        quotes.set_handler(move |event: &QuoteEvent, cache: &crate::kinds::quote::QuoteCache| {
            assert_eq!(*event, QuoteEvent::Update);
            assert_eq!(cache.mid_price(), Some(Price(1_005_000_000)));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let message = FeedMessage::new(MessageKind::Quote)
            .with(FieldId(1), 10.00)
            .with(FieldId(2), 10.10);
        let outcome = quotes.on_message(&message).unwrap();

        assert_eq!(outcome.events, vec![QuoteEvent::Update]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_runs_under_listener_lock() {
        let dictionary = FieldDictionary::from_entries([(f::BID_PRICE, 1), (f::ASK_PRICE, 2)]);
        let quotes = Arc::new(listener(Arc::new(dictionary)));

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let weak = Arc::downgrade(&quotes);
        quotes.set_handler(move |_: &QuoteEvent, cache: &crate::kinds::quote::QuoteCache| {
            let quotes = weak.upgrade().unwrap();
            // with_cache or snapshot here would block forever
            assert!(quotes.state.try_lock().is_none());
            assert_eq!(cache.bid_price.copied(), Price(1_000_000_000));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        quotes
            .on_message(&FeedMessage::new(MessageKind::Quote).with(FieldId(1), 10.00))
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(quotes.state.try_lock().is_some());
    }

    #[test]
    fn test_reset_clears_cache() {
        let dictionary = FieldDictionary::from_entries([(f::BID_PRICE, 1), (f::ASK_PRICE, 2)]);
        let quotes = listener(Arc::new(dictionary));
        quotes
            .on_message(&FeedMessage::new(MessageKind::Quote).with(1u16, 10.0))
            .unwrap();
        assert!(quotes.snapshot().bid_price.is_initialized());

        quotes.reset();
        assert!(!quotes.snapshot().bid_price.is_initialized());
    }
}
