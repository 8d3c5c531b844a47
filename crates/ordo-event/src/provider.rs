//! Listener providers.

use crate::listener::{ListenerEntry, ListenerHandle};
use crate::subscriber::{ListenerProxy, Subscriber};
use crate::Event;
use ordo_collection::{CollectionConfig, OrderError, OrderedCollection};
use std::any::{type_name, TypeId};
use std::sync::Arc;

/// Source of the ordered listeners for an event type.
///
/// Takes `&mut self` because producing the order may resolve deferred
/// registrations.
pub trait ListenerProvider {
    /// Returns the listeners for events of `event_type`, in call order.
    fn listeners_for(&mut self, event_type: TypeId) -> Result<Vec<ListenerHandle>, OrderError>;
}

/// Provider that orders listeners by priority or relative to each other.
///
/// Higher priorities run first. A listener added before/after another
/// listener is guaranteed to run before/after it, even when the other one
/// is registered later.
///
/// Ids default to the listener's type name; collisions get a `-N`
/// suffix. Every `add_*` method returns the id actually used.
///
/// # Example
///
/// ```
/// use ordo_event::{Event, ListenerProvider, OrderedListenerProvider};
/// use std::any::TypeId;
///
/// struct Saved;
/// impl Event for Saved {}
///
/// let mut provider = OrderedListenerProvider::new();
/// provider.add_listener_after("index", |_: &mut Saved| Ok(()), Some("notify"));
/// provider.add_listener(|_: &mut Saved| Ok(()), 10, Some("index"));
///
/// let ids: Vec<String> = provider
///     .listeners_for(TypeId::of::<Saved>())
///     .unwrap()
///     .iter()
///     .map(|l| l.id().to_string())
///     .collect();
/// assert_eq!(ids, ["index", "notify"]);
/// ```
#[derive(Debug, Default)]
pub struct OrderedListenerProvider {
    listeners: OrderedCollection<ListenerEntry>,
}

impl OrderedListenerProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty provider whose ordering uses `config`.
    #[must_use]
    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            listeners: OrderedCollection::with_config(config),
        }
    }

    /// Registers a listener with a numeric priority.
    pub fn add_listener<E, F>(&mut self, listener: F, priority: i32, id: Option<&str>) -> String
    where
        E: Event,
        F: Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = id.unwrap_or(type_name::<F>());
        self.listeners
            .add_item(ListenerEntry::new(listener), priority, Some(id))
    }

    /// Registers a listener that runs before the listener `before`.
    pub fn add_listener_before<E, F>(&mut self, before: &str, listener: F, id: Option<&str>) -> String
    where
        E: Event,
        F: Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = id.unwrap_or(type_name::<F>());
        self.listeners
            .add_item_before(before, ListenerEntry::new(listener), Some(id))
    }

    /// Registers a listener that runs after the listener `after`.
    pub fn add_listener_after<E, F>(&mut self, after: &str, listener: F, id: Option<&str>) -> String
    where
        E: Event,
        F: Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = id.unwrap_or(type_name::<F>());
        self.listeners
            .add_item_after(after, ListenerEntry::new(listener), Some(id))
    }

    /// Lets a subscriber register its methods as listeners.
    ///
    /// Returns the ids of the registered listeners, in registration order.
    pub fn add_subscriber<S: Subscriber>(&mut self, subscriber: Arc<S>) -> Vec<String> {
        let mut proxy = ListenerProxy::new(self, subscriber);
        S::register_listeners(&mut proxy);
        proxy.into_registered()
    }

    /// Number of registered listeners across all event types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Ordering configuration of the underlying collection.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        self.listeners.config()
    }

    /// Returns `true` if a listener with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.listeners.contains(id)
    }
}

impl ListenerProvider for OrderedListenerProvider {
    fn listeners_for(&mut self, event_type: TypeId) -> Result<Vec<ListenerHandle>, OrderError> {
        Ok(self
            .listeners
            .items()?
            .filter(|item| item.payload().accepts(event_type))
            .map(|item| item.payload().handle(item.id()))
            .collect())
    }
}
