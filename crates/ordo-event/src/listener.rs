//! Type-erased listeners.

use crate::Event;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

type ErasedFn = dyn Fn(&mut dyn Any) -> anyhow::Result<()> + Send + Sync;

/// A listener as stored by a provider: the callback plus the event type it
/// accepts.
#[derive(Clone)]
pub struct ListenerEntry {
    event_type: TypeId,
    event_name: &'static str,
    callback: Arc<ErasedFn>,
}

impl ListenerEntry {
    /// Wraps a typed listener for events of type `E`.
    pub fn new<E, F>(listener: F) -> Self
    where
        E: Event,
        F: Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            event_type: TypeId::of::<E>(),
            event_name: type_name::<E>(),
            callback: Arc::new(move |event: &mut dyn Any| match event.downcast_mut::<E>() {
                Some(event) => listener(event),
                None => Ok(()),
            }),
        }
    }

    /// Returns `true` if this listener accepts events of `event_type`.
    #[must_use]
    pub fn accepts(&self, event_type: TypeId) -> bool {
        self.event_type == event_type
    }

    /// Type name of the accepted event.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    /// Binds this entry to the id it was registered under.
    #[must_use]
    pub fn handle(&self, id: impl Into<String>) -> ListenerHandle {
        ListenerHandle {
            id: id.into(),
            entry: self.clone(),
        }
    }
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("event", &self.event_name)
            .finish_non_exhaustive()
    }
}

/// A listener selected for one dispatch, together with its id.
///
/// Handles are detached from the provider: holding one does not keep the
/// provider locked.
#[derive(Clone, Debug)]
pub struct ListenerHandle {
    id: String,
    entry: ListenerEntry,
}

impl ListenerHandle {
    /// The id the listener was registered under.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Type name of the accepted event.
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        self.entry.event_name
    }

    /// Invokes the listener. Events of another type are ignored.
    pub fn call(&self, event: &mut dyn Any) -> anyhow::Result<()> {
        (self.entry.callback)(event)
    }
}
