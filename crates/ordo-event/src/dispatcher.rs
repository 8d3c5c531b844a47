//! Event dispatchers.
//!
//! [`Dispatcher`] runs the listeners a provider returns, in order, until
//! the event stops propagation or a listener fails. [`DebugDispatcher`]
//! logs every dispatch before delegating.

use crate::error::DispatchError;
use crate::provider::{ListenerProvider, OrderedListenerProvider};
use crate::Event;
use parking_lot::{Mutex, MutexGuard};
use std::any::{type_name, TypeId};
use tracing::{debug, warn};

/// Delivers events to listeners.
pub trait EventDispatcher {
    /// Dispatches `event` and hands it back after all listeners ran.
    ///
    /// Listeners may mutate the event; the returned value carries their
    /// changes.
    fn dispatch<E: Event>(&self, event: E) -> Result<E, DispatchError>;
}

/// Default dispatcher.
///
/// # Concurrency
///
/// The provider sits behind a single exclusive lock. The lock is held
/// while the ordered listener list is produced and released before any
/// listener runs, so listeners may register further listeners or dispatch
/// nested events.
///
/// # Example
///
/// ```
/// use ordo_event::{Dispatcher, Event, EventDispatcher, OrderedListenerProvider};
///
/// struct Greet(Vec<&'static str>);
/// impl Event for Greet {}
///
/// let mut provider = OrderedListenerProvider::new();
/// provider.add_listener(|e: &mut Greet| { e.0.push("world"); Ok(()) }, 0, None);
/// provider.add_listener(|e: &mut Greet| { e.0.push("hello"); Ok(()) }, 10, None);
///
/// let dispatcher = Dispatcher::new(provider);
/// let greet = dispatcher.dispatch(Greet(Vec::new())).unwrap();
/// assert_eq!(greet.0, ["hello", "world"]);
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher<P = OrderedListenerProvider> {
    provider: Mutex<P>,
}

impl<P: ListenerProvider> Dispatcher<P> {
    /// Creates a dispatcher over `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Mutex::new(provider),
        }
    }

    /// Locks the provider, e.g. to register more listeners.
    ///
    /// Do not hold the guard across a call to [`dispatch`](EventDispatcher::dispatch).
    pub fn provider(&self) -> MutexGuard<'_, P> {
        self.provider.lock()
    }

    /// Consumes the dispatcher and returns the provider.
    #[must_use]
    pub fn into_provider(self) -> P {
        self.provider.into_inner()
    }
}

impl<P: ListenerProvider> EventDispatcher for Dispatcher<P> {
    fn dispatch<E: Event>(&self, mut event: E) -> Result<E, DispatchError> {
        if event.is_propagation_stopped() {
            return Ok(event);
        }

        let listeners = self.provider.lock().listeners_for(TypeId::of::<E>())?;

        for listener in &listeners {
            if let Err(source) = listener.call(&mut event) {
                warn!(
                    listener = listener.id(),
                    event = type_name::<E>(),
                    error = %source,
                    "unhandled error from listener while processing event"
                );
                return Err(DispatchError::ListenerFailed {
                    listener: listener.id().to_string(),
                    event: type_name::<E>(),
                    source,
                });
            }

            if event.is_propagation_stopped() {
                break;
            }
        }

        Ok(event)
    }
}

/// Dispatcher decorator that logs each event at debug level.
#[derive(Debug, Default)]
pub struct DebugDispatcher<D> {
    inner: D,
}

impl<D: EventDispatcher> DebugDispatcher<D> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    /// The wrapped dispatcher.
    #[must_use]
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: EventDispatcher> EventDispatcher for DebugDispatcher<D> {
    fn dispatch<E: Event>(&self, event: E) -> Result<E, DispatchError> {
        debug!(event = type_name::<E>(), "processing event");
        self.inner.dispatch(event)
    }
}
