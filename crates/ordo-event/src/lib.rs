//! In-process event dispatch for `ordo`.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Dispatch Layer                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ordo-event      : Event, Dispatcher, Provider  ◄── HERE    │
//! └─────────────────────────────────────────────────────────────┘
//!           ↕ depends on
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Ordering Layer                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ordo-collection : OrderedCollection, Placement, OrderError │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Core Concepts
//!
//! ## Events
//!
//! Any `'static` type implementing [`Event`] can be dispatched. Events may
//! stop propagation, after which no further listener sees them.
//!
//! ## Providers
//!
//! A [`ListenerProvider`] hands the dispatcher the listeners for an event
//! type, already ordered. [`OrderedListenerProvider`] orders them by
//! priority or relative to other listeners (before/after a listener id,
//! which may be registered later).
//!
//! ## Subscribers
//!
//! A [`Subscriber`] registers several of its own methods at once through a
//! [`ListenerProxy`].
//!
//! ## Dispatchers
//!
//! [`Dispatcher`] runs the ordered listeners; [`DebugDispatcher`] logs each
//! dispatch before delegating.
//!
//! # Example
//!
//! ```
//! use ordo_event::{Dispatcher, Event, EventDispatcher, OrderedListenerProvider};
//!
//! #[derive(Default)]
//! struct Signup {
//!     steps: Vec<&'static str>,
//! }
//! impl Event for Signup {}
//!
//! let mut provider = OrderedListenerProvider::new();
//! provider.add_listener_after("store", |e: &mut Signup| { e.steps.push("welcome"); Ok(()) }, None);
//! provider.add_listener(|e: &mut Signup| { e.steps.push("store"); Ok(()) }, 0, Some("store"));
//! provider.add_listener_before("store", |e: &mut Signup| { e.steps.push("validate"); Ok(()) }, None);
//!
//! let dispatcher = Dispatcher::new(provider);
//! let signup = dispatcher.dispatch(Signup::default())?;
//! assert_eq!(signup.steps, ["validate", "store", "welcome"]);
//! # Ok::<(), ordo_event::DispatchError>(())
//! ```

mod dispatcher;
mod error;
mod event;
mod listener;
mod provider;
mod subscriber;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use dispatcher::{DebugDispatcher, Dispatcher, EventDispatcher};
pub use error::DispatchError;
pub use event::Event;
pub use listener::{ListenerEntry, ListenerHandle};
pub use provider::{ListenerProvider, OrderedListenerProvider};
pub use subscriber::{ListenerProxy, Subscriber, SubscriberMethod};

pub use ordo_collection::{CollectionConfig, ErrorCode, OrderError, ResolutionStrategy};
