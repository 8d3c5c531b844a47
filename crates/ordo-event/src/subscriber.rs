//! Subscribers: objects that register several of their own methods as
//! listeners in one go.

use crate::provider::OrderedListenerProvider;
use crate::Event;
use std::any::type_name;
use std::sync::Arc;

/// A listener method on a subscriber.
pub type SubscriberMethod<S, E> = fn(&S, &mut E) -> anyhow::Result<()>;

/// An object whose methods listen to events.
///
/// # Example
///
/// ```
/// use ordo_event::{Event, ListenerProxy, OrderedListenerProvider, Subscriber};
/// use std::sync::Arc;
///
/// struct Login;
/// impl Event for Login {}
///
/// struct Audit;
///
/// impl Audit {
///     fn on_login(&self, _: &mut Login) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// impl Subscriber for Audit {
///     fn register_listeners(proxy: &mut ListenerProxy<'_, Self>) {
///         proxy.add_listener("on_login", Self::on_login, 10);
///     }
/// }
///
/// let mut provider = OrderedListenerProvider::new();
/// let ids = provider.add_subscriber(Arc::new(Audit));
/// assert_eq!(ids.len(), 1);
/// assert!(ids[0].ends_with("Audit::on_login"));
/// ```
pub trait Subscriber: Sized + Send + Sync + 'static {
    /// Registers this subscriber's listener methods through `proxy`.
    fn register_listeners(proxy: &mut ListenerProxy<'_, Self>);
}

/// Registration handle given to [`Subscriber::register_listeners`].
///
/// Binds methods to the shared subscriber instance and names each
/// listener `{subscriber type}::{method name}`, so other listeners can
/// anchor to it.
pub struct ListenerProxy<'a, S> {
    provider: &'a mut OrderedListenerProvider,
    subscriber: Arc<S>,
    registered: Vec<String>,
}

impl<'a, S: Subscriber> ListenerProxy<'a, S> {
    pub(crate) fn new(provider: &'a mut OrderedListenerProvider, subscriber: Arc<S>) -> Self {
        Self {
            provider,
            subscriber,
            registered: Vec::new(),
        }
    }

    fn listener_id(method_name: &str) -> String {
        format!("{}::{}", type_name::<S>(), method_name)
    }

    fn bind<E: Event>(
        &self,
        method: SubscriberMethod<S, E>,
    ) -> impl Fn(&mut E) -> anyhow::Result<()> + Send + Sync + 'static {
        let subscriber = Arc::clone(&self.subscriber);
        move |event: &mut E| method(&subscriber, event)
    }

    /// Registers `method` with a numeric priority.
    pub fn add_listener<E: Event>(
        &mut self,
        method_name: &str,
        method: SubscriberMethod<S, E>,
        priority: i32,
    ) -> String {
        let listener = self.bind(method);
        let id = Self::listener_id(method_name);
        let id = self.provider.add_listener(listener, priority, Some(&id));
        self.registered.push(id.clone());
        id
    }

    /// Registers `method` to run before the listener `before`.
    pub fn add_listener_before<E: Event>(
        &mut self,
        before: &str,
        method_name: &str,
        method: SubscriberMethod<S, E>,
    ) -> String {
        let listener = self.bind(method);
        let id = Self::listener_id(method_name);
        let id = self.provider.add_listener_before(before, listener, Some(&id));
        self.registered.push(id.clone());
        id
    }

    /// Registers `method` to run after the listener `after`.
    pub fn add_listener_after<E: Event>(
        &mut self,
        after: &str,
        method_name: &str,
        method: SubscriberMethod<S, E>,
    ) -> String {
        let listener = self.bind(method);
        let id = Self::listener_id(method_name);
        let id = self.provider.add_listener_after(after, listener, Some(&id));
        self.registered.push(id.clone());
        id
    }

    /// Ids registered through this proxy so far.
    #[must_use]
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    pub(crate) fn into_registered(self) -> Vec<String> {
        self.registered
    }
}
