//! Event trait.

use std::any::Any;

/// An event that can be dispatched to listeners.
///
/// Listeners are selected by the event's concrete type. An event that
/// reports [`is_propagation_stopped`](Self::is_propagation_stopped) stops
/// the dispatch loop after the current listener; an event that is already
/// stopped when dispatched reaches no listener at all.
///
/// Events must be `Send` so a dispatcher shared across threads can hand
/// them to listeners running on any of those threads.
///
/// # Example
///
/// ```
/// use ordo_event::Event;
///
/// struct OrderPlaced {
///     handled: bool,
/// }
///
/// impl Event for OrderPlaced {
///     fn is_propagation_stopped(&self) -> bool {
///         self.handled
///     }
/// }
/// ```
pub trait Event: Any + Send {
    /// Returns `true` once no further listener should see this event.
    ///
    /// Default: never stops.
    fn is_propagation_stopped(&self) -> bool {
        false
    }
}
