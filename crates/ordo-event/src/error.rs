//! Dispatch errors.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`DispatchError::Ordering`] | `DISPATCH_ORDERING` | No |
//! | [`DispatchError::ListenerFailed`] | `DISPATCH_LISTENER_FAILED` | Yes |

use ordo_collection::{ErrorCode, OrderError};
use thiserror::Error;

/// Errors returned by [`EventDispatcher::dispatch`](crate::EventDispatcher::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Listener order could not be resolved (dangling or unresolvable pivot).
    ///
    /// No listener ran.
    #[error("listener ordering failed: {0}")]
    Ordering(#[from] OrderError),

    /// A listener returned an error. Listeners after it did not run.
    #[error("listener '{listener}' failed while processing {event}: {source}")]
    ListenerFailed {
        /// Id of the failing listener.
        listener: String,
        /// Type name of the event being dispatched.
        event: &'static str,
        /// The listener's error.
        #[source]
        source: anyhow::Error,
    },
}

impl ErrorCode for DispatchError {
    fn code(&self) -> &'static str {
        match self {
            Self::Ordering(_) => "DISPATCH_ORDERING",
            Self::ListenerFailed { .. } => "DISPATCH_LISTENER_FAILED",
        }
    }

    /// A listener failure may be transient; an ordering failure needs the
    /// registrations fixed first.
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ListenerFailed { .. })
    }
}
