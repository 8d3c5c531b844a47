//! Ordering errors.
//!
//! Resolution of deferred before/after placements is the only step in
//! this crate that can fail. Duplicate ids are never an error: they are
//! disambiguated with a numeric suffix at insertion time.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`OrderError::MissingPivot`] | `ORDER_MISSING_PIVOT` | No |
//! | [`OrderError::UnresolvableOrdering`] | `ORDER_UNRESOLVABLE_ORDERING` | No |
//!
//! Neither error goes away on a plain retry. The caller has to insert the
//! missing pivot (or change the resolution strategy) first.

use thiserror::Error;

/// Machine-readable error classification shared by the `ordo` crates.
///
/// Codes are `UPPER_SNAKE_CASE` and carry a per-crate prefix
/// (`ORDER_`, `DISPATCH_`, ...).
///
/// # Example
///
/// ```
/// use ordo_collection::{ErrorCode, OrderError};
///
/// let err = OrderError::MissingPivot {
///     item: "x".into(),
///     pivot: "missing".into(),
/// };
/// assert_eq!(err.code(), "ORDER_MISSING_PIVOT");
/// assert!(!err.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying the same operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Errors raised while resolving deferred placements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A before/after item references an id that was never inserted.
    #[error("cannot place item '{item}' relative to missing pivot '{pivot}'")]
    MissingPivot {
        /// Id of the dependent item.
        item: String,
        /// The pivot id that does not exist.
        pivot: String,
    },

    /// A before/after item references a pivot whose priority cannot be
    /// determined: a later pending item under single-pass resolution, or
    /// a cycle of pending items under topological resolution.
    #[error("cannot order item '{item}': pivot '{pivot}' is itself unresolved")]
    UnresolvableOrdering {
        /// Id of the dependent item.
        item: String,
        /// The unresolved pivot id.
        pivot: String,
    },
}

impl OrderError {
    /// Returns the id of the item whose placement failed.
    #[must_use]
    pub fn item(&self) -> &str {
        match self {
            Self::MissingPivot { item, .. } | Self::UnresolvableOrdering { item, .. } => item,
        }
    }

    /// Returns the pivot id the failed item referenced.
    #[must_use]
    pub fn pivot(&self) -> &str {
        match self {
            Self::MissingPivot { pivot, .. } | Self::UnresolvableOrdering { pivot, .. } => pivot,
        }
    }
}

impl ErrorCode for OrderError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingPivot { .. } => "ORDER_MISSING_PIVOT",
            Self::UnresolvableOrdering { .. } => "ORDER_UNRESOLVABLE_ORDERING",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Asserts that every error's code is non-empty, carries `expected_prefix`
/// and is `UPPER_SNAKE_CASE`.
///
/// Intended for exhaustive variant tests in downstream crates.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        let code = err.code();
        assert!(!code.is_empty(), "Error code must not be empty");
        assert!(
            code.starts_with(expected_prefix),
            "Error code '{}' must start with prefix '{}'",
            code,
            expected_prefix
        );
        assert!(
            is_upper_snake_case(code),
            "Error code '{}' must be UPPER_SNAKE_CASE",
            code
        );
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
