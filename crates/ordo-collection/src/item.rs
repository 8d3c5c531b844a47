//! A single entry of an [`OrderedCollection`](crate::OrderedCollection).

use std::fmt;

/// Where an item goes relative to the rest of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Fixed priority. Higher priorities are returned first.
    Explicit(i32),
    /// Returned strictly before the item with this id.
    Before(String),
    /// Returned strictly after the item with this id.
    After(String),
}

impl Placement {
    /// Returns the pivot id for relative placements.
    #[must_use]
    pub fn pivot(&self) -> Option<&str> {
        match self {
            Self::Explicit(_) => None,
            Self::Before(pivot) | Self::After(pivot) => Some(pivot),
        }
    }

    /// Returns the priority an item anchored to a pivot at `pivot_priority`
    /// receives. Explicit placements ignore the argument.
    ///
    /// Resolved priorities are `i64` so that `pivot ± 1` never leaves the
    /// range: a chain of relative items can move at most one step per item
    /// away from an `i32` anchor.
    #[must_use]
    pub fn priority_from(&self, pivot_priority: i64) -> i64 {
        match self {
            Self::Explicit(priority) => i64::from(*priority),
            Self::Before(_) => pivot_priority + 1,
            Self::After(_) => pivot_priority - 1,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(priority) => write!(f, "priority {priority}"),
            Self::Before(pivot) => write!(f, "before '{pivot}'"),
            Self::After(pivot) => write!(f, "after '{pivot}'"),
        }
    }
}

/// An opaque payload together with its id and placement directive.
///
/// Items are created by the collection's insertion operations and never
/// change afterwards. The priority a relative item resolves to is tracked
/// by the collection, not by the item.
#[derive(Debug, Clone)]
pub struct Item<T> {
    id: String,
    payload: T,
    placement: Placement,
}

impl<T> Item<T> {
    pub(crate) fn new(id: String, payload: T, placement: Placement) -> Self {
        Self {
            id,
            payload,
            placement,
        }
    }

    /// Unique id within the owning collection.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The caller-supplied payload.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// How this item was placed when it was inserted.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }
}
