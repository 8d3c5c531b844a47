//! Priority-ordered collection with deferred pivot resolution.
//!
//! This crate is the ordering engine underneath the `ordo` event
//! dispatcher. It decides in which order registered items (listeners, or
//! anything else) are handed back to a caller.
//!
//! # Placement
//!
//! An item is placed in one of three ways:
//!
//! | Operation | Placement | Guarantee |
//! |-----------|-----------|-----------|
//! | [`add_item`](OrderedCollection::add_item) | explicit priority | higher priorities first, FIFO within a priority |
//! | [`add_item_before`](OrderedCollection::add_item_before) | before a pivot id | strictly before the pivot |
//! | [`add_item_after`](OrderedCollection::add_item_after) | after a pivot id | strictly after the pivot |
//!
//! The pivot of a relative placement does not have to exist yet. Such
//! items are parked and resolved lazily on the first read after a
//! mutation:
//!
//! ```text
//!   insert ──► Dirty ──iter()/resolve()──► Clean
//!     ▲                                      │
//!     └──────────────── insert ──────────────┘
//! ```
//!
//! # Resolution strategies
//!
//! [`ResolutionStrategy::SinglePass`] (default) walks the pending items
//! once in insertion order, so a pending item may only anchor to pending
//! pivots inserted before it. [`ResolutionStrategy::Topological`] follows
//! pivot chains in any order and only rejects cycles.
//!
//! # Example
//!
//! ```
//! use ordo_collection::{OrderError, OrderedCollection};
//!
//! let mut c = OrderedCollection::new();
//! c.add_item_after("setup", "run", Some("run"));
//! c.add_item("setup", 0, Some("setup"));
//! c.add_item("banner", 100, None);
//!
//! let order: Vec<_> = c.iter()?.copied().collect();
//! assert_eq!(order, ["banner", "setup", "run"]);
//!
//! // Duplicate ids are disambiguated, never rejected.
//! assert_eq!(c.add_item("again", 0, Some("setup")), "setup-1");
//!
//! // Dangling pivots surface on the next read.
//! c.add_item_before("missing", "orphan", Some("orphan"));
//! assert!(matches!(c.iter(), Err(OrderError::MissingPivot { .. })));
//! # Ok::<(), OrderError>(())
//! ```

mod collection;
mod config;
mod error;
mod id;
mod item;

pub use collection::{Items, Iter, OrderedCollection};
pub use config::{CollectionConfig, ConfigError, ResolutionStrategy, RESOLUTION_ENV_VAR};
pub use error::{assert_error_codes, ErrorCode, OrderError};
pub use item::{Item, Placement};
