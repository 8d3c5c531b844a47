//! Priority-ordered collection with deferred pivot resolution.
//!
//! Items are kept in priority buckets (higher priority first, insertion
//! order within a bucket). Items placed before/after a pivot whose
//! priority is not known yet are parked in a pending list and resolved on
//! the first read after a mutation.

use crate::config::{CollectionConfig, ResolutionStrategy};
use crate::error::OrderError;
use crate::id;
use crate::item::{Item, Placement};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter::FusedIterator;
use std::slice;
use tracing::{debug, trace, warn};

/// An item plus the priority it resolved to (`None` while pending).
///
/// Resolved priorities are wider than the `i32` callers pass in, so an item
/// placed before `i32::MAX` or after `i32::MIN` still gets its own bucket.
#[derive(Debug)]
struct Slot<T> {
    item: Item<T>,
    priority: Option<i64>,
}

/// Ordered collection of opaque payloads.
///
/// # State
///
/// The collection is either clean (the cached order is valid) or dirty
/// (something was inserted since the last resolution). Every insertion
/// makes it dirty; a successful [`iter`](Self::iter) or
/// [`resolve`](Self::resolve) makes it clean again.
///
/// # Concurrency
///
/// Not synchronized. Mutation and resolution need `&mut self`; once clean,
/// [`ordered`](Self::ordered) gives shared read-only iteration.
///
/// # Example
///
/// ```
/// use ordo_collection::OrderedCollection;
///
/// let mut c = OrderedCollection::new();
/// c.add_item("A", 10, Some("a"));
/// c.add_item("B", 5, Some("b"));
/// c.add_item_before("b", "C", Some("c"));
///
/// let order: Vec<_> = c.iter().unwrap().copied().collect();
/// assert_eq!(order, ["A", "C", "B"]);
/// ```
#[derive(Debug)]
pub struct OrderedCollection<T> {
    config: CollectionConfig,
    slots: Vec<Slot<T>>,
    buckets: BTreeMap<i64, Vec<usize>>,
    by_id: HashMap<String, usize>,
    pending: Vec<usize>,
    /// Flattened resolved order; valid only while `!dirty`.
    order: Vec<usize>,
    dirty: bool,
}

impl<T> OrderedCollection<T> {
    /// Creates an empty collection with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    /// Creates an empty collection with the given configuration.
    #[must_use]
    pub fn with_config(config: CollectionConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            buckets: BTreeMap::new(),
            by_id: HashMap::new(),
            pending: Vec::new(),
            order: Vec::new(),
            dirty: false,
        }
    }

    /// Returns the configuration this collection was created with.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Adds an item with an explicit priority. Higher priorities come first.
    ///
    /// `id` is a suggestion: if it is taken, `-1`, `-2`, ... is appended
    /// until it is free. Without an id an opaque one is generated.
    ///
    /// Returns the id actually used.
    pub fn add_item(&mut self, payload: T, priority: i32, id: Option<&str>) -> String {
        let id = self.enforce_unique_id(id);
        self.insert_resolved(id, payload, Placement::Explicit(priority), i64::from(priority))
    }

    /// Adds an item that is returned strictly before the item `pivot`.
    ///
    /// Nothing is guaranteed about its position relative to other items.
    /// If `pivot` does not exist yet (or is itself still pending) the item
    /// is resolved on the next read.
    ///
    /// Returns the id actually used.
    pub fn add_item_before(&mut self, pivot: &str, payload: T, id: Option<&str>) -> String {
        self.add_relative(Placement::Before(pivot.to_string()), payload, id)
    }

    /// Adds an item that is returned strictly after the item `pivot`.
    ///
    /// See [`add_item_before`](Self::add_item_before).
    pub fn add_item_after(&mut self, pivot: &str, payload: T, id: Option<&str>) -> String {
        self.add_relative(Placement::After(pivot.to_string()), payload, id)
    }

    fn add_relative(&mut self, placement: Placement, payload: T, id: Option<&str>) -> String {
        let id = self.enforce_unique_id(id);

        let known = placement
            .pivot()
            .and_then(|pivot| self.resolved_priority(pivot));
        if let Some(pivot_priority) = known {
            let priority = placement.priority_from(pivot_priority);
            return self.insert_resolved(id, payload, placement, priority);
        }

        trace!(item = %id, %placement, "deferring placement until pivot is resolved");

        let idx = self.slots.len();
        self.slots.push(Slot {
            item: Item::new(id.clone(), payload, placement),
            priority: None,
        });
        self.by_id.insert(id.clone(), idx);
        self.pending.push(idx);
        self.dirty = true;
        id
    }

    fn insert_resolved(
        &mut self,
        id: String,
        payload: T,
        placement: Placement,
        priority: i64,
    ) -> String {
        let idx = self.slots.len();
        self.slots.push(Slot {
            item: Item::new(id.clone(), payload, placement),
            priority: Some(priority),
        });
        self.buckets.entry(priority).or_default().push(idx);
        self.by_id.insert(id.clone(), idx);
        self.dirty = true;
        id
    }

    /// Returns a free id derived from `proposed`.
    ///
    /// The suffix is always appended to the original candidate, so the
    /// number of lookups equals the number of collisions plus one.
    fn enforce_unique_id(&self, proposed: Option<&str>) -> String {
        let base = match proposed {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => id::generate(),
        };
        if !self.by_id.contains_key(&base) {
            return base;
        }

        let mut counter: u64 = 1;
        loop {
            let candidate = format!("{base}-{counter}");
            if !self.by_id.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn resolved_priority(&self, id: &str) -> Option<i64> {
        self.by_id.get(id).and_then(|&idx| self.slots[idx].priority)
    }

    /// Resolves pending items and rebuilds the cached order.
    ///
    /// No-op when the collection is clean. On error nothing is changed:
    /// pending items stay pending and the collection stays dirty, so the
    /// caller may insert the missing pivot and try again.
    pub fn resolve(&mut self) -> Result<(), OrderError> {
        if !self.dirty {
            return Ok(());
        }

        let strategy = self.config.resolution;
        let resolved = match strategy {
            ResolutionStrategy::SinglePass => self.resolve_single_pass(),
            ResolutionStrategy::Topological => self.resolve_topological(),
        }
        .inspect_err(|err| {
            warn!(
                item = err.item(),
                pivot = err.pivot(),
                %strategy,
                error = %err,
                "failed to resolve pending placements"
            );
        })?;

        let pending = resolved.len();
        for (idx, priority) in resolved {
            self.slots[idx].priority = Some(priority);
            self.buckets.entry(priority).or_default().push(idx);
        }
        self.pending.clear();

        self.order = self.buckets.values().rev().flatten().copied().collect();
        self.dirty = false;

        debug!(
            pending,
            buckets = self.buckets.len(),
            items = self.slots.len(),
            %strategy,
            "resolved collection order"
        );
        Ok(())
    }

    /// One forward pass in insertion order. A pending pivot counts as
    /// resolved only if it was resolved earlier in this same pass.
    fn resolve_single_pass(&self) -> Result<Vec<(usize, i64)>, OrderError> {
        let mut this_pass: HashMap<usize, i64> = HashMap::with_capacity(self.pending.len());
        let mut out = Vec::with_capacity(self.pending.len());

        for &idx in &self.pending {
            let item = &self.slots[idx].item;
            let pivot = item.placement().pivot().unwrap_or_default();
            let &pivot_idx = self
                .by_id
                .get(pivot)
                .ok_or_else(|| missing_pivot(item, pivot))?;
            let pivot_priority = self.slots[pivot_idx]
                .priority
                .or_else(|| this_pass.get(&pivot_idx).copied())
                .ok_or_else(|| unresolvable(item, pivot))?;

            let priority = item.placement().priority_from(pivot_priority);
            this_pass.insert(idx, priority);
            out.push((idx, priority));
        }

        Ok(out)
    }

    /// Follows each pending item's pivot chain down to an item with a
    /// known priority, then assigns priorities back up the chain. Every
    /// item has exactly one pivot, so dependencies form chains and the only
    /// unresolvable shape is a cycle.
    fn resolve_topological(&self) -> Result<Vec<(usize, i64)>, OrderError> {
        let mut resolved: HashMap<usize, i64> = HashMap::with_capacity(self.pending.len());

        for &start in &self.pending {
            if resolved.contains_key(&start) {
                continue;
            }

            let mut chain: Vec<usize> = Vec::new();
            let mut on_chain: HashSet<usize> = HashSet::new();
            let mut cursor = start;

            let anchor = loop {
                if let Some(p) = self.slots[cursor]
                    .priority
                    .or_else(|| resolved.get(&cursor).copied())
                {
                    break p;
                }
                if !on_chain.insert(cursor) {
                    let dependent = chain.last().copied().unwrap_or(cursor);
                    return Err(unresolvable(
                        &self.slots[dependent].item,
                        self.slots[cursor].item.id(),
                    ));
                }
                chain.push(cursor);

                let item = &self.slots[cursor].item;
                let pivot = item.placement().pivot().unwrap_or_default();
                cursor = *self
                    .by_id
                    .get(pivot)
                    .ok_or_else(|| missing_pivot(item, pivot))?;
            };

            let mut priority = anchor;
            for &idx in chain.iter().rev() {
                priority = self.slots[idx].item.placement().priority_from(priority);
                resolved.insert(idx, priority);
            }
        }

        Ok(self
            .pending
            .iter()
            .filter_map(|&idx| resolved.get(&idx).map(|&p| (idx, p)))
            .collect())
    }

    /// Resolves if needed and returns the payloads in order.
    ///
    /// The iterator is lazy and can be cloned; clones advance
    /// independently. Dropping it early leaves the collection intact.
    pub fn iter(&mut self) -> Result<Iter<'_, T>, OrderError> {
        Ok(Iter {
            inner: self.items()?,
        })
    }

    /// Resolves if needed and returns the items (id, payload, placement)
    /// in order.
    pub fn items(&mut self) -> Result<Items<'_, T>, OrderError> {
        self.resolve()?;
        Ok(self.clean_items())
    }

    /// Returns the payloads in order without resolving.
    ///
    /// `None` if the collection is dirty.
    #[must_use]
    pub fn ordered(&self) -> Option<Iter<'_, T>> {
        (!self.dirty).then(|| Iter {
            inner: self.clean_items(),
        })
    }

    fn clean_items(&self) -> Items<'_, T> {
        Items {
            slots: &self.slots,
            order: self.order.iter(),
        }
    }

    /// Number of items, pending ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if an item (pending or not) has this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item<T>> {
        self.by_id.get(id).map(|&idx| &self.slots[idx].item)
    }

    /// Looks up a payload by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.item(id).map(Item::payload)
    }

    /// Resolved priority of an item. `None` if unknown or still pending.
    ///
    /// Relative items may resolve one step past the `i32` range of
    /// explicit priorities, hence the wider type.
    #[must_use]
    pub fn priority_of(&self, id: &str) -> Option<i64> {
        self.resolved_priority(id)
    }

    /// Number of items waiting for resolution.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if an insertion happened since the last resolution.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_pivot<T>(item: &Item<T>, pivot: &str) -> OrderError {
    OrderError::MissingPivot {
        item: item.id().to_string(),
        pivot: pivot.to_string(),
    }
}

fn unresolvable<T>(item: &Item<T>, pivot: &str) -> OrderError {
    OrderError::UnresolvableOrdering {
        item: item.id().to_string(),
        pivot: pivot.to_string(),
    }
}

/// Iterator over the items of a resolved collection, highest priority first.
pub struct Items<'a, T> {
    slots: &'a [Slot<T>],
    order: slice::Iter<'a, usize>,
}

impl<T> Clone for Items<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            order: self.order.clone(),
        }
    }
}

impl<'a, T> Iterator for Items<'a, T> {
    type Item = &'a Item<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|&idx| &self.slots[idx].item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> ExactSizeIterator for Items<'_, T> {}

impl<T> FusedIterator for Items<'_, T> {}

/// Iterator over the payloads of a resolved collection, highest priority first.
pub struct Iter<'a, T> {
    inner: Items<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Item::payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(c: &mut OrderedCollection<&'static str>) -> Vec<&'static str> {
        c.iter().expect("resolution should succeed").copied().collect()
    }

    fn topological() -> OrderedCollection<&'static str> {
        OrderedCollection::with_config(
            CollectionConfig::new().with_resolution(ResolutionStrategy::Topological),
        )
    }

    // ── Explicit priorities ──────────────────────────────────

    #[test]
    fn empty_collection_yields_nothing() {
        let mut c: OrderedCollection<u32> = OrderedCollection::new();
        assert!(c.is_empty());
        assert!(!c.is_dirty());
        assert_eq!(c.iter().expect("empty").count(), 0);
    }

    #[test]
    fn distinct_priorities_descending() {
        let mut c = OrderedCollection::new();
        c.add_item("low", -3, None);
        c.add_item("high", 100, None);
        c.add_item("mid", 7, None);
        c.add_item("zero", 0, None);
        assert_eq!(collect(&mut c), ["high", "mid", "zero", "low"]);
    }

    #[test]
    fn same_priority_keeps_insertion_order() {
        let mut c = OrderedCollection::new();
        c.add_item("a", 1, None);
        c.add_item("b", 1, None);
        c.add_item("x", 2, None);
        c.add_item("c", 1, None);
        assert_eq!(collect(&mut c), ["x", "a", "b", "c"]);
    }

    // ── Id uniqueness ────────────────────────────────────────

    #[test]
    fn duplicate_ids_get_numeric_suffix() {
        let mut c = OrderedCollection::new();
        assert_eq!(c.add_item(1, 0, Some("a")), "a");
        assert_eq!(c.add_item(2, 0, Some("a")), "a-1");
        assert_eq!(c.add_item(3, 0, Some("a")), "a-2");
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn suffix_is_appended_to_original_id() {
        let mut c = OrderedCollection::new();
        c.add_item(0, 0, Some("a"));
        c.add_item(0, 0, Some("a-1"));
        // "a-1" is taken by an explicit request, so the next "a" skips to "a-2".
        assert_eq!(c.add_item(0, 0, Some("a")), "a-2");
        assert_eq!(c.add_item(0, 0, Some("a-1")), "a-1-1");
    }

    #[test]
    fn relative_inserts_share_id_space() {
        let mut c = OrderedCollection::new();
        c.add_item_before("later", 1, Some("x"));
        assert_eq!(c.add_item(2, 0, Some("x")), "x-1");
        assert_eq!(c.add_item_after("x", 3, Some("x")), "x-2");
    }

    #[test]
    fn missing_or_empty_id_is_generated() {
        let mut c = OrderedCollection::new();
        let a = c.add_item(1, 0, None);
        let b = c.add_item(2, 0, Some(""));
        assert!(!a.is_empty());
        assert!(!b.is_empty());
        assert_ne!(a, b);
        assert_eq!(c.get(&a), Some(&1));
        assert_eq!(c.get(&b), Some(&2));
    }

    // ── Before / after with a known pivot ────────────────────

    #[test]
    fn before_known_pivot() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 10, Some("a"));
        c.add_item("B", 5, Some("b"));
        c.add_item_before("b", "C", Some("c"));
        assert_eq!(collect(&mut c), ["A", "C", "B"]);
        assert_eq!(c.priority_of("c"), Some(6));
        assert_eq!(c.pending_len(), 0);
    }

    #[test]
    fn after_known_pivot() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 10, Some("a"));
        c.add_item("B", 5, Some("b"));
        c.add_item_after("a", "C", Some("c"));
        assert_eq!(collect(&mut c), ["A", "C", "B"]);
        assert_eq!(c.priority_of("c"), Some(9));
    }

    #[test]
    fn known_pivot_resolves_immediately() {
        let mut c = OrderedCollection::new();
        c.add_item("P", 0, Some("p"));
        c.add_item_before("p", "X", Some("x"));
        assert_eq!(c.pending_len(), 0);
        assert_eq!(c.priority_of("x"), Some(1));
        let item = c.item("x").expect("inserted");
        assert_eq!(item.placement(), &Placement::Before("p".into()));
    }

    // ── Priority bounds ──────────────────────────────────────

    #[test]
    fn before_known_pivot_at_max_priority() {
        let mut c = OrderedCollection::new();
        c.add_item("P", i32::MAX, Some("p"));
        c.add_item_before("p", "X", Some("x"));
        assert_eq!(collect(&mut c), ["X", "P"]);
        assert_eq!(c.priority_of("x"), Some(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn before_deferred_pivot_at_max_priority() {
        let mut c = OrderedCollection::new();
        c.add_item_before("p", "X", Some("x"));
        c.add_item("P", i32::MAX, Some("p"));
        assert_eq!(collect(&mut c), ["X", "P"]);
    }

    #[test]
    fn after_pivot_at_min_priority() {
        let mut c = OrderedCollection::new();
        c.add_item_after("p", "Y", Some("y"));
        c.add_item("P", i32::MIN, Some("p"));
        c.add_item_after("p", "X", Some("x"));
        assert_eq!(collect(&mut c), ["P", "X", "Y"]);
        assert_eq!(c.priority_of("x"), Some(i64::from(i32::MIN) - 1));
    }

    #[test]
    fn topological_chain_climbs_past_max_priority() {
        let mut c = topological();
        c.add_item_before("y", "X", Some("x"));
        c.add_item_before("p", "Y", Some("y"));
        c.add_item("Q", i32::MAX, Some("q"));
        c.add_item("P", i32::MAX, Some("p"));
        assert_eq!(collect(&mut c), ["X", "Y", "Q", "P"]);
        assert_eq!(c.priority_of("x"), Some(i64::from(i32::MAX) + 2));
    }

    // ── Deferred (forward) references ────────────────────────

    #[test]
    fn forward_reference_before() {
        let mut c = OrderedCollection::new();
        c.add_item_before("p", "X", Some("x"));
        assert_eq!(c.pending_len(), 1);
        assert_eq!(c.priority_of("x"), None);
        c.add_item("other", 0, None);
        c.add_item("P", 3, Some("p"));
        assert_eq!(collect(&mut c), ["X", "P", "other"]);
        assert_eq!(c.priority_of("x"), Some(4));
        assert_eq!(c.pending_len(), 0);
    }

    #[test]
    fn forward_reference_after() {
        let mut c = OrderedCollection::new();
        c.add_item_after("p", "X", Some("x"));
        c.add_item("P", 3, Some("p"));
        c.add_item("top", 50, None);
        assert_eq!(collect(&mut c), ["top", "P", "X"]);
    }

    #[test]
    fn pending_pivot_defers_dependent() {
        let mut c = OrderedCollection::new();
        c.add_item_before("p", "X", Some("x"));
        // "x" exists but has no priority yet: "y" must wait too.
        c.add_item_before("x", "Y", Some("y"));
        assert_eq!(c.pending_len(), 2);
        c.add_item("P", 0, Some("p"));
        assert_eq!(collect(&mut c), ["Y", "X", "P"]);
    }

    #[test]
    fn resolved_pending_pivot_is_immediate_afterwards() {
        let mut c = OrderedCollection::new();
        c.add_item_after("p", "X", Some("x"));
        c.add_item("P", 0, Some("p"));
        c.resolve().expect("resolves");
        c.add_item_after("x", "Y", Some("y"));
        assert_eq!(c.pending_len(), 0);
        assert_eq!(c.priority_of("y"), Some(-2));
        assert_eq!(collect(&mut c), ["P", "X", "Y"]);
    }

    // ── Errors ───────────────────────────────────────────────

    #[test]
    fn missing_pivot_names_both_ids() {
        let mut c = OrderedCollection::new();
        c.add_item_after("missing", "X", Some("x"));
        let err = c.iter().err().expect("should fail");
        assert_eq!(
            err,
            OrderError::MissingPivot {
                item: "x".into(),
                pivot: "missing".into(),
            }
        );
    }

    #[test]
    fn failed_resolution_leaves_state_retryable() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 1, Some("a"));
        c.add_item_after("missing", "X", Some("x"));
        assert!(c.resolve().is_err());
        assert!(c.is_dirty());
        assert_eq!(c.pending_len(), 1);
        assert!(c.ordered().is_none());

        c.add_item("M", 5, Some("missing"));
        assert_eq!(collect(&mut c), ["M", "X", "A"]);
    }

    #[test]
    fn single_pass_rejects_later_pending_pivot() {
        let mut c = OrderedCollection::new();
        c.add_item_before("y", "X", Some("x"));
        c.add_item_before("p", "Y", Some("y"));
        c.add_item("P", 0, Some("p"));
        let err = c.resolve().expect_err("single pass cannot see y yet");
        assert_eq!(
            err,
            OrderError::UnresolvableOrdering {
                item: "x".into(),
                pivot: "y".into(),
            }
        );
    }

    #[test]
    fn self_reference_is_unresolvable() {
        let mut c = OrderedCollection::new();
        c.add_item_before("s", "S", Some("s"));
        assert!(matches!(
            c.resolve(),
            Err(OrderError::UnresolvableOrdering { .. })
        ));
    }

    // ── Topological strategy ─────────────────────────────────

    #[test]
    fn topological_resolves_chains_in_any_order() {
        let mut c = topological();
        c.add_item_before("y", "X", Some("x"));
        c.add_item_before("p", "Y", Some("y"));
        c.add_item_after("x", "Z", Some("z"));
        c.add_item("P", 0, Some("p"));
        assert_eq!(collect(&mut c), ["X", "Y", "Z", "P"]);
        assert_eq!(c.priority_of("x"), Some(2));
        assert_eq!(c.priority_of("y"), Some(1));
        assert_eq!(c.priority_of("z"), Some(1));
    }

    #[test]
    fn config_reports_strategy() {
        assert_eq!(
            OrderedCollection::<u8>::new().config().resolution,
            ResolutionStrategy::SinglePass
        );
        assert_eq!(topological().config().resolution, ResolutionStrategy::Topological);
    }

    #[test]
    fn topological_detects_cycle() {
        let mut c = topological();
        c.add_item_before("b", "A", Some("a"));
        c.add_item_after("a", "B", Some("b"));
        let err = c.resolve().expect_err("cycle");
        assert!(matches!(err, OrderError::UnresolvableOrdering { .. }));
        assert_eq!(err.item(), "b");
        assert_eq!(err.pivot(), "a");
    }

    #[test]
    fn topological_still_reports_missing_pivot() {
        let mut c = topological();
        c.add_item_before("y", "X", Some("x"));
        c.add_item_before("nowhere", "Y", Some("y"));
        assert_eq!(
            c.resolve(),
            Err(OrderError::MissingPivot {
                item: "y".into(),
                pivot: "nowhere".into(),
            })
        );
    }

    #[test]
    fn topological_folds_in_pending_order() {
        let mut c = topological();
        c.add_item_before("p", "first", None);
        c.add_item_before("p", "second", None);
        c.add_item("P", 0, Some("p"));
        assert_eq!(collect(&mut c), ["first", "second", "P"]);
    }

    // ── Caching & iteration ──────────────────────────────────

    #[test]
    fn repeated_iteration_is_identical() {
        let mut c = OrderedCollection::new();
        c.add_item_after("b", "C", Some("c"));
        c.add_item("A", 2, Some("a"));
        c.add_item("B", 2, Some("b"));
        let first = collect(&mut c);
        assert!(!c.is_dirty());
        let second = collect(&mut c);
        assert_eq!(first, second);
        assert_eq!(first, ["A", "B", "C"]);
    }

    #[test]
    fn mutation_after_read_reorders() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 1, None);
        assert_eq!(collect(&mut c), ["A"]);
        c.add_item("B", 2, None);
        assert!(c.is_dirty());
        assert_eq!(collect(&mut c), ["B", "A"]);
    }

    #[test]
    fn clones_are_independent() {
        let mut c = OrderedCollection::new();
        c.add_item(1, 3, None);
        c.add_item(2, 2, None);
        c.add_item(3, 1, None);

        let mut first = c.iter().expect("resolves");
        let second = first.clone();
        assert_eq!(first.next(), Some(&1));
        assert_eq!(first.next(), Some(&2));
        assert_eq!(second.copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn partial_consumption_does_not_disturb_state() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 1, None);
        c.add_item("B", 0, None);
        assert_eq!(c.iter().expect("resolves").next(), Some(&"A"));
        assert_eq!(collect(&mut c), ["A", "B"]);
    }

    #[test]
    fn ordered_is_shared_when_clean() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 1, None);
        assert!(c.ordered().is_none());
        c.resolve().expect("resolves");
        let a = c.ordered().expect("clean");
        let b = c.ordered().expect("clean");
        assert_eq!(a.zip(b).filter(|(x, y)| x == y).count(), 1);
    }

    #[test]
    fn items_expose_ids_in_order() {
        let mut c = OrderedCollection::new();
        c.add_item("A", 10, Some("a"));
        c.add_item("B", 5, Some("b"));
        c.add_item_before("b", "C", Some("c"));
        let ids: Vec<&str> = c.items().expect("resolves").map(Item::id).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn payload_type_is_opaque() {
        #[derive(Debug, PartialEq)]
        struct NotCloneable(Vec<u8>);

        let mut c = OrderedCollection::new();
        c.add_item(NotCloneable(vec![1]), 0, Some("one"));
        c.add_item_before("one", NotCloneable(vec![2]), None);
        let out: Vec<&NotCloneable> = c.iter().expect("resolves").collect();
        assert_eq!(out, [&NotCloneable(vec![2]), &NotCloneable(vec![1])]);
    }
}
