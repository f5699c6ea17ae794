//! A mutable map from hashable keys to values.

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use crate::key::Key;
use crate::node::{HashStream, Node, Removal, Upsert, Upserted, FANOUT};


/// Owned state behind an initialized handle: the top-level node (always a
/// full-fanout array), the hash seed, and the size and summed-depth
/// counters.
#[derive(Clone)]
pub(crate) struct Root<K, V> {
    seed: u64,
    len: u64,
    depth_sum: u64,
    node: Node<K, V>,
}

impl<K, V> Root<K, V> {
    fn new(seed: u64) -> Root<K, V> {
        Root {
            seed,
            len: 0,
            depth_sum: 0,
            node: Node::with_capacity(FANOUT),
        }
    }

    fn apply(&mut self, outcome: Upserted) {
        match outcome {
            Upserted::Added { depth } => {
                self.len += 1;
                self.depth_sum += depth as u64;
            }
            Upserted::Updated => {}
            Upserted::Split { from, to } => {
                // The displaced key moved from `from` down to `to`, and the
                // new key landed at `to` as well.
                self.len += 1;
                self.depth_sum += 2 * to as u64 - from as u64;
            }
        }
    }
}

/// A map from keys to values backed by a hash array mapped trie.
///
/// [`AmtMap::new`] returns an initialized, empty map with a fresh random
/// hash seed. The [`Default`] value is the *uninitialized* handle, the
/// zero that [`val`](AmtMap::val) yields for a missing map-valued key.
/// Every operation except [`len`](AmtMap::len),
/// [`mean_depth`](AmtMap::mean_depth), [`is_nil`](AmtMap::is_nil) and
/// [`val`](AmtMap::val) panics on an uninitialized handle.
#[derive(Clone)]
pub struct AmtMap<K, V> {
    root: Option<Box<Root<K, V>>>,
}

impl<K: Key, V> AmtMap<K, V> {
    /// An initialized map with a seed drawn from the host entropy source.
    pub fn new() -> AmtMap<K, V> {
        AmtMap::with_seed(rand::random())
    }

    /// An initialized map with a caller-chosen hash seed. Two maps built
    /// with the same seed from the same insertion sequence have identical
    /// structure, mean depth, and iteration order.
    pub fn with_seed(seed: u64) -> AmtMap<K, V> {
        AmtMap {
            root: Some(Box::new(Root::new(seed))),
        }
    }

    /// True if this handle was never initialized.
    pub fn is_nil(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys stored, 0 for an uninitialized handle.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.len as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean number of levels between the root and a stored key, 0 when
    /// empty or uninitialized. Grows like log16 of the population.
    pub fn mean_depth(&self) -> f64 {
        match &self.root {
            Some(r) if r.len > 0 => r.depth_sum as f64 / r.len as f64,
            _ => 0.0,
        }
    }

    fn root(&self) -> &Root<K, V> {
        self.root
            .as_deref()
            .expect("operation on an uninitialized map handle")
    }

    fn root_mut(&mut self) -> &mut Root<K, V> {
        self.root
            .as_deref_mut()
            .expect("operation on an uninitialized map handle")
    }

    /// The stored value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        let root = self.root();
        let mut stream = HashStream::new(key, root.seed);
        root.node.get(key, root.seed, &mut stream)
    }

    /// A mutable reference to the stored value for `key`, if present. The
    /// value's address is stable until `key` itself is removed.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        let root = self.root_mut();
        let mut stream = HashStream::new(key, root.seed);
        root.node.get_mut(key, root.seed, &mut stream)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.get(key).is_some()
    }

    /// The value for `key` by value, or the value type's zero when the key
    /// is missing or this handle is uninitialized.
    pub fn val<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
        V: Clone + Default,
    {
        if self.is_nil() {
            return V::default();
        }
        self.get(key).cloned().unwrap_or_default()
    }

    /// Insert or overwrite the value for `key`, returning the previous
    /// value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let root = self.root_mut();
        let mut stream = HashStream::new(&key, root.seed);
        let mut prev = None;
        let outcome = root.node.upsert(
            key,
            root.seed,
            &mut stream,
            Overwrite {
                value,
                prev: &mut prev,
            },
        );
        root.apply(outcome);
        prev
    }

    /// Update the value for `key` in place. The callback receives the
    /// stored value and `true`, or a freshly default-initialized value and
    /// `false` when the key was absent; in the latter case the value is
    /// linked in after the callback runs.
    pub fn modify<F>(&mut self, key: K, f: F)
    where
        V: Default,
        F: FnOnce(&mut V, bool),
    {
        let root = self.root_mut();
        let mut stream = HashStream::new(&key, root.seed);
        let outcome = root.node.upsert(key, root.seed, &mut stream, Modify { f });
        root.apply(outcome);
    }

    /// Remove `key` if present, returning its value. Removing a missing
    /// key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        let root = self.root_mut();
        let mut stream = HashStream::new(key, root.seed);
        match root.node.remove(key, root.seed, &mut stream, true) {
            Removal::NotFound => None,
            Removal::Removed {
                value,
                depth,
                lifts,
            } => {
                root.len -= 1;
                root.depth_sum -= depth as u64 + lifts as u64;
                Some(*value)
            }
        }
    }

    /// Visit every pair in depth-first, ascending-radix order until the
    /// visitor returns false. The order is deterministic for a fixed seed
    /// and insertion history; it is not randomized per call.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V) -> bool) {
        self.root().node.for_each(&mut f);
    }

    /// Like [`for_each`](AmtMap::for_each), but the visitor may mutate the
    /// value in place.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.root_mut().node.for_each_mut(&mut f);
    }
}

/// The uninitialized handle, mirroring the zero value a lookup for a
/// missing map-valued key produces. Use [`AmtMap::new`] for a usable map.
impl<K, V> Default for AmtMap<K, V> {
    fn default() -> AmtMap<K, V> {
        AmtMap { root: None }
    }
}

impl<K, V> fmt::Debug for AmtMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(r) => write!(f, "AmtMap{{len={}, ...}}", r.len),
            None => write!(f, "AmtMap{{nil}}"),
        }
    }
}

struct Overwrite<'a, V> {
    value: V,
    prev: &'a mut Option<V>,
}

impl<'a, V> Upsert<V> for Overwrite<'a, V> {
    fn fresh(self) -> Box<V> {
        Box::new(self.value)
    }

    fn existing(self, slot: &mut V) {
        *self.prev = Some(mem::replace(slot, self.value));
    }
}

struct Modify<F> {
    f: F,
}

impl<V: Default, F: FnOnce(&mut V, bool)> Upsert<V> for Modify<F> {
    fn fresh(self) -> Box<V> {
        // The callback sees the value at its final address.
        let mut value = Box::new(V::default());
        (self.f)(&mut value, false);
        value
    }

    fn existing(self, value: &mut V) {
        (self.f)(value, true);
    }
}

#[cfg(test)]
impl<K: Key, V> AmtMap<K, V> {
    /// Walk the whole trie re-deriving the size and depth-sum counters and
    /// asserting every structural invariant.
    pub(crate) fn check_invariants(&self) {
        let Some(root) = self.root.as_deref() else {
            return;
        };
        let (leaves, depth_sum) = root.node.check(0, true);
        assert_eq!(leaves, root.len, "size counter out of sync");
        assert_eq!(depth_sum, root.depth_sum, "depth-sum counter out of sync");
    }
}
