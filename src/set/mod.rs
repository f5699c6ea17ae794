//! A set variant of the trie: tracks key presence with a zero-size
//! payload, sharing the map's engine.

use std::borrow::Borrow;
use std::fmt;

use crate::key::Key;
use crate::map::AmtMap;


/// A set of keys backed by a hash array mapped trie.
///
/// [`AmtSet::new`] returns an initialized, empty set; the [`Default`]
/// value is the uninitialized handle. Every operation except
/// [`len`](AmtSet::len), [`mean_depth`](AmtSet::mean_depth) and
/// [`is_nil`](AmtSet::is_nil) panics on an uninitialized handle.
#[derive(Clone)]
pub struct AmtSet<K> {
    map: AmtMap<K, ()>,
}

impl<K: Key> AmtSet<K> {
    /// An initialized set with a seed drawn from the host entropy source.
    pub fn new() -> AmtSet<K> {
        AmtSet { map: AmtMap::new() }
    }

    /// An initialized set with a caller-chosen hash seed. Two sets built
    /// with the same seed from the same insertion sequence have identical
    /// structure, mean depth, and iteration order.
    pub fn with_seed(seed: u64) -> AmtSet<K> {
        AmtSet {
            map: AmtMap::with_seed(seed),
        }
    }

    /// True if this handle was never initialized.
    pub fn is_nil(&self) -> bool {
        self.map.is_nil()
    }

    /// The number of keys stored, 0 for an uninitialized handle.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Mean number of levels between the root and a stored key, 0 when
    /// empty or uninitialized.
    pub fn mean_depth(&self) -> f64 {
        self.map.mean_depth()
    }

    /// Add `key`, returning true if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.map.insert(key, ()).is_none()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Remove `key`, returning true if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.map.remove(key).is_some()
    }

    /// Visit every key in depth-first, ascending-radix order until the
    /// visitor returns false. The order is deterministic for a fixed seed
    /// and insertion history.
    pub fn for_each(&self, mut f: impl FnMut(&K) -> bool) {
        self.map.for_each(|key, _| f(key));
    }
}

/// The uninitialized handle. Use [`AmtSet::new`] for a usable set.
impl<K> Default for AmtSet<K> {
    fn default() -> AmtSet<K> {
        AmtSet {
            map: AmtMap::default(),
        }
    }
}

impl<K: Key> fmt::Debug for AmtSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map.is_nil() {
            write!(f, "AmtSet{{nil}}")
        } else {
            write!(f, "AmtSet{{len={}, ...}}", self.map.len())
        }
    }
}

#[cfg(test)]
impl<K: Key> AmtSet<K> {
    pub(crate) fn check_invariants(&self) {
        self.map.check_invariants();
    }
}
