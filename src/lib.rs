//! Mutable maps and sets backed by a Hash Array Mapped Trie (HAMT).
//!
//! Every trie level is a sparse, bitmap-compressed array of up to 16
//! children indexed by 4 bits of a keyed hash, so the depth of a map or set
//! stays on the order of log16(N). See "Ideal Hash Trees" (Phil Bagwell,
//! 2001) for the data structure family.

pub(crate) mod key;
pub(crate) mod map;
pub(crate) mod node;
pub(crate) mod set;

#[cfg(test)]
pub(crate) mod test_workloads;

pub use key::{hash_bytes, Key};
pub use map::AmtMap;
pub use set::AmtSet;

/// A map from 64-bit integers to values.
pub type IntMap<V> = AmtMap<i64, V>;
/// A set of 64-bit integers.
pub type IntSet = AmtSet<i64>;
/// A map from strings to values.
pub type StringMap<V> = AmtMap<String, V>;
/// A set of strings.
pub type StringSet = AmtSet<String>;
/// A map from byte slices to values. The key buffer is owned by the trie.
pub type BytesMap<V> = AmtMap<Box<[u8]>, V>;
/// A set of byte slices. The key buffer is owned by the trie.
pub type BytesSet = AmtSet<Box<[u8]>>;
/// A map from fixed-size byte arrays to values.
pub type ArrMap<const N: usize, V> = AmtMap<[u8; N], V>;
/// A set of fixed-size byte arrays.
pub type ArrSet<const N: usize> = AmtSet<[u8; N]>;
