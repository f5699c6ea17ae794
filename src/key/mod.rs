//! Hash drivers for the key shapes a trie can be indexed by.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// A key that can be stored in an [`AmtMap`](crate::AmtMap) or
/// [`AmtSet`](crate::AmtSet).
///
/// `hash_iter` must be deterministic for a fixed seed, and for `iter >= 1`
/// the returned word must be statistically independent of the words for
/// lower iteration counts: the trie pulls iteration `r + 1` once it has
/// consumed all 16 radices of iteration `r`'s word.
///
/// Like [`Hash`](std::hash::Hash) under [`Borrow`](std::borrow::Borrow),
/// an owned key and its borrowed form (e.g. `String` and `str`) must
/// produce identical hashes.
pub trait Key: Eq {
    /// Hash the key under `seed`. Iteration 0 is the initial hash; each
    /// subsequent iteration extends the hash stream.
    fn hash_iter(&self, seed: u64, iter: u32) -> u64;
}

/// Seeded bytestream hash, applied `iter + 1` times over `bytes`.
///
/// This is the driver behind every built-in key shape; custom [`Key`]
/// implementations over byte-like data can delegate to it.
pub fn hash_bytes(bytes: &[u8], seed: u64, iter: u32) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    for _ in 0..=iter {
        hasher.write(bytes);
    }
    hasher.finish()
}

impl Key for u64 {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(&self.to_le_bytes(), seed, iter)
    }
}

impl Key for i64 {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(&self.to_le_bytes(), seed, iter)
    }
}

impl Key for [u8] {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self, seed, iter)
    }
}

impl Key for Box<[u8]> {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self, seed, iter)
    }
}

impl Key for Vec<u8> {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self, seed, iter)
    }
}

impl Key for str {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self.as_bytes(), seed, iter)
    }
}

impl Key for String {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self.as_bytes(), seed, iter)
    }
}

impl<const N: usize> Key for [u8; N] {
    fn hash_iter(&self, seed: u64, iter: u32) -> u64 {
        hash_bytes(self, seed, iter)
    }
}
