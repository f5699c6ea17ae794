use std::collections::{BTreeMap, BTreeSet};
use std::iter::once;

use hashbrown::HashSet;

use crate::{AmtMap, AmtSet};

#[derive(Debug)]
pub(crate) enum Operation {
    Insert(u64),
    Remove(u64),
    Dump,
}

pub(crate) fn test_map(ops: impl IntoIterator<Item = Operation>) {
    let mut oracle = BTreeMap::<u64, u64>::new();
    let seed: u64 = rand::random();
    let mut map1 = AmtMap::<u64, u64>::with_seed(seed);
    let mut map2 = AmtMap::<u64, u64>::with_seed(seed);
    for op in ops {
        match op {
            Operation::Insert(i) => {
                let k = i;
                let v = i + 1;
                assert_eq!(oracle.get(&k), map1.get(&k));
                assert_eq!(oracle.insert(k, v), map1.insert(k, v));
                map2.insert(k, v);
                assert_eq!(oracle.get(&k), map1.get(&k));
                assert_eq!(oracle.contains_key(&k), map1.contains_key(&k));
                assert_eq!(oracle.len(), map1.len());
            }
            Operation::Remove(i) => {
                assert_eq!(oracle.contains_key(&i), map1.contains_key(&i));
                assert_eq!(oracle.remove(&i), map1.remove(&i));
                map2.remove(&i);
                assert_eq!(oracle.contains_key(&i), map1.contains_key(&i));
                assert_eq!(oracle.len(), map1.len());
            }
            Operation::Dump => {
                map1.check_invariants();
                assert_eq!(oracle.len(), map1.len());
                let expected: Vec<(u64, u64)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
                let mut got: Vec<(u64, u64)> = Default::default();
                map1.for_each(|k, v| {
                    got.push((*k, *v));
                    true
                });
                let mut got2: Vec<(u64, u64)> = Default::default();
                map2.for_each(|k, v| {
                    got2.push((*k, *v));
                    true
                });
                // The two same-seed maps must agree on the raw hash order;
                // the contents must match the oracle after sorting.
                assert_eq!(got, got2);
                assert_eq!(map1.mean_depth(), map2.mean_depth());
                got.sort_unstable();
                assert_eq!(expected, got);
                for (k, _) in expected {
                    assert_eq!(oracle.get(&k), map1.get(&k));
                }
            }
        }
    }
}

pub(crate) fn test_set(ops: impl IntoIterator<Item = Operation>) {
    let mut oracle = BTreeSet::<u64>::new();
    let seed: u64 = rand::random();
    let mut set1 = AmtSet::<u64>::with_seed(seed);
    let mut set2 = AmtSet::<u64>::with_seed(seed);
    for op in ops {
        match op {
            Operation::Insert(i) => {
                assert_eq!(oracle.contains(&i), set1.contains(&i));
                assert_eq!(oracle.insert(i), set1.insert(i));
                set2.insert(i);
                assert_eq!(oracle.contains(&i), set1.contains(&i));
                assert_eq!(oracle.len(), set1.len());
            }
            Operation::Remove(i) => {
                assert_eq!(oracle.contains(&i), set1.contains(&i));
                assert_eq!(oracle.remove(&i), set1.remove(&i));
                set2.remove(&i);
                assert_eq!(oracle.contains(&i), set1.contains(&i));
                assert_eq!(oracle.len(), set1.len());
            }
            Operation::Dump => {
                set1.check_invariants();
                assert_eq!(oracle.len(), set1.len());
                let expected: Vec<u64> = oracle.iter().copied().collect();
                let mut got: Vec<u64> = Default::default();
                set1.for_each(|k| {
                    got.push(*k);
                    true
                });
                let mut got2: Vec<u64> = Default::default();
                set2.for_each(|k| {
                    got2.push(*k);
                    true
                });
                assert_eq!(got, got2);
                assert_eq!(set1.mean_depth(), set2.mean_depth());
                got.sort_unstable();
                assert_eq!(expected, got);
                for k in expected {
                    assert_eq!(oracle.contains(&k), set1.contains(&k));
                }
            }
        }
    }
}

pub(crate) fn insert_remove_sparse() -> impl Iterator<Item = Operation> {
    const N: usize = 1000;
    let to_insert: HashSet<u64> = (0..N).map(|_| rand::random::<u64>()).collect();
    let in_sequence: Vec<u64> = to_insert.into_iter().collect();
    let in_set: Vec<u64> = in_sequence[0..(N / 2)].to_vec();
    let not_in_set: Vec<u64> = in_sequence[(N / 2)..].to_vec();
    in_set
        .clone()
        .into_iter()
        .map(Operation::Insert)
        .chain(once(Operation::Dump))
        .chain(not_in_set.into_iter().map(Operation::Remove))
        .chain(once(Operation::Dump))
        .chain(in_set.into_iter().map(Operation::Remove))
        .chain(once(Operation::Dump))
}

pub(crate) fn insert_remove_dense() -> impl Iterator<Item = Operation> {
    (0..1000)
        .map(Operation::Insert)
        .chain(once(Operation::Dump))
        .chain((0..1000).map(Operation::Remove))
        .chain(once(Operation::Dump))
}

/// Interleaved churn: inserts and deletes striding over overlapping key
/// ranges, dumping at every phase boundary.
pub(crate) fn churn() -> impl Iterator<Item = Operation> {
    (0..2048)
        .map(Operation::Insert)
        .chain((0..2048).step_by(2).map(Operation::Remove))
        .chain(once(Operation::Dump))
        .chain((1024..3072).map(Operation::Insert))
        .chain(once(Operation::Dump))
        .chain((0..3072).step_by(3).map(Operation::Remove))
        .chain(once(Operation::Dump))
        .chain((0..3072).map(Operation::Remove))
        .chain(once(Operation::Dump))
}
