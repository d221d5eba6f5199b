use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeSet;

#[test]
fn test_iter_empty() {
    let tree: RbTree<i32> = RbTree::new();
    let mut iter = tree.iter();
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iter_lazy() {
    let tree: RbTree<u32> = (0..1024).rev().collect();

    let mut iter = tree.iter();
    assert_eq!(iter.len(), 1024);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.len(), 1022);
    // only the pending path is held, not the whole tree.
    assert!(iter.paths.len() <= 20, "{}", iter.paths.len());

    let rest: Vec<u32> = iter.cloned().collect();
    assert_eq!(rest, (2..1024).collect::<Vec<u32>>());
}

#[test]
fn test_iter_restart() {
    let tree: RbTree<u32> = vec![5, 3, 8, 1].into_iter().collect();

    let first: Vec<u32> = tree.iter().take(2).cloned().collect();
    assert_eq!(first, vec![1, 3]);

    let all: Vec<u32> = (&tree).into_iter().cloned().collect();
    assert_eq!(all, vec![1, 3, 5, 8]);
    let all: Vec<u32> = tree.iter().cloned().collect();
    assert_eq!(all, vec![1, 3, 5, 8]);
}

#[test]
fn test_iter_after_deletes() {
    let seed: u64 = random();
    println!("test_iter_after_deletes {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut tree: RbTree<u16> = RbTree::new();
    let mut btset: BTreeSet<u16> = BTreeSet::new();
    for _i in 0..5000 {
        let value = rng.gen::<u16>() % 2048;
        if rng.gen::<bool>() {
            tree.insert(value);
            btset.insert(value);
        } else {
            tree.delete(&value).ok();
            btset.remove(&value);
        }
    }

    let iter = tree.iter();
    assert_eq!(iter.len(), btset.len());
    let a: Vec<u16> = iter.cloned().collect();
    let b: Vec<u16> = btset.iter().cloned().collect();
    assert_eq!(a, b);

    let mut n = 0;
    for value in &tree {
        assert!(btset.contains(value));
        n += 1;
    }
    assert_eq!(n, btset.len());
}
