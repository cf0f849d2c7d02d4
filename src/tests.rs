use core::{cell::Cell, ops::Range};

use proptest::prelude::*;

use crate::{
    hook_fn,
    model::{self, SubtreeSum},
    AvlTree, Error, HookContext, Natural, NodeRef,
};

#[test]
fn four_elems_find() {
    let keys = [0u32, 1, 2, 3];

    // Every permutation of four keys, inserted then looked up.
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let order = [a, b, c, d];
                    if (0..4).any(|k| !order.contains(&k)) {
                        continue;
                    }

                    let mut tree = AvlTree::new();
                    for &i in &order {
                        tree.insert(keys[i]);
                        tree.assert_invariants();
                    }

                    for key in &keys {
                        assert_eq!(tree.find(key).map(|node| node.value()), Some(key));
                    }

                    for &i in &order {
                        assert_eq!(tree.remove(&keys[i]), Some(keys[i]));
                        tree.assert_invariants();
                    }
                    assert!(tree.is_empty());
                }
            }
        }
    }
}

#[test]
fn in_order_round_trip() {
    let mut tree = AvlTree::new();
    tree.extend([5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(tree.items(), [1, 3, 4, 5, 7, 8, 9]);
    // The sequence is restartable.
    assert_eq!(tree.iter().count(), 7);
    assert_eq!(tree.iter().len(), 7);
    assert_eq!((&tree).into_iter().copied().collect::<Vec<_>>(), tree.items());
}

#[test]
fn rank_consistency() {
    let tree: AvlTree<u32> = [10, 20, 30, 40, 50].into_iter().collect();

    assert_eq!(tree.find_by_rank(1), Ok(&10));
    assert_eq!(tree.find_by_rank(3), Ok(&30));
    assert_eq!(tree.find_by_rank(5), Ok(&50));
    assert_eq!(tree.find_by_rank(0), Err(Error::RankOutOfRange { rank: 0, len: 5 }));
    assert_eq!(tree.find_by_rank(6), Err(Error::RankOutOfRange { rank: 6, len: 5 }));

    assert_eq!(tree.min(), Some(&10));
    assert_eq!(tree.max(), Some(&50));

    for (idx, value) in tree.iter().enumerate() {
        assert_eq!(tree.node_by_rank(idx + 1).map(|node| node.value()), Ok(value));
    }
}

#[test]
fn rank_error_message() {
    let err = Error::RankOutOfRange { rank: 6, len: 5 };
    assert_eq!(err.to_string(), "rank 6 is out of range for a tree of 5 values");
}

#[test]
fn removing_evens_keeps_odds() {
    let mut tree = AvlTree::new();

    // 7 is coprime with 20, so this visits 1..=20 in a scrambled order.
    tree.extend((0..20).map(|i| (i * 7) % 20 + 1));
    tree.assert_invariants();
    assert_eq!(tree.len(), 20);

    for even in (2..=20).step_by(2) {
        assert_eq!(tree.remove(&even), Some(even));
        tree.assert_invariants();
    }

    assert_eq!(tree.items(), [1, 3, 5, 7, 9, 11, 13, 15, 17, 19]);
}

#[test]
fn removing_absent_value_is_a_no_op() {
    let mut tree = AvlTree::new();
    tree.extend([1, 2, 3]);

    assert_eq!(tree.remove(&4), None);
    assert_eq!(tree.items(), [1, 2, 3]);

    let mut empty: AvlTree<u32> = AvlTree::new();
    assert_eq!(empty.remove(&4), None);
    assert_eq!(empty.pop_first(), None);
    assert_eq!(empty.pop_last(), None);
}

#[test]
fn successor_and_predecessor() {
    let mut tree = AvlTree::new();
    tree.extend([1, 2, 3]);

    let two = tree.find(&2).unwrap();
    assert_eq!(tree.successor(two), tree.find(&3));
    assert_eq!(tree.predecessor(two), tree.find(&1));

    let three = tree.find(&3).unwrap();
    assert_eq!(tree.successor(three), None);

    let one = tree.find(&1).unwrap();
    assert_eq!(one.predecessor(), None);
}

#[test]
fn successor_walk_visits_everything() {
    let mut tree = AvlTree::new();
    tree.extend((0..100).rev());

    let mut forward = Vec::new();
    let mut cur = tree.find(&0);
    while let Some(node) = cur {
        forward.push(*node.value());
        cur = node.successor();
    }
    assert_eq!(forward, (0..100).collect::<Vec<_>>());

    let mut backward = Vec::new();
    let mut cur = tree.find(&99);
    while let Some(node) = cur {
        backward.push(*node.value());
        cur = node.predecessor();
    }
    assert_eq!(backward, (0..100).rev().collect::<Vec<_>>());
}

#[test]
fn bounds() {
    let mut tree = AvlTree::new();
    tree.extend([10, 20, 20, 30]);

    let lower = |v| tree.lower_bound(&v).map(|node| *node.value());
    let upper = |v| tree.upper_bound(&v).map(|node| *node.value());

    assert_eq!(lower(5), Some(10));
    assert_eq!(lower(20), Some(20));
    assert_eq!(lower(21), Some(30));
    assert_eq!(lower(31), None);

    assert_eq!(upper(5), Some(10));
    assert_eq!(upper(20), Some(30));
    assert_eq!(upper(30), None);

    // The lower bound of a duplicated value is the first of the run.
    let first_twenty = tree.lower_bound(&20).unwrap();
    assert_eq!(first_twenty.predecessor().map(|node| *node.value()), Some(10));
}

#[test]
fn duplicates_form_a_multiset() {
    let mut tree = AvlTree::new();
    tree.extend([2, 2, 1, 2, 3, 2]);
    tree.assert_invariants();

    assert_eq!(tree.items(), [1, 2, 2, 2, 2, 3]);
    assert!(tree.contains(&2));

    assert_eq!(tree.remove(&2), Some(2));
    assert_eq!(tree.items(), [1, 2, 2, 2, 3]);

    while tree.remove(&2).is_some() {
        tree.assert_invariants();
    }
    assert_eq!(tree.items(), [1, 3]);
}

#[test]
fn clear_is_idempotent() {
    let mut tree: AvlTree<u32> = AvlTree::new();
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);

    tree.extend(0..50);
    tree.clear();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(tree.iter().next(), None);
    tree.assert_invariants();

    // The tree is usable after clearing.
    tree.insert(7);
    assert_eq!(tree.items(), [7]);
}

#[test]
fn sorted_insertion_stays_balanced() {
    let mut tree = AvlTree::new();

    for i in 0..1024u32 {
        tree.insert(i);
    }
    tree.assert_invariants();

    // An AVL tree of n nodes is no taller than about 1.44 * log2(n).
    assert_eq!(tree.len(), 1024);
    assert!(tree.height() <= 14, "height {} too large", tree.height());
    assert_eq!(tree.root().map(|root| root.weight()), Some(1024));
    assert_eq!(tree.items(), (0..1024).collect::<Vec<_>>());
}

#[test]
fn size_and_height_follow_root_metadata() {
    let mut tree = AvlTree::new();
    assert_eq!((tree.len(), tree.height()), (0, 0));

    tree.insert(1);
    assert_eq!((tree.len(), tree.height()), (1, 0));

    tree.insert(2);
    assert_eq!((tree.len(), tree.height()), (2, 1));

    tree.insert(3);
    assert_eq!((tree.len(), tree.height()), (3, 1));

    let root = tree.root().unwrap();
    assert_eq!((root.weight(), root.height()), (tree.len(), tree.height()));
    assert!(root.is_root());
    assert!(root.left().unwrap().is_leaf());
    assert_eq!(root.left().unwrap().parent(), Some(root));
}

#[test]
fn custom_comparator() {
    let mut tree = AvlTree::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
    tree.extend(["ccc", "a", "bb", "dd"]);
    tree.assert_invariants();

    // Equal keys keep their relative insertion order because ties go right.
    assert_eq!(tree.items(), ["a", "bb", "dd", "ccc"]);
    assert!(tree.contains(&"zz"));
    assert_eq!(tree.find_by_rank(4), Ok(&"ccc"));
}

#[test]
fn hook_fires_on_every_touched_node() {
    let calls = Cell::new(0usize);
    let counter = hook_fn(|node: &mut HookContext<'_, u32, usize>| {
        calls.set(calls.get() + 1);
        *node.aug_mut() += 1;
    });

    let mut tree: AvlTree<u32, Natural, _, usize> = AvlTree::with_hooks(Natural, counter);

    for n in 1..=64u32 {
        let before = calls.get();
        tree.insert(n);

        // At least the new leaf and every node above it are refreshed.
        let depth = {
            let mut node = tree.find(&n).unwrap();
            let mut depth = 1;
            while let Some(parent) = node.parent() {
                node = parent;
                depth += 1;
            }
            depth
        };
        assert!(calls.get() - before >= depth);
    }

    // Every node has been refreshed at least once.
    assert!(tree.nodes().all(|node| *node.aug() >= 1));
}

#[test]
fn hook_maintains_subtree_sums() {
    let mut tree: model::ModelTree = AvlTree::with_hooks(Natural, SubtreeSum);
    tree.extend((1..=100).map(|i| (i * 37) % 101));

    for node in tree.nodes() {
        let expected: u64 = subtree_values(node).into_iter().map(u64::from).sum();
        assert_eq!(*node.aug(), expected);
    }

    for i in (1..=100).step_by(3) {
        tree.remove(&((i * 37) % 101));
    }

    let total: u64 = tree.iter().map(|&v| u64::from(v)).sum();
    assert_eq!(tree.root().map(|root| *root.aug()), Some(total));
}

fn subtree_values(node: NodeRef<'_, u32, u64>) -> Vec<u32> {
    let mut out = Vec::new();
    if let Some(left) = node.left() {
        out.extend(subtree_values(left));
    }
    out.push(*node.value());
    if let Some(right) = node.right() {
        out.extend(subtree_values(right));
    }
    out
}

#[test]
fn for_each_passes_value_and_node() {
    let mut tree = AvlTree::new();
    tree.extend([3, 1, 2]);

    let mut seen = Vec::new();
    tree.for_each(|value, node| {
        assert_eq!(value, node.value());
        seen.push(*value);
    });
    assert_eq!(seen, [1, 2, 3]);
}

#[test]
fn debug_lists_values_in_order() {
    let tree: AvlTree<u32> = [3, 1, 2].into_iter().collect();
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn multiset_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_multiset_equivalence(ops);
    }

    #[test]
    fn in_order_is_sorted(input in proptest::collection::vec(0u16..512, 0..300)) {
        let tree: AvlTree<u16> = input.iter().copied().collect();
        tree.assert_invariants();

        let mut sorted = input.clone();
        sorted.sort_unstable();
        prop_assert_eq!(tree.items(), sorted);
    }
}
