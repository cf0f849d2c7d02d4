//! Model-based testing support.
//!
//! [`run_multiset_equivalence`] drives an [`AvlTree`] and a sorted `Vec` through the same
//! sequence of operations and checks that they agree after every step. Operations can be
//! generated either by proptest ([`op_strategy`]) or by a fuzzer (via [`arbitrary::Arbitrary`]).

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlTree, Error, Hook, HookContext, Natural};

/// Maintains the sum of every value in a node's subtree.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubtreeSum;

impl Hook<u32, u64> for SubtreeSum {
    fn update(&self, node: &mut HookContext<'_, u32, u64>) {
        let left = node.left().map_or(0, |l| *l.aug());
        let right = node.right().map_or(0, |r| *r.aug());
        node.set_aug(left + right + u64::from(*node.value()));
    }
}

pub type ModelTree = AvlTree<u32, Natural, SubtreeSum, u64>;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Find(ItemValue),
    Remove(ItemValue),
    LowerBound(ItemValue),
    UpperBound(ItemValue),
    FindByRank(usize),
    Min,
    Max,
    PopFirst,
    PopLast,
    Clear,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        // Index values pick an element that is already present, so that lookups and removals
        // hit more often than random values would.
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Find(item) => FinalOp::Find(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::LowerBound(item) => FinalOp::LowerBound(get_value(sorted, item)),
            Op::UpperBound(item) => FinalOp::UpperBound(get_value(sorted, item)),
            // Stray one past either end now and then.
            Op::FindByRank(rank) => FinalOp::FindByRank(rank % (sorted.len() + 2)),
            Op::Min => FinalOp::Min,
            Op::Max => FinalOp::Max,
            Op::PopFirst => FinalOp::PopFirst,
            Op::PopLast => FinalOp::PopLast,
            Op::Clear => FinalOp::Clear,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Find(u32),
    Remove(u32),
    LowerBound(u32),
    UpperBound(u32),
    FindByRank(usize),
    Min,
    Max,
    PopFirst,
    PopLast,
    Clear,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        16 => value_strategy().prop_map(Op::Insert),
        4 => value_strategy().prop_map(Op::Find),
        8 => value_strategy().prop_map(Op::Remove),
        4 => value_strategy().prop_map(Op::LowerBound),
        4 => value_strategy().prop_map(Op::UpperBound),
        4 => (0usize..1000).prop_map(Op::FindByRank),
        4 => proptest::prop_oneof![
            Just(Op::Min),
            Just(Op::Max),
            Just(Op::PopFirst),
            Just(Op::PopLast),
        ],
        // Rare, so that trees get a chance to grow.
        1 => Just(Op::Clear),
    ]
}

pub fn run_multiset_equivalence(ops: Vec<Op>) {
    // The model: all values, sorted, duplicates included.
    let mut sorted_values: Vec<u32> = Vec::with_capacity(ops.len());
    let mut tree: ModelTree = AvlTree::with_hooks(Natural, SubtreeSum);

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        // Equal values go after existing ones, as in the tree.
        let idx = v.partition_point(|&x| x <= value);
        v.insert(idx, value);
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) -> Option<u32> {
        let idx = v.binary_search(&value).ok()?;
        Some(v.remove(idx))
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);
                tree.insert(value);
            }

            FinalOp::Find(value) => {
                let from_model = sorted_values.binary_search(&value).ok().map(|_| value);
                let from_tree = tree.find(&value).map(|node| *node.value());

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
                assert_eq!(from_model.is_some(), tree.contains(&value));
            }

            FinalOp::Remove(value) => {
                let from_model = remove_sorted(&mut sorted_values, value);
                let from_tree = tree.remove(&value);

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::LowerBound(value) => {
                let idx = sorted_values.partition_point(|&x| x < value);
                let from_model = sorted_values.get(idx);
                let from_tree = tree.lower_bound(&value).map(|node| node.value());

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::UpperBound(value) => {
                let idx = sorted_values.partition_point(|&x| x <= value);
                let from_model = sorted_values.get(idx);
                let from_tree = tree.upper_bound(&value).map(|node| node.value());

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::FindByRank(rank) => {
                let from_model = rank
                    .checked_sub(1)
                    .and_then(|idx| sorted_values.get(idx))
                    .ok_or(Error::RankOutOfRange {
                        rank,
                        len: sorted_values.len(),
                    });
                let from_tree = tree.find_by_rank(rank);

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Min => {
                assert_eq!(sorted_values.first(), tree.min(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Max => {
                assert_eq!(sorted_values.last(), tree.max(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                let from_model = (!sorted_values.is_empty()).then(|| sorted_values.remove(0));
                let from_tree = tree.pop_first();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                let from_model = sorted_values.pop();
                let from_tree = tree.pop_last();

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                sorted_values.clear();
                tree.clear();
            }
        }

        tree.assert_invariants();
        assert_eq!(sorted_values.len(), tree.len());
        assert!(sorted_values.iter().eq(tree.iter()));

        let sum: u64 = sorted_values.iter().map(|&v| u64::from(v)).sum();
        assert_eq!(sum, tree.root().map_or(0, |root| *root.aug()), "stale subtree sum");
    }
}
