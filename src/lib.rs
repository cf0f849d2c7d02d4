//! An augmented AVL tree with order-statistics support.
//!
//! [`AvlTree`] is an ordered multiset. Every node caches the height and the weight (node count)
//! of its subtree, which answers rank queries, bounds queries and successor/predecessor queries
//! in _O(log(n))_ time. User-defined per-node statistics (subtree sums, minima, ...) can ride
//! along through [`Hook`]s, which the tree runs every time it recomputes a node's metadata.
//!
//! ```
//! use augmented_avl::{AvlTree, Error};
//!
//! let mut tree = AvlTree::new();
//! tree.extend([5, 3, 8, 1, 4, 7, 9]);
//!
//! assert_eq!(tree.items(), [1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.find_by_rank(3), Ok(&4));
//! assert_eq!(tree.find_by_rank(8), Err(Error::RankOutOfRange { rank: 8, len: 7 }));
//! assert_eq!(tree.lower_bound(&6).map(|node| *node.value()), Some(7));
//!
//! let three = tree.find(&3).unwrap();
//! assert_eq!(three.successor().map(|node| *node.value()), Some(4));
//! ```
//!
//! Nodes live in an arena and refer to each other by index, parents included. Node handles
//! returned by queries ([`NodeRef`]) borrow the tree and are therefore invalidated by the borrow
//! checker at the next mutation.

// Conventions used in comments:
// - `h(x)` is the height of node `x`; leaves have height 0 and a missing child counts as -1.
// - `w(x)` is the weight of `x`, the number of nodes in its subtree.
// - `bf(x) = h(left(x)) - h(right(x))` is the balance factor of `x`.
//
// The invariants of the tree are:
// 1. In-order traversal is non-decreasing under the comparator. A new value equal to existing
//    ones is inserted to their right, but rotations may later move equal values to either side
//    of each other, so a left child is only guaranteed to be not greater than its parent.
// 2. `|bf(x)| <= 1` for every node.
// 3. `h(x) = max(h(left(x)), h(right(x))) + 1` and `w(x) = w(left(x)) + w(right(x)) + 1`.
// 4. `p(x) = y` iff `x` is a child of `y`.
//
// Between the structural change and the end of `rebalance_to_root`, (2) and (3) may be violated
// on the path from the change to the root, and nowhere else.

use core::{fmt, mem};

mod arena;
mod compare;
mod debug;
mod error;
mod hook;
mod iter;
mod node;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

use arena::Arena;
use node::{extreme_in_subtree, Dir, Link, Node, NodeId};

pub use compare::{Comparator, Natural};
pub use error::{Error, Result};
pub use hook::{hook_fn, FnHook, Hook, HookContext};
pub use iter::{Iter, Nodes};
pub use node::NodeRef;

/// A height-balanced binary search tree with cached subtree heights and weights.
///
/// - `T` is the value type.
/// - `C` orders values; see [`Comparator`]. Defaults to `T`'s own `<`.
/// - `H` is the set of augmentation hooks; see [`Hook`]. Defaults to none.
/// - `A` is the per-node augmentation the hooks maintain. Defaults to `()`.
///
/// Equal values are allowed. A new value equal to existing ones is placed after them, so equal
/// values keep their insertion order.
#[derive(Clone)]
pub struct AvlTree<T, C = Natural, H = (), A = ()> {
    nodes: Arena<Node<T, A>>,
    root: Link,
    cmp: C,
    hooks: H,
}

impl<T: PartialOrd> AvlTree<T> {
    /// Returns a new empty tree ordered by `T`'s `<` operator.
    pub const fn new() -> Self {
        AvlTree::with_comparator(Natural)
    }
}

impl<T: PartialOrd> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T, C> AvlTree<T, C> {
    /// Returns a new empty tree ordered by `cmp`.
    pub const fn with_comparator(cmp: C) -> Self {
        AvlTree::with_hooks(cmp, ())
    }
}

impl<T, C, H, A> AvlTree<T, C, H, A> {
    /// Returns a new empty tree ordered by `cmp` whose nodes are augmented by `hooks`.
    ///
    /// Several hooks can be registered with a tuple or a `Vec`; they run in that order.
    pub const fn with_hooks(cmp: C, hooks: H) -> Self {
        AvlTree {
            nodes: Arena::new(),
            root: None,
            cmp,
            hooks,
        }
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.links(root).weight())
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        let empty = self.root.is_none();
        debug_assert_eq!(empty, self.nodes.len() == 0);
        empty
    }

    /// Returns the height of the root, which is 0 for both an empty tree and a single value.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.links(root).height() as usize)
    }

    /// Returns the comparator ordering the tree.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the hooks run on every metadata update.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, A>> {
        self.root.map(|root| self.node_ref(root))
    }

    /// Returns the node holding the next value in ascending order.
    pub fn successor<'a>(&'a self, node: NodeRef<'a, T, A>) -> Option<NodeRef<'a, T, A>> {
        debug_assert!(self.owns(node), "node belongs to a different tree");
        node.successor()
    }

    /// Returns the node holding the previous value in ascending order.
    pub fn predecessor<'a>(&'a self, node: NodeRef<'a, T, A>) -> Option<NodeRef<'a, T, A>> {
        debug_assert!(self.owns(node), "node belongs to a different tree");
        node.predecessor()
    }

    /// Returns the node holding the value of 1-indexed rank `rank`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn node_by_rank(&self, rank: usize) -> Result<NodeRef<'_, T, A>> {
        let len = self.len();
        let out_of_range = Error::RankOutOfRange { rank, len };

        if rank == 0 || rank > len {
            return Err(out_of_range);
        }

        let mut opt_cur = self.root;
        let mut rank = rank;

        while let Some(cur) = opt_cur {
            let links = self.links(cur);
            let left_weight = self.weight(links.left());

            if rank <= left_weight {
                opt_cur = links.left();
            } else if rank == left_weight + 1 {
                return Ok(self.node_ref(cur));
            } else {
                rank -= left_weight + 1;
                opt_cur = links.right();
            }
        }

        unreachable!("subtree weights are out of sync with the tree shape")
    }

    /// Returns the value of 1-indexed rank `rank`, so `find_by_rank(1)` is the minimum.
    ///
    /// Fails with [`Error::RankOutOfRange`] if `rank` is 0 or greater than [`len`](Self::len).
    pub fn find_by_rank(&self, rank: usize) -> Result<&T> {
        self.node_by_rank(rank).map(|node| node.value())
    }

    /// Returns the minimum value, or `None` if the tree is empty.
    ///
    /// This is a rank query and completes in _O(log(n))_ time.
    pub fn min(&self) -> Option<&T> {
        self.find_by_rank(1).ok()
    }

    /// Returns the maximum value, or `None` if the tree is empty.
    ///
    /// This is a rank query and completes in _O(log(n))_ time.
    pub fn max(&self) -> Option<&T> {
        self.find_by_rank(self.len()).ok()
    }

    /// Returns an iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self.nodes())
    }

    /// Returns an iterator over the nodes in ascending order of their values.
    pub fn nodes(&self) -> Nodes<'_, T, A> {
        Nodes::new(&self.nodes, self.root, self.len())
    }

    /// Calls `f` on every value and its node, in ascending order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, NodeRef<'_, T, A>),
    {
        for node in self.nodes() {
            f(node.value(), node);
        }
    }

    /// Returns a copy of every value, in ascending order.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Clears the tree, removing all values.
    ///
    /// The nodes are released together rather than one by one.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            log::debug!("clearing tree of {} values", self.len());
        }

        self.nodes.clear();
        self.root = None;
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_, T, A> {
        NodeRef::new(&self.nodes, id)
    }

    fn owns(&self, node: NodeRef<'_, T, A>) -> bool {
        node == self.node_ref(node.id())
    }

    #[inline]
    fn links(&self, id: NodeId) -> &node::Links {
        &self.nodes.get(id).links
    }

    #[inline]
    fn links_mut(&mut self, id: NodeId) -> &mut node::Links {
        &mut self.nodes.get_mut(id).links
    }

    /// Returns the height of the pointed-to subtree, -1 if it is empty.
    #[inline]
    fn height_of(&self, link: Link) -> i64 {
        link.map_or(-1, |id| i64::from(self.links(id).height()))
    }

    #[inline]
    fn weight(&self, link: Link) -> usize {
        link.map_or(0, |id| self.links(id).weight())
    }

    fn balance_factor(&self, id: NodeId) -> i64 {
        let links = self.links(id);
        self.height_of(links.left()) - self.height_of(links.right())
    }

    fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.links(parent).left() == Some(child) {
            Dir::Left
        } else {
            debug_assert_eq!(self.links(parent).right(), Some(child), "`child` must be a child of `parent`");
            Dir::Right
        }
    }

    // Replaces `parent`'s link to `old_child` with `new_child`, or the root link if `parent` is
    // `None`.
    //
    // `new_child`'s parent pointer is not updated.
    fn replace_child_or_set_root(&mut self, parent: Link, old_child: NodeId, new_child: Link) {
        match parent {
            Some(parent) => {
                let dir = self.which_child(parent, old_child);
                self.links_mut(parent).set_child(dir, new_child);
            }
            None => self.root = new_child,
        }
    }
}

impl<T, C, H, A> AvlTree<T, C, H, A>
where
    C: Comparator<T>,
    H: Hook<T, A>,
    A: Default,
{
    /// Inserts a value into the tree.
    ///
    /// A value equal to one already present is inserted after it.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, value: T) {
        let Some(mut parent) = self.root else {
            let id = self.nodes.alloc(Node::new(value, None));
            self.root = Some(id);
            self.update_metadata(id);
            return;
        };

        // Descend the tree, looking for a free slot.
        let dir = loop {
            let dir = if self.cmp.less(&value, &self.nodes.get(parent).value) {
                Dir::Left
            } else {
                Dir::Right
            };

            match self.links(parent).child(dir) {
                Some(child) => parent = child,
                None => break dir,
            }
        };

        let id = self.nodes.alloc(Node::new(value, Some(parent)));
        self.links_mut(parent).set_child(dir, Some(id));
        self.update_metadata(id);

        self.rebalance_to_root(Some(parent));
    }

    /// Removes one value equal to `value` and returns it, or returns `None` if there is none.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let id = self.find_id(value)?;
        Some(self.remove_at(id))
    }

    /// Removes and returns the minimum value.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = extreme_in_subtree(&self.nodes, self.root?, Dir::Left);
        Some(self.remove_at(first))
    }

    /// Removes and returns the maximum value.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = extreme_in_subtree(&self.nodes, self.root?, Dir::Right);
        Some(self.remove_at(last))
    }

    /// Returns the node holding a value equal to `value`.
    ///
    /// If several values are equal to `value`, which one is returned is unspecified.
    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T, A>> {
        self.find_id(value).map(|id| self.node_ref(id))
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find_id(value).is_some()
    }

    /// Returns the leftmost node whose value is not less than `value`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn lower_bound(&self, value: &T) -> Option<NodeRef<'_, T, A>> {
        self.lower_bound_id(value).map(|id| self.node_ref(id))
    }

    /// Returns the leftmost node whose value is strictly greater than `value`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn upper_bound(&self, value: &T) -> Option<NodeRef<'_, T, A>> {
        let mut opt_cur = self.root;
        let mut found = None;

        while let Some(cur) = opt_cur {
            if self.cmp.less(value, &self.nodes.get(cur).value) {
                found = Some(cur);
                opt_cur = self.links(cur).left();
            } else {
                opt_cur = self.links(cur).right();
            }
        }

        found.map(|id| self.node_ref(id))
    }

    fn lower_bound_id(&self, value: &T) -> Link {
        let mut opt_cur = self.root;
        let mut found = None;

        while let Some(cur) = opt_cur {
            if self.cmp.less(&self.nodes.get(cur).value, value) {
                opt_cur = self.links(cur).right();
            } else {
                found = Some(cur);
                opt_cur = self.links(cur).left();
            }
        }

        found
    }

    fn find_id(&self, value: &T) -> Link {
        self.lower_bound_id(value)
            .filter(|&id| self.cmp.equal(&self.nodes.get(id).value, value))
    }

    // There are three cases:
    //
    // 1. `node` is a leaf. It is detached from its parent.
    // 2. `node` has one child. The child takes its place.
    // 3. `node` has two children. Its successor, the leftmost node of its right subtree, has no
    //    left child, so it is detached as in case 1 or 2. The successor's value then moves into
    //    `node`, whose own value is returned.
    //
    // In every case the tree is rebalanced from the parent of the detached node up to the root.
    // In case 3 that path passes through `node`, which already holds its new value by then.
    fn remove_at(&mut self, node: NodeId) -> T {
        let links = self.links(node);

        let (removed, rebalance_from) = match (links.left(), links.right()) {
            (Some(_), Some(right)) => {
                let successor = extreme_in_subtree(&self.nodes, right, Dir::Left);
                let parent = self.unlink(successor);
                let successor = self.nodes.take(successor);

                log::debug!("removing node with two children, relocating its successor");
                let removed = mem::replace(&mut self.nodes.get_mut(node).value, successor.value);
                (removed, parent)
            }

            _ => {
                let parent = self.unlink(node);
                (self.nodes.take(node).value, parent)
            }
        };

        self.rebalance_to_root(rebalance_from);
        removed
    }

    // Splices `node`, which must have at most one child, out of the tree. Its child (if any) takes
    // its place.
    //
    // Returns the parent of the spliced-out node. `node` itself is left in the arena.
    fn unlink(&mut self, node: NodeId) -> Link {
        let links = self.links(node);
        assert!(
            links.left().is_none() || links.right().is_none(),
            "only nodes with at most one child can be unlinked"
        );

        let parent = links.parent();
        let child = links.left().or(links.right());

        self.replace_child_or_set_root(parent, node, child);
        if let Some(child) = child {
            self.links_mut(child).set_parent(parent);
        }

        parent
    }

    // Recomputes the height and weight of `node` from its children, then runs the hooks on it.
    //
    // The children's metadata must be up to date.
    fn update_metadata(&mut self, node: NodeId) {
        let links = self.links(node);
        let (left, right) = (links.left(), links.right());

        let height = self.height_of(left).max(self.height_of(right)) + 1;
        let height = u32::try_from(height).expect("height of a non-empty subtree is non-negative");
        let weight = self.weight(left) + self.weight(right) + 1;

        let node_mut = self.nodes.get_mut(node);
        node_mut.links.set_metadata(height, weight);

        // The augmentation is moved out while the hooks run so that they can read the rest of the
        // tree at the same time.
        let mut aug = mem::take(&mut node_mut.aug);
        self.hooks.update(&mut HookContext::new(&self.nodes, node, &mut aug));
        self.nodes.get_mut(node).aug = aug;
    }

    fn rotate_left(&mut self, node: NodeId) {
        self.rotate(node, Dir::Left);
    }

    fn rotate_right(&mut self, node: NodeId) {
        self.rotate(node, Dir::Right);
    }

    // Rotates `node` down in direction `dir`, promoting its `!dir` child (the pivot) into its
    // place. The pivot's `dir` subtree moves across to become `node`'s `!dir` subtree.
    //
    // The in-order sequence is unchanged. Metadata of `node` and then of the pivot is recomputed;
    // ancestors are left stale.
    fn rotate(&mut self, node: NodeId, dir: Dir) {
        let Some(pivot) = self.links(node).child(!dir) else {
            panic!("cannot rotate {dir:?}: node has no {:?} child", !dir);
        };

        log::trace!("rotating node {} {dir:?}", node.to_index());

        let parent = self.links(node).parent();
        let across = self.links(pivot).child(dir);

        self.replace_child_or_set_root(parent, node, Some(pivot));
        self.links_mut(pivot).set_parent(parent);

        self.links_mut(node).set_child(!dir, across);
        if let Some(across) = across {
            self.links_mut(across).set_parent(Some(node));
        }

        self.links_mut(pivot).set_child(dir, Some(node));
        self.links_mut(node).set_parent(Some(pivot));

        self.update_metadata(node);
        self.update_metadata(pivot);
    }

    // Refreshes the metadata of `node` and, if it is out of balance, restores the balance with a
    // single or double rotation.
    fn rebalance(&mut self, node: NodeId) {
        self.update_metadata(node);

        let bf = self.balance_factor(node);
        if bf > 1 {
            let left = self.links(node).left().expect("left-heavy node has a left child");
            if self.balance_factor(left) < 0 {
                log::trace!("left-right case at node {}", node.to_index());
                self.rotate_left(left);
            }
            self.rotate_right(node);
        } else if bf < -1 {
            let right = self.links(node).right().expect("right-heavy node has a right child");
            if self.balance_factor(right) > 0 {
                log::trace!("right-left case at node {}", node.to_index());
                self.rotate_right(right);
            }
            self.rotate_left(node);
        }
    }

    // Walks from `start` up to the root, rebalancing each node on the way.
    //
    // After a rotation `node`'s parent is the promoted pivot, so the pivot is revisited before the
    // walk continues above it.
    fn rebalance_to_root(&mut self, start: Link) {
        let mut opt_node = start;

        while let Some(node) = opt_node {
            self.rebalance(node);
            opt_node = self.links(node).parent();
        }
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.nodes.len(), 0, "empty tree still owns nodes");
            return;
        };

        assert_eq!(self.links(root).parent(), None, "root has a parent");
        self.assert_invariants_at(root);
        assert_eq!(self.len(), self.nodes.len(), "root weight disagrees with node count");

        // Order holds globally, not just between neighbors of a node.
        let mut values = self.iter();
        if let Some(mut prev) = values.next() {
            for next in values {
                assert!(!self.cmp.less(next, prev), "in-order traversal is not sorted");
                prev = next;
            }
        }
    }

    fn assert_invariants_at(&self, node: NodeId) {
        let links = self.links(node);
        let value = &self.nodes.get(node).value;

        for dir in [Dir::Left, Dir::Right] {
            if let Some(child) = links.child(dir) {
                assert_eq!(self.links(child).parent(), Some(node), "child's parent pointer is wrong");

                let child_value = &self.nodes.get(child).value;
                match dir {
                    Dir::Left => assert!(!self.cmp.less(value, child_value), "left child is greater"),
                    Dir::Right => assert!(!self.cmp.less(child_value, value), "right child is less"),
                }

                self.assert_invariants_at(child);
            }
        }

        let (left, right) = (links.left(), links.right());
        let height = self.height_of(left).max(self.height_of(right)) + 1;
        assert_eq!(i64::from(links.height()), height, "stale height");
        assert_eq!(links.weight(), self.weight(left) + self.weight(right) + 1, "stale weight");

        let bf = self.balance_factor(node);
        assert!((-1..=1).contains(&bf), "balance factor {bf} out of range");
    }
}

impl<T, C, H, A> Extend<T> for AvlTree<T, C, H, A>
where
    C: Comparator<T>,
    H: Hook<T, A>,
    A: Default,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, C, H, A> IntoIterator for &'a AvlTree<T, C, H, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C, H, A> fmt::Debug for AvlTree<T, C, H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn insert_find_all(keys: &[u32]) {
        let mut tree = AvlTree::new();

        for &key in keys {
            tree.insert(key);
            tree.assert_invariants();
        }

        for key in keys {
            let node = tree.find(key).expect("item not found");
            assert_eq!(node.value(), key);
        }
    }

    #[test]
    fn zero_elems_find() {
        insert_find_all(&[]);
    }

    #[test]
    fn single_elem_find() {
        insert_find_all(&[0]);
    }

    #[test]
    fn two_elems_find() {
        insert_find_all(&[0, 1]);
        insert_find_all(&[1, 0]);
    }

    #[test]
    fn three_elems_find() {
        insert_find_all(&[0, 1, 2]);
        insert_find_all(&[0, 2, 1]);
        insert_find_all(&[1, 0, 2]);
        insert_find_all(&[1, 2, 0]);
        insert_find_all(&[2, 0, 1]);
        insert_find_all(&[2, 1, 0]);
    }

    fn insert_remove_all(keys: &[u32]) {
        let mut tree = AvlTree::new();

        for &key in keys {
            tree.insert(key);
            tree.assert_invariants();
        }

        for key in keys {
            assert_eq!(tree.remove(key), Some(*key));
            tree.assert_invariants();
        }

        assert!(tree.is_empty());

        for &key in keys {
            tree.insert(key);
            tree.assert_invariants();
        }

        for key in keys.iter().rev() {
            assert_eq!(tree.remove(key), Some(*key));
            tree.assert_invariants();
        }

        assert!(tree.is_empty());
    }

    #[test]
    fn remove_one() {
        insert_remove_all(&[0]);
    }

    #[test]
    fn remove_two() {
        insert_remove_all(&[0, 1]);
        insert_remove_all(&[1, 0]);
    }

    #[test]
    fn remove_three() {
        insert_remove_all(&[0, 1, 2]);
        insert_remove_all(&[0, 2, 1]);
        insert_remove_all(&[1, 0, 2]);
        insert_remove_all(&[1, 2, 0]);
        insert_remove_all(&[2, 0, 1]);
        insert_remove_all(&[2, 1, 0]);
    }

    #[test]
    fn rotations_keep_in_order_sequence() {
        let mut tree = AvlTree::new();
        tree.extend([1, 2, 3]);

        let root = tree.root.unwrap();
        assert_eq!(tree.nodes.get(root).value, 2);

        tree.rotate_right(root);
        assert_eq!(tree.items(), [1, 2, 3]);
        assert_eq!(tree.root().map(|r| *r.value()), Some(1));

        let root = tree.root.unwrap();
        tree.rotate_left(root);
        assert_eq!(tree.items(), [1, 2, 3]);
        assert_eq!(tree.root().map(|r| *r.value()), Some(2));
        tree.assert_invariants();
    }

    #[test]
    fn equal_values_survive_rotation() {
        let mut tree = AvlTree::new();
        tree.extend([2, 2, 2]);

        // The first 2 was rotated down into the left subtree of the second.
        let root = tree.root.unwrap();
        assert!(tree.links(root).left().is_some());
        tree.assert_invariants();

        tree.extend([1, 2, 3, 2]);
        tree.assert_invariants();
        assert_eq!(tree.items(), [1, 2, 2, 2, 2, 2, 3]);

        while tree.remove(&2).is_some() {
            tree.assert_invariants();
        }
        assert_eq!(tree.items(), [1, 3]);
    }

    #[test]
    #[should_panic(expected = "cannot rotate Left")]
    fn rotation_without_pivot_panics() {
        let mut tree = AvlTree::new();
        tree.insert(1);

        let root = tree.root.unwrap();
        tree.rotate_left(root);
    }
}
