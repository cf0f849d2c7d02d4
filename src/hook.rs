//! Augmentation hooks.
//!
//! A hook maintains a user-defined field (the node's "aug", of type `A`) alongside the height and
//! weight the tree already caches. Each time the tree recomputes a node's metadata it runs every
//! registered hook on that node, in registration order. Updates happen bottom-up, so a hook can
//! rely on the augmentation of both children being current.
//!
//! ```
//! use augmented_avl::{hook_fn, AvlTree, HookContext, Natural};
//!
//! // Keeps the sum of each subtree in the node's aug.
//! let sum = hook_fn(|node: &mut HookContext<'_, u32, u64>| {
//!     let left = node.left().map_or(0, |l| *l.aug());
//!     let right = node.right().map_or(0, |r| *r.aug());
//!     node.set_aug(left + right + u64::from(*node.value()));
//! });
//!
//! let mut tree: AvlTree<u32, Natural, _, u64> = AvlTree::with_hooks(Natural, sum);
//! tree.extend([4, 8, 15, 16, 23, 42]);
//! assert_eq!(tree.root().map(|root| *root.aug()), Some(108));
//! ```

use crate::{
    arena::Arena,
    node::{Node, NodeId, NodeRef},
};

/// Observer of node metadata updates.
///
/// Hooks see the tree read-only and may only write the node's own augmentation.
pub trait Hook<T, A> {
    fn update(&self, node: &mut HookContext<'_, T, A>);
}

/// The node a [`Hook`] is being run on.
///
/// The node's height and weight are already recomputed. While hooks run, the node's augmentation
/// lives in the context, so read and write it through [`aug`](Self::aug) and
/// [`aug_mut`](Self::aug_mut) rather than through a [`NodeRef`] to this node.
pub struct HookContext<'a, T, A> {
    nodes: &'a Arena<Node<T, A>>,
    id: NodeId,
    aug: &'a mut A,
}

impl<'a, T, A> HookContext<'a, T, A> {
    pub(crate) fn new(nodes: &'a Arena<Node<T, A>>, id: NodeId, aug: &'a mut A) -> Self {
        HookContext { nodes, id, aug }
    }

    /// Returns the node's value.
    pub fn value(&self) -> &'a T {
        &self.nodes.get(self.id).value
    }

    /// Returns the node's freshly computed height.
    pub fn height(&self) -> usize {
        self.nodes.get(self.id).links.height() as usize
    }

    /// Returns the node's freshly computed weight.
    pub fn weight(&self) -> usize {
        self.nodes.get(self.id).links.weight()
    }

    /// Returns the left child, whose augmentation is already current.
    pub fn left(&self) -> Option<NodeRef<'a, T, A>> {
        let left = self.nodes.get(self.id).links.left()?;
        Some(NodeRef::new(self.nodes, left))
    }

    /// Returns the right child, whose augmentation is already current.
    pub fn right(&self) -> Option<NodeRef<'a, T, A>> {
        let right = self.nodes.get(self.id).links.right()?;
        Some(NodeRef::new(self.nodes, right))
    }

    /// Returns the node's augmentation as written so far.
    pub fn aug(&self) -> &A {
        &*self.aug
    }

    /// Returns the node's augmentation for in-place updates.
    pub fn aug_mut(&mut self) -> &mut A {
        &mut *self.aug
    }

    /// Replaces the node's augmentation.
    pub fn set_aug(&mut self, aug: A) {
        *self.aug = aug;
    }
}

/// A [`Hook`] backed by a closure. Build one with [`hook_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnHook<F>(F);

/// Wraps a closure as a [`Hook`].
pub fn hook_fn<T, A, F>(f: F) -> FnHook<F>
where
    F: Fn(&mut HookContext<'_, T, A>),
{
    FnHook(f)
}

impl<T, A, F> Hook<T, A> for FnHook<F>
where
    F: Fn(&mut HookContext<'_, T, A>),
{
    #[inline]
    fn update(&self, node: &mut HookContext<'_, T, A>) {
        (self.0)(node)
    }
}

/// No hooks.
impl<T, A> Hook<T, A> for () {
    #[inline]
    fn update(&self, _node: &mut HookContext<'_, T, A>) {}
}

impl<T, A, H> Hook<T, A> for Box<H>
where
    H: Hook<T, A> + ?Sized,
{
    #[inline]
    fn update(&self, node: &mut HookContext<'_, T, A>) {
        (**self).update(node)
    }
}

/// Runs each hook in order.
impl<T, A, H> Hook<T, A> for Vec<H>
where
    H: Hook<T, A>,
{
    fn update(&self, node: &mut HookContext<'_, T, A>) {
        for hook in self {
            hook.update(node);
        }
    }
}

macro_rules! impl_hook_for_tuple {
    ($($hook:ident)+) => {
        /// Runs each hook in order, left to right.
        impl<T, A, $($hook),+> Hook<T, A> for ($($hook,)+)
        where
            $($hook: Hook<T, A>,)+
        {
            #[allow(non_snake_case)]
            fn update(&self, node: &mut HookContext<'_, T, A>) {
                let ($($hook,)+) = self;
                $($hook.update(node);)+
            }
        }
    };
}

impl_hook_for_tuple!(H1);
impl_hook_for_tuple!(H1 H2);
impl_hook_for_tuple!(H1 H2 H3);
impl_hook_for_tuple!(H1 H2 H3 H4);
impl_hook_for_tuple!(H1 H2 H3 H4 H5);
impl_hook_for_tuple!(H1 H2 H3 H4 H5 H6);
impl_hook_for_tuple!(H1 H2 H3 H4 H5 H6 H7);
impl_hook_for_tuple!(H1 H2 H3 H4 H5 H6 H7 H8);
