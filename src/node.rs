use core::{fmt, mem, num::NonZeroU32, ops::Not, ptr};

use crate::arena::Arena;

/// Index of a node slot in the tree's arena.
///
/// Stored off by one so that `Option<NodeId>` is the same size as `NodeId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZeroU32);

impl NodeId {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`NodeId::from_index()` - `index` > `NodeId::MAX`!");
        let raw = u32::try_from(index + 1).expect("bounded by `NodeId::MAX`");
        NodeId(NonZeroU32::new(raw).expect("`index + 1` is never zero"))
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Structural links and cached subtree metadata of a node.
#[derive(Clone, Debug)]
pub(crate) struct Links {
    parent: Link,
    children: [Link; 2],
    // Longest path down to a leaf. Leaves have height 0.
    height: u32,
    // Number of nodes in the subtree, this one included.
    weight: usize,
}

impl Links {
    pub(crate) const fn new(parent: Link) -> Self {
        Links {
            parent,
            children: [None; 2],
            height: 0,
            weight: 1,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub(crate) fn weight(&self) -> usize {
        self.weight
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) -> Link {
        mem::replace(&mut self.parent, parent)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) -> Link {
        mem::replace(&mut self.children[dir as usize], child)
    }

    #[inline]
    pub(crate) fn set_metadata(&mut self, height: u32, weight: usize) {
        self.height = height;
        self.weight = weight;
    }
}

#[derive(Clone)]
pub(crate) struct Node<T, A> {
    pub(crate) links: Links,
    pub(crate) value: T,
    pub(crate) aug: A,
}

impl<T, A: Default> Node<T, A> {
    pub(crate) fn new(value: T, parent: Link) -> Self {
        Node {
            links: Links::new(parent),
            value,
            aug: A::default(),
        }
    }
}

/// A borrowed view of one node of an [`AvlTree`](crate::AvlTree).
///
/// A `NodeRef` borrows the tree it came from, so it cannot outlive the next mutation of that tree.
pub struct NodeRef<'a, T, A = ()> {
    nodes: &'a Arena<Node<T, A>>,
    id: NodeId,
}

impl<'a, T, A> NodeRef<'a, T, A> {
    pub(crate) fn new(nodes: &'a Arena<Node<T, A>>, id: NodeId) -> Self {
        NodeRef { nodes, id }
    }

    #[inline]
    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    fn node(&self) -> &'a Node<T, A> {
        self.nodes.get(self.id)
    }

    #[inline]
    fn links(&self) -> &'a Links {
        &self.node().links
    }

    fn at(&self, id: NodeId) -> Self {
        NodeRef::new(self.nodes, id)
    }

    /// Returns the value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Returns the user augmentation maintained by the tree's hooks.
    pub fn aug(&self) -> &'a A {
        &self.node().aug
    }

    /// Returns the height of the subtree rooted here. Leaves have height 0.
    pub fn height(&self) -> usize {
        self.links().height() as usize
    }

    /// Returns the number of nodes in the subtree rooted here, this one included.
    pub fn weight(&self) -> usize {
        self.links().weight()
    }

    /// Returns the parent node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.links().parent().map(|id| self.at(id))
    }

    /// Returns the left child.
    pub fn left(&self) -> Option<Self> {
        self.links().left().map(|id| self.at(id))
    }

    /// Returns the right child.
    pub fn right(&self) -> Option<Self> {
        self.links().right().map(|id| self.at(id))
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.links().is_leaf()
    }

    /// Returns `true` if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.links().parent().is_none()
    }

    /// Returns the node holding the next value in ascending order.
    ///
    /// This is _O(log(n))_ in the worst case and amortized _O(1)_ over a full traversal.
    pub fn successor(&self) -> Option<Self> {
        self.neighbor(Dir::Right)
    }

    /// Returns the node holding the previous value in ascending order.
    ///
    /// This is _O(log(n))_ in the worst case and amortized _O(1)_ over a full traversal.
    pub fn predecessor(&self) -> Option<Self> {
        self.neighbor(Dir::Left)
    }

    // Steps one position in direction `dir` of the in-order sequence.
    fn neighbor(&self, dir: Dir) -> Option<Self> {
        if let Some(child) = self.links().child(dir) {
            return Some(self.at(extreme_in_subtree(self.nodes, child, !dir)));
        }

        // Climb while we are the `dir` child; the first ancestor reached from its `!dir` side is
        // the neighbor.
        let mut cur = self.id;
        while let Some(parent) = self.nodes.get(cur).links.parent() {
            if self.nodes.get(parent).links.child(!dir) == Some(cur) {
                return Some(self.at(parent));
            }
            cur = parent;
        }

        None
    }
}

/// Descends from `root` along `dir` children until there are none left.
pub(crate) fn extreme_in_subtree<T, A>(nodes: &Arena<Node<T, A>>, root: NodeId, dir: Dir) -> NodeId {
    let mut cur = root;

    while let Some(next) = nodes.get(cur).links.child(dir) {
        cur = next;
    }

    cur
}

impl<T, A> Clone for NodeRef<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for NodeRef<'_, T, A> {}

impl<T, A> PartialEq for NodeRef<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<T, A> Eq for NodeRef<'_, T, A> {}

impl<T: fmt::Debug, A: fmt::Debug> fmt::Debug for NodeRef<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("height", &self.height())
            .field("weight", &self.weight())
            .field("aug", self.aug())
            .finish()
    }
}
