use core::iter::FusedIterator;

use crate::{
    arena::Arena,
    node::{Dir, Link, Node, NodeId, NodeRef},
};

enum CameFrom {
    Parent,
    LeftChild,
    Here,
    RightChild,
}

/// In-order iterator over the nodes of an [`AvlTree`](crate::AvlTree).
///
/// Created by [`AvlTree::nodes`](crate::AvlTree::nodes).
pub struct Nodes<'tree, T, A> {
    nodes: &'tree Arena<Node<T, A>>,

    front_cur: Link,
    front_from: CameFrom,

    len: usize,
}

impl<'tree, T, A> Nodes<'tree, T, A> {
    pub(crate) fn new(nodes: &'tree Arena<Node<T, A>>, root: Link, len: usize) -> Self {
        Nodes {
            nodes,

            front_cur: root,
            front_from: CameFrom::Parent,
            len,
        }
    }
}

impl<'tree, T, A> Iterator for Nodes<'tree, T, A> {
    type Item = NodeRef<'tree, T, A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let mut cur = self.front_cur?;

        loop {
            let links = &self.nodes.get(cur).links;

            match self.front_from {
                CameFrom::Parent => {
                    // Upon entering a new subtree, find the minimum element.
                    while let Some(left) = self.nodes.get(cur).links.left() {
                        cur = left;
                    }

                    // Once the minimum is found, its (empty) left subtree has been exhausted.
                    self.front_from = CameFrom::LeftChild;
                }

                CameFrom::LeftChild => {
                    // The left subtree has been exhausted, so this node is up next. Save off the
                    // iterator state and return it.
                    self.front_cur = Some(cur);
                    self.front_from = CameFrom::Here;
                    self.len -= 1;

                    return Some(NodeRef::new(self.nodes, cur));
                }

                CameFrom::Here => {
                    // The current node was just yielded.
                    if let Some(right) = links.right() {
                        // If the right subtree is not empty, go there.
                        self.front_from = CameFrom::Parent;

                        cur = right;
                    } else if let Some(parent) = links.parent() {
                        // Otherwise, ascend one level.
                        self.front_from = match which_child(self.nodes, parent, cur) {
                            Dir::Left => CameFrom::LeftChild,
                            Dir::Right => CameFrom::RightChild,
                        };

                        cur = parent;
                    } else {
                        unreachable!("the maximum was yielded but `len` is not zero")
                    }
                }

                CameFrom::RightChild => {
                    // Ascend until we find the successor element.
                    while let Some(parent) = self.nodes.get(cur).links.parent() {
                        match which_child(self.nodes, parent, cur) {
                            Dir::Left => {
                                cur = parent;
                                break;
                            }
                            Dir::Right => cur = parent,
                        }
                    }

                    self.front_cur = Some(cur);
                    self.front_from = CameFrom::LeftChild;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, A> ExactSizeIterator for Nodes<'_, T, A> {}

impl<T, A> FusedIterator for Nodes<'_, T, A> {}

fn which_child<T, A>(nodes: &Arena<Node<T, A>>, parent: NodeId, child: NodeId) -> Dir {
    if nodes.get(parent).links.left() == Some(child) {
        Dir::Left
    } else {
        Dir::Right
    }
}

/// In-order iterator over the values of an [`AvlTree`](crate::AvlTree).
///
/// Created by [`AvlTree::iter`](crate::AvlTree::iter). Calling `iter` again starts a fresh pass.
pub struct Iter<'tree, T, A> {
    nodes: Nodes<'tree, T, A>,
}

impl<'tree, T, A> Iter<'tree, T, A> {
    pub(crate) fn new(nodes: Nodes<'tree, T, A>) -> Self {
        Iter { nodes }
    }
}

impl<'tree, T, A> Iterator for Iter<'tree, T, A> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T, A> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A> FusedIterator for Iter<'_, T, A> {}
