use std::{collections::VecDeque, fmt};

use crate::{node::NodeId, AvlTree};

impl<T: fmt::Display, C, H, A> AvlTree<T, C, H, A> {
    /// Writes the tree in Graphviz `dot` syntax.
    ///
    /// Each level of the tree is laid out on its own row. Nodes are labelled with their value,
    /// height and weight; missing children are drawn as points.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item {
            Node(NodeId),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{\n"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let Some(item) = queue.pop_front() else {
                    break;
                };

                let node = match item {
                    Item::Node(node) => node,
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                // Values may repeat, so nodes are named by slot.
                let slot = node.to_index();
                let value = &self.nodes.get(node).value;
                let (height, weight) = (self.links(node).height(), self.links(node).weight());
                write!(
                    w,
                    "\"graph{name}-{slot}\" [label=\"{value} (h={height}, w={weight})\"]; "
                )?;

                // Leaves get no point children, which keeps the picture readable.
                if self.links(node).is_leaf() {
                    continue;
                }

                for child in [self.links(node).left(), self.links(node).right()] {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                links,
                                "\"graph{name}-{slot}\" -> \"graph{name}-{}\";",
                                child.to_index()
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                links,
                                "\"graph{name}-{slot}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }

    /// Returns the tree in Graphviz `dot` syntax. See [`dotgraph`](Self::dotgraph).
    pub fn to_graphviz(&self) -> String {
        let mut out = String::new();
        self.dotgraph("tree", &mut out)
            .expect("writing to a `String` cannot fail");
        out
    }
}
