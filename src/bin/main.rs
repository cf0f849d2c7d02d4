use augmented_avl::{hook_fn, AvlTree, HookContext, Natural};

// Keeps (min, max) of each subtree.
fn span(node: &mut HookContext<'_, u32, Option<(u32, u32)>>) {
    let value = *node.value();
    let min = node.left().and_then(|l| *l.aug()).map_or(value, |(min, _)| min);
    let max = node.right().and_then(|r| *r.aug()).map_or(value, |(_, max)| max);
    node.set_aug(Some((min, max)));
}

fn main() {
    let mut tree: AvlTree<u32, Natural, _, Option<(u32, u32)>> =
        AvlTree::with_hooks(Natural, hook_fn(span));

    for value in [2, 0, 3, 4, 5, 1, 6] {
        tree.insert(value);
        tree.assert_invariants();
        println!("{:?}", tree.items());
    }

    let root = tree.root().expect("tree is not empty");
    println!(
        "len={} height={} span={:?}",
        tree.len(),
        tree.height(),
        root.aug()
    );

    for rank in 1..=tree.len() {
        let value = tree.find_by_rank(rank).expect("rank is in range");
        println!("rank {rank}: {value}");
    }

    let zero = tree.pop_first();
    assert_eq!(zero, Some(0));
    tree.assert_invariants();

    println!("{}", tree.to_graphviz());
}
