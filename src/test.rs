use crate::NodeRef;

/// The tree used throughout the tests:
///
/// ```text
/// 3
///   11
///   42
///     110
///   24
///   35
/// ```
pub fn example_tree() -> NodeRef<&'static str> {
    let tree = NodeRef::new("3");
    tree.add_child(NodeRef::new("11")).unwrap();

    let sub_tree = NodeRef::new("42");
    sub_tree.add_child(NodeRef::new("110")).unwrap();
    tree.add_child(sub_tree).unwrap();

    tree.add_children([NodeRef::new("24"), NodeRef::new("35")])
        .unwrap();
    tree
}

/// A single path `0 -> 1 -> ... -> depth - 1`
pub fn deep_chain(depth: usize) -> NodeRef<usize> {
    let root = NodeRef::new(0);
    let mut tail = root.clone();
    for value in 1..depth {
        let next = NodeRef::new(value);
        tail.add_child(next.clone()).unwrap();
        tail = next;
    }
    root
}

/// The node at the bottom of a [`deep_chain`]
pub fn last_in_chain(root: &NodeRef<usize>) -> NodeRef<usize> {
    let mut node = root.clone();
    while let Some(child) = node.first_child() {
        node = child;
    }
    node
}
