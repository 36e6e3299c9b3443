use std::{
    collections::{HashSet, VecDeque},
    iter::FusedIterator,
    ops::Deref,
};

use crate::NodeRef;

/// Iterator over the direct children of a node, in insertion order.
///
/// Created by [`NodeRef::children`]. It owns a snapshot of the child handles,
/// so it yields every child present at creation exactly once even if the
/// parent is modified meanwhile.
#[derive(Debug)]
pub struct Children<V> {
    inner: std::vec::IntoIter<NodeRef<V>>,
}

impl<V> Children<V> {
    pub(crate) fn new(children: Vec<NodeRef<V>>) -> Self {
        Self {
            inner: children.into_iter(),
        }
    }
}

impl<V> Clone for Children<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> Iterator for Children<V> {
    type Item = NodeRef<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Children<V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Children<V> {}

impl<V> FusedIterator for Children<V> {}

/// The chain of nodes from a walk's start node down to the node being
/// visited, each with a payload. Membership is checked by identity.
pub(crate) struct AncestorPath<V, T = ()> {
    entries: Vec<(NodeRef<V>, T)>,
    members: HashSet<*const ()>,
}

impl<V, T> AncestorPath<V, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Keep only the first `depth` entries
    pub fn truncate(&mut self, depth: usize) {
        while self.entries.len() > depth {
            if let Some((node, _)) = self.entries.pop() {
                self.members.remove(&node.addr());
            }
        }
    }

    pub fn contains(&self, node: &NodeRef<V>) -> bool {
        self.members.contains(&node.addr())
    }

    /// Payload of `node` if it is on the path
    pub fn get(&self, node: &NodeRef<V>) -> Option<&T> {
        if !self.contains(node) {
            return None;
        }
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| entry.ptr_eq(node))
            .map(|(_, payload)| payload)
    }

    pub fn push(&mut self, node: NodeRef<V>, payload: T) {
        self.members.insert(node.addr());
        self.entries.push((node, payload));
    }
}

/// A node yielded by the pre-order walk, with its depth below the start node
pub(crate) struct IterNode<V> {
    depth: usize,
    node: NodeRef<V>,
    repeat: bool,
}

impl<V> IterNode<V> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True if the node is its own ancestor on this walk. Its children are
    /// not visited again.
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }
}

impl<V> Deref for IterNode<V> {
    type Target = NodeRef<V>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Depth-first pre-order walk used by the renderers and the structural hash.
///
/// A node found below itself is yielded once more, flagged as a repeat, and
/// its children are skipped so the walk always ends.
pub(crate) struct NodeRefIter<V> {
    stack: VecDeque<(usize, NodeRef<V>)>,
    path: AncestorPath<V>,
}

impl<V> NodeRefIter<V> {
    pub fn new(node: NodeRef<V>) -> Self {
        Self {
            stack: VecDeque::from([(0, node)]),
            path: AncestorPath::new(),
        }
    }
}

impl<V> Iterator for NodeRefIter<V> {
    type Item = IterNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop_front()?;

        self.path.truncate(depth);
        let repeat = self.path.contains(&node);

        if !repeat {
            // Push children in reverse so the first child is visited next
            node.node()
                .children()
                .iter()
                .rev()
                .for_each(|child| self.stack.push_front((depth + 1, child.clone())));

            self.path.push(node.clone(), ());
        }

        Some(IterNode {
            depth,
            node,
            repeat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AncestorPath, NodeRefIter};
    use crate::{test::example_tree, NodeRef};

    #[test]
    fn pre_order_with_depth() {
        let tree = example_tree();
        let visited: Vec<_> = NodeRefIter::new(tree)
            .map(|node| (node.depth(), node.value().unwrap_or_default()))
            .collect();

        assert_eq!(
            visited,
            vec![(0, "3"), (1, "11"), (1, "42"), (2, "110"), (1, "24"), (1, "35")]
        );
    }

    #[test]
    fn children_from_both_ends() {
        let tree = example_tree();
        let mut children = tree.children();

        assert_eq!(children.len(), 4);
        assert_eq!(children.next_back().and_then(|c| c.value()), Some("35"));
        assert_eq!(children.next().and_then(|c| c.value()), Some("11"));

        let rest: Vec<_> = children.clone().filter_map(|c| c.value()).collect();
        assert_eq!(rest, vec!["42", "24"]);
        assert_eq!(children.count(), 2);
    }

    #[test]
    fn walk_flags_nodes_below_themselves() {
        let a = NodeRef::new("a");
        let b = NodeRef::new("b");
        let c = NodeRef::new("c");
        a.add_child(b.clone()).unwrap();
        b.add_child(c.clone()).unwrap();
        c.add_child(a.clone()).unwrap();

        let visited: Vec<_> = NodeRefIter::new(a.clone())
            .map(|node| (node.depth(), node.value().unwrap_or_default(), node.is_repeat()))
            .collect();
        assert_eq!(
            visited,
            vec![(0, "a", false), (1, "b", false), (2, "c", false), (3, "a", true)]
        );

        c.remove_child(0).unwrap();
    }

    #[test]
    fn shared_node_is_not_a_repeat() {
        let shared = NodeRef::new("s");
        let root = NodeRef::from_parts(
            Some("root"),
            [
                NodeRef::from_parts(Some("l"), [shared.clone()]).unwrap(),
                NodeRef::from_parts(Some("r"), [shared.clone()]).unwrap(),
            ],
        )
        .unwrap();

        assert!(NodeRefIter::new(root).all(|node| !node.is_repeat()));
    }

    #[test]
    fn ancestor_path_payloads() {
        let a = NodeRef::new(1);
        let b = NodeRef::new(2);
        let mut path: AncestorPath<i32, &str> = AncestorPath::new();
        path.push(a.clone(), "first");
        path.push(b.clone(), "second");

        assert_eq!(path.get(&b), Some(&"second"));
        path.truncate(1);
        assert!(!path.contains(&b));
        assert_eq!(path.get(&a), Some(&"first"));
        assert_eq!(path.get(&NodeRef::new(1)), None);
    }
}
