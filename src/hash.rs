use std::hash::{Hash, Hasher};

use xxhash_rust::xxh64::Xxh64;

use crate::{iterator::NodeRefIter, NodeRef};

/// Hashes the same data [`PartialEq`] compares: each node's child count and
/// value in pre-order, which together fix the shape of the tree. Structurally
/// equal trees hash equal. A node met again below itself contributes a marker
/// and is not descended into.
impl<V> Hash for NodeRef<V>
where
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in NodeRefIter::new(self.clone()) {
            node.is_repeat().hash(state);
            if !node.is_repeat() {
                let inner = node.node();
                inner.num_children().hash(state);
                inner.value().hash(state);
            }
        }
    }
}

impl<V> NodeRef<V>
where
    V: Hash,
{
    /// XXH64 digest of the subtree rooted at this node
    pub fn xxhash(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        self.hash(&mut hasher);
        hasher.finish()
    }
}
