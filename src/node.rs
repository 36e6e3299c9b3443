use crate::{NodeRef, TreeError, TreeResult};

/// The record behind a [`NodeRef`] handle: an optional value and the ordered
/// list of child handles.
pub(crate) struct Node<V> {
    value: Option<V>,
    children: Vec<NodeRef<V>>,
}

impl<V> Node<V> {
    pub(crate) fn new(value: Option<V>) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Replace the value, returning the previous one
    pub(crate) fn replace_value(&mut self, value: Option<V>) -> Option<V> {
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn children(&self) -> &[NodeRef<V>] {
        &self.children
    }

    /// Return the number of child nodes for this node
    pub(crate) fn num_children(&self) -> usize {
        self.children.len()
    }

    /// True if `node` is one of the direct children, compared by identity
    pub(crate) fn has_child(&self, node: &NodeRef<V>) -> bool {
        self.children.iter().any(|child| child.ptr_eq(node))
    }

    pub(crate) fn get_child(&self, index: usize) -> TreeResult<&NodeRef<V>> {
        self.children.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    /// Add a new child node to the end of the child list
    pub(crate) fn push_child(&mut self, node: NodeRef<V>) {
        self.children.push(node);
    }

    /// Insert a child node at an existing index, shifting later children right.
    /// Only occupied positions are accepted, so `index == len` is an error.
    pub(crate) fn insert_child(&mut self, index: usize, node: NodeRef<V>) -> TreeResult<()> {
        self.check_index(index)?;
        self.children.insert(index, node);
        Ok(())
    }

    /// Delete the child node at the specified index and hand it back
    pub(crate) fn remove_child_index(&mut self, index: usize) -> TreeResult<NodeRef<V>> {
        self.check_index(index)?;
        Ok(self.children.remove(index))
    }

    fn check_index(&self, index: usize) -> TreeResult<()> {
        if index < self.children.len() {
            Ok(())
        } else {
            Err(TreeError::IndexOutOfRange {
                index,
                len: self.children.len(),
            })
        }
    }
}

/// Frees the subtree with an explicit stack, so long chains of nodes that
/// are only held by their parent do not exhaust the call stack.
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(child) = stack.pop() {
            // Children still held elsewhere only lose a reference
            if let Some(mut node) = child.into_node() {
                stack.append(&mut node.children);
            }
        }
    }
}
