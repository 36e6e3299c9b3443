use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use tracing::{debug, error};

use crate::{
    iterator::{AncestorPath, Children},
    node::Node,
    TreeError, TreeResult,
};

/// Shared handle to a tree node.
///
/// Cloning a `NodeRef` clones the handle, not the node: every clone aliases the
/// same live record, so mutating a child obtained from [`NodeRef::child`] or
/// [`NodeRef::children`] mutates the tree it belongs to. The same node may be
/// linked under several parents, but only once under each. Use [`NodeRef::deep_clone`] for an
/// independent copy.
///
/// The root node is the tree; there is no separate tree type.
pub struct NodeRef<V> {
    node_ref: Rc<RefCell<Node<V>>>,
}

impl<V> Clone for NodeRef<V> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}

impl<V> Default for NodeRef<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> std::fmt::Debug for NodeRef<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        struct ChildValues<'a, V>(&'a [NodeRef<V>]);

        impl<V: std::fmt::Debug> std::fmt::Debug for ChildValues<'_, V> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut list = f.debug_list();
                for child in self.0 {
                    list.entry(&child.node().value());
                }
                list.finish()
            }
        }

        let node = self.node();
        f.debug_struct("Node")
            .field("value", &node.value())
            .field("children", &ChildValues(node.children()))
            .finish()
    }
}

impl<V> NodeRef<V> {
    /// Create a leaf node holding `value`
    pub fn new(value: V) -> Self {
        Self::from_node(Node::new(Some(value)))
    }

    /// Create a leaf node with no value
    pub fn empty() -> Self {
        Self::from_node(Node::new(None))
    }

    /// Create a node and attach `children` in order through [`NodeRef::add_child`].
    pub fn from_parts<I>(value: Option<V>, children: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = NodeRef<V>>,
    {
        let node = Self::from_node(Node::new(value));
        node.add_children(children)?;
        Ok(node)
    }

    fn from_node(node: Node<V>) -> Self {
        let node_ref = Rc::new(RefCell::new(node));
        debug!("Created node {:p}", Rc::as_ptr(&node_ref));
        Self { node_ref }
    }

    /// Address of the shared node, identifying it regardless of which handle is used
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.node_ref) as *const ()
    }

    /// Take the node out of its handle if this is the last handle to it
    pub(crate) fn into_node(self) -> Option<Node<V>> {
        Rc::try_unwrap(self.node_ref)
            .ok()
            .map(RefCell::into_inner)
    }

    /// Get a reference to the inner node
    pub(crate) fn node(&self) -> Ref<'_, Node<V>> {
        self.node_ref.borrow()
    }

    fn node_mut(&self) -> RefMut<'_, Node<V>> {
        self.node_ref.borrow_mut()
    }

    /// Clone of the current value, `None` when the value is absent
    pub fn value(&self) -> Option<V>
    where
        V: Clone,
    {
        self.node().value().cloned()
    }

    /// Calls the provided closure with a reference to the node's value.
    ///
    /// # Panics
    ///
    /// The node is borrowed for the duration of the call; mutating this same
    /// node from inside `f` panics.
    pub fn with_value<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&V>) -> R,
    {
        f(self.node().value())
    }

    pub fn set_value(&self, value: V) {
        self.node_mut().replace_value(Some(value));
    }

    /// Remove the value, leaving the node with an absent value
    pub fn take_value(&self) -> Option<V> {
        self.node_mut().replace_value(None)
    }

    pub fn num_children(&self) -> usize {
        self.node().num_children()
    }

    pub fn is_leaf(&self) -> bool {
        self.num_children() == 0
    }

    /// First child, or `None` on a leaf
    pub fn first_child(&self) -> Option<NodeRef<V>> {
        self.node().children().first().cloned()
    }

    /// Last child, or `None` on a leaf
    pub fn last_child(&self) -> Option<NodeRef<V>> {
        self.node().children().last().cloned()
    }

    /// Handle to the child at `index`, counting from zero
    pub fn child(&self, index: usize) -> TreeResult<NodeRef<V>> {
        self.node().get_child(index).cloned()
    }

    /// Iterate over the children in insertion order.
    ///
    /// The iterator works on a snapshot of the child list taken now; later
    /// changes to this node's child list are not observed by it.
    pub fn children(&self) -> Children<V> {
        Children::new(self.node().children().to_vec())
    }

    /// True if both handles point at the same node
    pub fn ptr_eq(&self, other: &NodeRef<V>) -> bool {
        Rc::ptr_eq(&self.node_ref, &other.node_ref)
    }

    /// True if `node` is one of this node's direct children, by identity
    pub fn has_child(&self, node: &NodeRef<V>) -> bool {
        self.node().has_child(node)
    }

    /// Reject `child` if it is this node, if this node is already one of its
    /// direct children, or if it is already one of this node's children.
    /// Deeper descendants are not searched.
    fn check_structure(&self, child: &NodeRef<V>) -> TreeResult<()> {
        if self.ptr_eq(child) || child.has_child(self) {
            error!(
                "Rejected attaching node {:p} under {:p}: would create a cycle",
                child.addr(),
                self.addr()
            );
            return Err(TreeError::InvalidStructure);
        }
        if self.has_child(child) {
            error!(
                "Rejected attaching node {:p} under {:p}: already a child",
                child.addr(),
                self.addr()
            );
            return Err(TreeError::InvalidStructure);
        }
        Ok(())
    }

    /// Append `child` as the new last child
    pub fn add_child(&self, child: NodeRef<V>) -> TreeResult<()> {
        self.check_structure(&child)?;

        let mut node = self.node_mut();
        node.push_child(child);
        debug!(
            "Appended child to {:p}, now {} children",
            self.addr(),
            node.num_children()
        );
        Ok(())
    }

    /// Insert `child` at `index`, shifting the children at and after `index`
    /// one position right.
    ///
    /// `index` must name an existing child; inserting at
    /// `index == num_children()` is rejected rather than treated as an append.
    pub fn insert_child(&self, index: usize, child: NodeRef<V>) -> TreeResult<()> {
        self.check_structure(&child)?;

        let mut node = self.node_mut();
        if let Err(e) = node.insert_child(index, child) {
            error!(
                "Attempted to insert child with index {} into children with length {}",
                index,
                node.num_children()
            );
            return Err(e);
        }
        debug!(
            "Inserted child into {:p} at index {}",
            self.addr(),
            index
        );
        Ok(())
    }

    /// Append each node in `children` in order.
    ///
    /// Every child is validated and attached on its own. On the first
    /// rejection the error is returned and the remaining children are not
    /// attached; children attached before it stay in place.
    pub fn add_children<I>(&self, children: I) -> TreeResult<()>
    where
        I: IntoIterator<Item = NodeRef<V>>,
    {
        children
            .into_iter()
            .try_for_each(|child| self.add_child(child))
    }

    /// Detach and return the child at `index`. The removed subtree is left
    /// untouched and is now owned by the caller.
    pub fn remove_child(&self, index: usize) -> TreeResult<NodeRef<V>> {
        let removed = self.node_mut().remove_child_index(index)?;
        debug!(
            "Removed child {:p} from {:p} at index {}",
            removed.addr(),
            self.addr(),
            index
        );
        Ok(removed)
    }

    /// Copy the whole subtree into fresh nodes.
    ///
    /// Children shared between several parents become independent copies. A
    /// node linked below itself (a cycle deeper than insertion checks) is
    /// linked the same way in the copy.
    pub fn deep_clone(&self) -> NodeRef<V>
    where
        V: Clone,
    {
        let root = Self::from_node(Node::new(self.node().value().cloned()));

        // Source nodes from the root down to the current one, with their copies
        let mut path: AncestorPath<V, NodeRef<V>> = AncestorPath::new();
        path.push(self.clone(), root.clone());

        // (depth, source node, copy of its parent)
        let mut stack: Vec<(usize, NodeRef<V>, NodeRef<V>)> = self
            .node()
            .children()
            .iter()
            .rev()
            .map(|child| (1, child.clone(), root.clone()))
            .collect();

        while let Some((depth, source, parent)) = stack.pop() {
            path.truncate(depth);

            if let Some(copy) = path.get(&source) {
                let copy = copy.clone();
                parent.node_mut().push_child(copy);
                continue;
            }

            let copy = Self::from_node(Node::new(source.node().value().cloned()));
            parent.node_mut().push_child(copy.clone());

            stack.extend(
                source
                    .node()
                    .children()
                    .iter()
                    .rev()
                    .map(|child| (depth + 1, child.clone(), copy.clone())),
            );
            path.push(source, copy);
        }

        root
    }
}
