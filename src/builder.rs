//! Builders for constructing a tree in a composable way.
//!
//! [`TreeBuilder`] creates the root and hands a [`NodeBuilder`] to a closure,
//! which adds children and recurses into them through further closures.
//!

use std::marker::PhantomData;

use tracing::{debug, debug_span, error};

use crate::{NodeRef, TreeError};

/// A builder for adding children to a parent node.
///
/// Handed to the closures given to [`TreeBuilder::root`] and
/// [`NodeBuilder::child`].
pub struct NodeBuilder<'a, V, E> {
    // NodeRef of this node
    node_ref: &'a NodeRef<V>,

    _phantom: PhantomData<E>,
}

impl<'a, V, E> NodeBuilder<'a, V, E>
where
    E: From<TreeError>,
{
    fn new(node_ref: &'a NodeRef<V>) -> Self {
        Self {
            node_ref,
            _phantom: PhantomData,
        }
    }

    /// Adds a child to the current node.
    ///
    /// # Arguments
    ///
    /// * `value`: The value of the child node.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn child<F>(&mut self, value: V, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, V, E>) -> Result<(), E>,
    {
        self.attach(NodeRef::new(value), f)
    }

    /// Adds a child with an absent value to the current node.
    pub fn empty_child<F>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, V, E>) -> Result<(), E>,
    {
        self.attach(NodeRef::empty(), f)
    }

    fn attach<F>(&mut self, child: NodeRef<V>, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, V, E>) -> Result<(), E>,
    {
        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut NodeBuilder::new(&child))?;

        // Push the child to the parent node
        self.node_ref.add_child(child)?;
        Ok(())
    }

    /// The node this builder adds children to
    pub fn node(&self) -> &NodeRef<V> {
        self.node_ref
    }
}

/// A builder for constructing trees.
///
/// The `root` method adds the root node and calls the provided closure with a
/// [`NodeBuilder`] that recursively builds its children. The closures return
/// `Result<(), E>` where `E` is your own error type, so errors raised inside
/// them propagate out of the builder. `E` must be convertible from
/// [`TreeError`].
///
/// # Examples
///
/// ```
/// use sapling::{TreeBuilder, TreeError};
///
/// let tree = TreeBuilder::<&str, TreeError>::new()
///     .root("3", |root| {
///         root.child("11", |_| Ok(()))?;
///         root.child("42", |n| n.child("110", |_| Ok(())))?;
///         Ok(())
///     })?
///     .done();
///
/// assert_eq!(tree.unwrap().to_string(), "3\n  11\n  42\n    110\n");
/// # Ok::<(), TreeError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder<V, E> {
    root: Option<NodeRef<V>>,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<V, E> Default for TreeBuilder<V, E>
where
    E: From<TreeError>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> TreeBuilder<V, E>
where
    E: From<TreeError>,
{
    /// Creates a new `TreeBuilder` instance.
    pub fn new() -> Self {
        let debug_span = debug_span!("TreeBuilder");
        debug_span.in_scope(|| debug!("Created new TreeBuilder"));

        Self {
            root: None,
            debug_span,
            _phantom: PhantomData,
        }
    }

    /// Returns the root of the constructed tree, or `None` if no root was added.
    pub fn done(self) -> Option<NodeRef<V>> {
        self.debug_span.in_scope(|| debug!("Finished building tree"));
        self.root
    }

    /// Adds a root node to the tree and returns the updated builder.
    ///
    /// A builder holds a single root; calling this a second time fails with
    /// [`TreeError::InvalidStructure`].
    pub fn root<F>(mut self, value: V, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, V, E>) -> Result<(), E>,
    {
        let span = self.debug_span.clone();
        let _enter = span.enter();

        if self.root.is_some() {
            error!("Root node already exists");
            return Err(TreeError::InvalidStructure.into());
        }

        let node_ref = NodeRef::new(value);

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut NodeBuilder::new(&node_ref))?;

        debug!("Added root");
        self.root = Some(node_ref);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum MyError {
        Tree(TreeError),
        Fail(String),
    }

    impl From<TreeError> for MyError {
        fn from(e: TreeError) -> Self {
            MyError::Tree(e)
        }
    }

    #[traced_test]
    #[test]
    fn test_builder() {
        let tree = TreeBuilder::<&str, MyError>::new()
            .root("3", |root| {
                root.child("11", |_| Ok(()))?;
                root.child("42", |n| n.child("110", |_| Ok(())))?;
                root.child("24", |_| Ok(()))?;
                root.child("35", |_| Ok(()))?;
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(tree, crate::test::example_tree());
        assert!(logs_contain("Added root"));
    }

    #[test]
    fn empty_builder() {
        assert!(TreeBuilder::<u8, TreeError>::new().done().is_none());
    }

    #[test]
    fn empty_children() {
        let tree = TreeBuilder::<u8, TreeError>::default()
            .root(1, |root| {
                root.empty_child(|c| c.child(2, |_| Ok(())))?;
                assert_eq!(root.node().num_children(), 1);
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(tree.to_string(), "1\n  \n    2\n");
    }

    #[test]
    fn closure_error_propagates() {
        let result = TreeBuilder::<&str, MyError>::new().root("root", |root| {
            root.child("a", |_| Ok(()))?;
            root.child("b", |_| Err(MyError::Fail("b".into())))?;
            root.child("c", |_| Ok(()))
        });

        assert_eq!(result.unwrap_err(), MyError::Fail("b".into()));
    }

    #[test]
    fn second_root_is_rejected() {
        let result = TreeBuilder::<&str, MyError>::new()
            .root("first", |_| Ok(()))
            .unwrap()
            .root("second", |_| Ok(()));

        assert_eq!(
            result.unwrap_err(),
            MyError::Tree(TreeError::InvalidStructure)
        );
    }
}
