//! # Sapling
//!
//! A generic, mutable, ordered N-ary tree.
//!
//! ## Overview
//!
//! Every node holds an optional value and an ordered list of children. Nodes
//! are shared through [`NodeRef`] handles, so the same node can be linked under
//! more than one parent and handles returned by accessors alias the live tree.
//! The root node is the tree.
//!
//! Insertions are checked so that a node cannot be attached under itself,
//! under one of its own direct children, or twice under the same parent. The
//! cycle check looks one level deep only; linking longer cycles by hand is
//! possible and leaks the nodes involved until one link is removed.
//!
//! ```
//! use sapling::NodeRef;
//!
//! let root = NodeRef::new("3");
//! root.add_child(NodeRef::new("11"))?;
//! root.add_child(NodeRef::from_parts(Some("42"), [NodeRef::new("110")])?)?;
//!
//! assert_eq!(root.to_string(), "3\n  11\n  42\n    110\n");
//! # Ok::<(), sapling::TreeError>(())
//! ```

mod builder;
mod compare;
mod display;
mod error;
mod hash;
mod iterator;
mod node;
mod noderef;

#[cfg(test)]
mod test;

pub use builder::{NodeBuilder, TreeBuilder};
pub use display::Pretty;
pub use error::{TreeError, TreeResult};
pub use iterator::Children;
pub use noderef::NodeRef;
