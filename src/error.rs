//! Errors reported by structural operations on a node.

use thiserror::Error;

/// Failure of a child-list operation. Both variants are raised before any
/// mutation happens, so the node is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Attaching the child would make the parent reachable from itself, or
    /// link the same node twice under one parent.
    #[error("invalid structure: child would create a cycle or is already attached")]
    InvalidStructure,

    /// Indexed access outside `0..len`.
    #[error("child index {index} out of range for node with {len} children")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for node operations.
pub type TreeResult<T> = Result<T, TreeError>;
