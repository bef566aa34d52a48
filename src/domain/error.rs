//! Domain-level errors

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Hard failures of tree operations.
///
/// Every operation that returns one of these validates its operands before
/// touching the tree, so an `Err` never leaves a partial edit behind.
/// Refused restructures (ancestor swaps, anchors without a parent) are not
/// errors; they are logged and ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not exist in this tree")]
    InvalidOperand(NodeId),

    #[error("index {index} out of range for node {parent} with {len} children")]
    IndexOutOfRange {
        parent: NodeId,
        index: usize,
        len: usize,
    },

    #[error("node {parent} has no children (requested index {index})")]
    NoChildren { parent: NodeId, index: usize },

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("attaching {node} under {parent} would make it its own ancestor")]
    CycleDetected { node: NodeId, parent: NodeId },

    #[error("index path is empty, there is no child to address")]
    EmptyPath,

    #[error("illegal cursor state: {0}")]
    IllegalCursorState(&'static str),

    #[error("inconsistent parent/child links: {0}")]
    InconsistentLinks(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
