//! Structural edits as values.
//!
//! A [`Transform`] names one edit and its operands. Transforms are usually
//! recorded into a [`TransformQueue`] by a [`TransformRule`] while the tree is
//! only being read, and executed afterwards.

pub mod queue;
pub mod rule;

use std::fmt;

use itertools::Itertools;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;
use crate::edit;

pub use queue::TransformQueue;
pub use rule::{TransformResult, TransformRule, TraversalStrategy};

/// Tag identifying the kind of a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    AddChild,
    Delete,
    Replace,
    MoveBefore,
    MoveAfter,
    Swap,
}

impl TransformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::AddChild => "add-child",
            TransformKind::Delete => "delete",
            TransformKind::Replace => "replace",
            TransformKind::MoveBefore => "move-before",
            TransformKind::MoveAfter => "move-after",
            TransformKind::Swap => "swap",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Appends `child`, or inserts it at `position`.
    AddChild {
        parent: NodeId,
        child: NodeId,
        position: Option<usize>,
    },
    /// Detaches `node` from its parent.
    Delete { node: NodeId },
    Replace { old: NodeId, new: NodeId },
    /// Moves `node` to just before `base`.
    MoveBefore { base: NodeId, node: NodeId },
    /// Moves `node` to just after `base`.
    MoveAfter { base: NodeId, node: NodeId },
    Swap {
        first: NodeId,
        second: NodeId,
        swap_subtrees: bool,
    },
}

impl Transform {
    pub fn kind(&self) -> TransformKind {
        match self {
            Transform::AddChild { .. } => TransformKind::AddChild,
            Transform::Delete { .. } => TransformKind::Delete,
            Transform::Replace { .. } => TransformKind::Replace,
            Transform::MoveBefore { .. } => TransformKind::MoveBefore,
            Transform::MoveAfter { .. } => TransformKind::MoveAfter,
            Transform::Swap { .. } => TransformKind::Swap,
        }
    }

    /// Operand ids in declaration order.
    pub fn operands(&self) -> Vec<NodeId> {
        match *self {
            Transform::AddChild { parent, child, .. } => vec![parent, child],
            Transform::Delete { node } => vec![node],
            Transform::Replace { old, new } => vec![old, new],
            Transform::MoveBefore { base, node } | Transform::MoveAfter { base, node } => {
                vec![base, node]
            }
            Transform::Swap { first, second, .. } => vec![first, second],
        }
    }

    /// Performs the edit. Refused restructures are logged, not returned.
    #[instrument(level = "debug", skip(tree), fields(kind = %self.kind()))]
    pub fn execute<C: NodeContent>(&self, tree: &mut Tree<C>) -> TreeResult<()> {
        match *self {
            Transform::AddChild {
                parent,
                child,
                position,
            } => {
                match position {
                    Some(index) => tree.add_child_at(parent, index, child)?,
                    None => tree.add_child(parent, child)?,
                };
            }
            Transform::Delete { node } => edit::delete(tree, node)?,
            Transform::Replace { old, new } => {
                edit::replace(tree, old, new)?;
            }
            Transform::MoveBefore { base, node } => {
                edit::insert_before(tree, base, node, true)?;
            }
            Transform::MoveAfter { base, node } => {
                edit::insert_after(tree, base, node, true)?;
            }
            Transform::Swap {
                first,
                second,
                swap_subtrees,
            } => {
                edit::swap(tree, first, second, swap_subtrees)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.operands().iter().join(" "))
    }
}
