//! Ordered batch of pending transforms.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;
use crate::transform::Transform;

/// Transforms recorded against a tree, executed later in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformQueue {
    id: String,
    transforms: Vec<Transform>,
}

impl TransformQueue {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transforms: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn push(&mut self, transform: Transform) -> &mut Self {
        self.transforms.push(transform);
        self
    }

    pub fn replace(&mut self, old: NodeId, new: NodeId) -> &mut Self {
        self.push(Transform::Replace { old, new })
    }

    pub fn move_before(&mut self, base: NodeId, node: NodeId) -> &mut Self {
        self.push(Transform::MoveBefore { base, node })
    }

    pub fn move_after(&mut self, base: NodeId, node: NodeId) -> &mut Self {
        self.push(Transform::MoveAfter { base, node })
    }

    pub fn delete(&mut self, node: NodeId) -> &mut Self {
        self.push(Transform::Delete { node })
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> &mut Self {
        self.push(Transform::AddChild {
            parent,
            child,
            position: None,
        })
    }

    /// Records an insertion of `child` as the first child of `parent`.
    pub fn add_child_head(&mut self, parent: NodeId, child: NodeId) -> &mut Self {
        self.push(Transform::AddChild {
            parent,
            child,
            position: Some(0),
        })
    }

    /// Records a subtree swap.
    pub fn swap(&mut self, first: NodeId, second: NodeId) -> &mut Self {
        self.swap_with(first, second, true)
    }

    pub fn swap_with(&mut self, first: NodeId, second: NodeId, swap_subtrees: bool) -> &mut Self {
        self.push(Transform::Swap {
            first,
            second,
            swap_subtrees,
        })
    }

    /// Executes and drains all transforms in recording order.
    ///
    /// The queue is empty afterwards even if a transform fails; transforms
    /// after the failing one are dropped.
    #[instrument(level = "debug", skip(self, tree), fields(id = %self.id, count = self.transforms.len()))]
    pub fn apply<C: NodeContent>(&mut self, tree: &mut Tree<C>) -> TreeResult<()> {
        let pending = std::mem::take(&mut self.transforms);
        Self::run(tree, pending)
    }

    /// Executes and drains all transforms, last recorded first.
    #[instrument(level = "debug", skip(self, tree), fields(id = %self.id, count = self.transforms.len()))]
    pub fn apply_reverse<C: NodeContent>(&mut self, tree: &mut Tree<C>) -> TreeResult<()> {
        let pending = std::mem::take(&mut self.transforms);
        Self::run(tree, pending.into_iter().rev())
    }

    fn run<C, I>(tree: &mut Tree<C>, pending: I) -> TreeResult<()>
    where
        C: NodeContent,
        I: IntoIterator<Item = Transform>,
    {
        for transform in pending {
            debug!(%transform, "applying");
            transform.execute(tree)?;
        }
        Ok(())
    }
}

impl fmt::Display for TransformQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.transforms.iter().join(", "))
    }
}
