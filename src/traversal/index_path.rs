//! Addressing nodes by child-position paths and kind-filtered positions.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::{TreeError, TreeResult};
use crate::edit;

impl<C> Tree<C> {
    /// Walks `path` down from `root`; an empty path returns `root`.
    ///
    /// A step that lands on a childless node fails with
    /// [`TreeError::NoChildren`], a bad index otherwise with
    /// [`TreeError::IndexOutOfRange`].
    #[instrument(level = "trace", skip(self))]
    pub fn child_at_path(&self, root: NodeId, path: &[usize]) -> TreeResult<NodeId> {
        self.ensure(root)?;
        path.iter().try_fold(root, |current, &index| {
            self.child(current, index)?
                .ok_or(TreeError::NoChildren {
                    parent: current,
                    index,
                })
        })
    }
}

impl<C: NodeContent> Tree<C> {
    /// Replaces the node addressed by `path` with `new`.
    ///
    /// Returns the node now occupying the slot, `None` if the replacement was
    /// refused.
    #[instrument(level = "debug", skip(self))]
    pub fn replace_child_at_path(
        &mut self,
        root: NodeId,
        new: NodeId,
        path: &[usize],
    ) -> TreeResult<Option<NodeId>> {
        let (&last, parent_path) = path.split_last().ok_or(TreeError::EmptyPath)?;
        let parent = self.child_at_path(root, parent_path)?;
        let old = self.child(parent, last)?.ok_or(TreeError::NoChildren {
            parent,
            index: last,
        })?;
        debug!(%parent, %old, %new, "replacing child addressed by path");
        edit::replace(self, old, new)
    }
}

fn is_kind<C: NodeContent>(tree: &Tree<C>, id: NodeId, kinds: &[&str]) -> bool {
    tree.content(id)
        .map(|content| {
            let name = content.node_name();
            kinds.contains(&name.as_str())
        })
        .unwrap_or(false)
}

/// Positions in `children` whose node kind is one of `kinds`.
pub fn indexes_of<C: NodeContent>(tree: &Tree<C>, children: &[NodeId], kinds: &[&str]) -> Vec<usize> {
    children
        .iter()
        .positions(|&id| is_kind(tree, id, kinds))
        .collect()
}

/// Last position in `children` whose kind is one of `kinds`.
pub fn last_index_of<C: NodeContent>(
    tree: &Tree<C>,
    children: &[NodeId],
    kinds: &[&str],
) -> Option<usize> {
    children.iter().rposition(|&id| is_kind(tree, id, kinds))
}

/// Last position in `children` whose kind is none of `kinds`.
pub fn last_index_except<C: NodeContent>(
    tree: &Tree<C>,
    children: &[NodeId],
    kinds: &[&str],
) -> Option<usize> {
    children.iter().rposition(|&id| !is_kind(tree, id, kinds))
}
