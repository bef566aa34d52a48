//! Read-only view of a single node.

use std::fmt;
use std::ptr;

use tracing::warn;

use crate::domain::arena::{NodeId, Tree, TreeNode};
use crate::domain::content::NodeContent;
use crate::traversal::depth::{accept_all, DepthIter};

/// Borrowed handle pairing a [`NodeId`] with the tree that owns it.
///
/// All navigation is pure; use the [`Tree`] methods to mutate.
pub struct NodeRef<'a, C> {
    tree: &'a Tree<C>,
    id: NodeId,
    node: &'a TreeNode<C>,
}

impl<C> Clone for NodeRef<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NodeRef<'_, C> {}

impl<C> PartialEq for NodeRef<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && ptr::eq(self.tree, other.tree)
    }
}

impl<C> Eq for NodeRef<'_, C> {}

impl<C> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("parent", &self.node.parent)
            .field("children", &self.node.children)
            .finish()
    }
}

impl<'a, C> NodeRef<'a, C> {
    pub(crate) fn new(tree: &'a Tree<C>, id: NodeId, node: &'a TreeNode<C>) -> Self {
        Self { tree, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree<C> {
        self.tree
    }

    pub fn content(&self) -> &'a C {
        &self.node.content
    }

    pub fn children(&self) -> &'a [NodeId] {
        &self.node.children
    }

    pub fn child_refs(&self) -> impl Iterator<Item = NodeRef<'a, C>> + 'a {
        let tree = self.tree;
        self.node.children.iter().filter_map(move |&id| tree.get(id))
    }

    pub fn has_children(&self) -> bool {
        !self.node.children.is_empty()
    }

    pub fn num_children(&self) -> usize {
        self.node.children.len()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, C>> {
        self.node.parent.and_then(|id| self.tree.get(id))
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.node.parent
    }

    pub fn has_parent(&self) -> bool {
        self.node.parent.is_some()
    }

    /// Topmost ancestor, or the node itself when it is a root.
    pub fn root(&self) -> NodeRef<'a, C> {
        self.ancestors().last().unwrap_or(*self)
    }

    /// Number of ancestors; a root has depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Position in the parent's child list, `None` for a root.
    pub fn index_of_self(&self) -> Option<usize> {
        self.tree.slot(self.id).map(|(_, index)| index)
    }

    pub fn index_of_child(&self, child: NodeId) -> Option<usize> {
        self.node.children.iter().position(|&c| c == child)
    }

    /// Strict descendants in pre-order.
    pub fn descendants(&self) -> DepthIter<'a, C, fn(NodeRef<'_, C>) -> bool> {
        let tester: fn(NodeRef<'_, C>) -> bool = accept_all::<C>;
        DepthIter::new(self.tree, self.id, tester, false)
    }

    pub fn descendants_and_self(&self) -> impl Iterator<Item = NodeRef<'a, C>> + 'a {
        std::iter::once(*self).chain(self.descendants())
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a, C>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn ancestors_and_self(&self) -> impl Iterator<Item = NodeRef<'a, C>> + 'a {
        std::iter::successors(Some(*self), |node| node.parent())
    }

    pub fn is_ancestor_of(&self, other: NodeId) -> bool {
        self.tree.is_ancestor(self.id, other)
    }

    /// Siblings before this node, nearest last.
    pub fn left_siblings(&self) -> &'a [NodeId] {
        match self.sibling_list() {
            Some((siblings, index)) => &siblings[..index],
            None => &[],
        }
    }

    /// Siblings after this node, nearest first.
    pub fn right_siblings(&self) -> &'a [NodeId] {
        match self.sibling_list() {
            Some((siblings, index)) => &siblings[index + 1..],
            None => &[],
        }
    }

    fn sibling_list(&self) -> Option<(&'a [NodeId], usize)> {
        let Some(parent) = self.parent() else {
            warn!(id = %self.id, "root node has no siblings");
            return None;
        };
        let index = parent.index_of_child(self.id)?;
        Some((parent.children(), index))
    }
}

impl<C: NodeContent> NodeRef<'_, C> {
    pub fn to_content_string(&self) -> String {
        self.node.content.to_content_string()
    }

    pub fn node_name(&self) -> String {
        self.node.content.node_name()
    }

    /// `Name: content`, or just `Name` when the content renders empty.
    pub fn to_node_string(&self) -> String {
        let name = self.node_name();
        let content = self.to_content_string();
        if content.is_empty() {
            name
        } else {
            format!("{name}: {content}")
        }
    }
}
