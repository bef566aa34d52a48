//! Removal-safe iteration over a node's children.

use tracing::trace;

use crate::domain::arena::{NodeId, Tree};
use crate::domain::error::{TreeError, TreeResult};

/// Forward cursor over the live child list of one node.
///
/// Unlike iterating `children_of`, the cursor holds the tree mutably so the
/// last yielded child can be removed without skipping or repeating siblings.
pub struct ChildrenCursor<'t, C> {
    tree: &'t mut Tree<C>,
    parent: NodeId,
    next_index: usize,
    last_yielded: Option<usize>,
}

impl<'t, C> ChildrenCursor<'t, C> {
    pub(crate) fn new(tree: &'t mut Tree<C>, parent: NodeId) -> Self {
        Self {
            tree,
            parent,
            next_index: 0,
            last_yielded: None,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Read access to the tree while the cursor is open.
    pub fn tree(&self) -> &Tree<C> {
        &*self.tree
    }

    pub fn has_next(&self) -> bool {
        self.next_index < self.live_len()
    }

    /// Detaches the child returned by the last `next()`.
    pub fn remove(&mut self) -> TreeResult<NodeId> {
        let index = self
            .last_yielded
            .take()
            .ok_or(TreeError::IllegalCursorState(
                "remove() requires a preceding next()",
            ))?;
        let child = self.tree.remove_child(self.parent, index)?;
        trace!(parent = %self.parent, %child, index, "removed child through cursor");
        self.next_index = index;
        Ok(child)
    }

    fn live_len(&self) -> usize {
        self.tree
            .children_of(self.parent)
            .map(<[NodeId]>::len)
            .unwrap_or(0)
    }
}

impl<C> Iterator for ChildrenCursor<'_, C> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let child = self
            .tree
            .children_of(self.parent)
            .ok()?
            .get(self.next_index)
            .copied()?;
        self.last_yielded = Some(self.next_index);
        self.next_index += 1;
        Some(child)
    }
}

impl<C> Tree<C> {
    /// Opens a removal-safe cursor over `parent`'s children.
    pub fn children_cursor(&mut self, parent: NodeId) -> TreeResult<ChildrenCursor<'_, C>> {
        self.ensure(parent)?;
        Ok(ChildrenCursor::new(self, parent))
    }

    /// Detaches every child matching `predicate`, returning them in order.
    pub fn remove_children_where<P>(&mut self, parent: NodeId, mut predicate: P) -> TreeResult<Vec<NodeId>>
    where
        P: FnMut(&Tree<C>, NodeId) -> bool,
    {
        let mut cursor = self.children_cursor(parent)?;
        let mut removed = Vec::new();
        while let Some(child) = cursor.next() {
            if predicate(cursor.tree(), child) {
                removed.push(cursor.remove()?);
            }
        }
        Ok(removed)
    }
}
