//! Visitor skeleton for side-effecting passes.

use crate::domain::arena::{NodeId, Tree};
use crate::domain::error::TreeResult;

/// Recursive visitor over a tree.
///
/// The default [`visit`](TreeWalker::visit) does nothing with the node itself
/// and only recurses. Overrides do their per-node work and call
/// [`visit_children`](TreeWalker::visit_children) to keep descending.
pub trait TreeWalker<C> {
    fn visit(&mut self, tree: &mut Tree<C>, node: NodeId) -> TreeResult<()> {
        self.visit_children(tree, node)
    }

    /// Visits the children as they were when the call started. Children
    /// discarded by an earlier visit are skipped.
    fn visit_children(&mut self, tree: &mut Tree<C>, node: NodeId) -> TreeResult<()> {
        let children = tree.children_of(node)?.to_vec();
        for child in children {
            if tree.contains(child) {
                self.visit(tree, child)?;
            }
        }
        Ok(())
    }
}
