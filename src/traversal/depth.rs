//! Predicate-gated depth-first iteration.

use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;
use crate::domain::node_ref::NodeRef;

/// Tester that accepts every node.
pub fn accept_all<C>(_node: NodeRef<'_, C>) -> bool {
    true
}

/// Lazy pre-order walk over the strict descendants of a root.
///
/// Only nodes accepted by the tester are yielded. In pruning mode an accepted
/// node's subtree is skipped; rejected nodes are always descended into.
/// The iterator reads the tree as it was when `next()` is called and cannot be
/// restarted.
pub struct DepthIter<'a, C, F> {
    tree: &'a Tree<C>,
    stack: Vec<NodeId>,
    tester: F,
    prune: bool,
}

impl<'a, C, F> DepthIter<'a, C, F>
where
    F: Fn(NodeRef<'_, C>) -> bool,
{
    pub(crate) fn new(tree: &'a Tree<C>, root: NodeId, tester: F, prune: bool) -> Self {
        let stack = tree
            .get(root)
            .map(|node| node.children().iter().rev().copied().collect())
            .unwrap_or_default();
        Self {
            tree,
            stack,
            tester,
            prune,
        }
    }

    pub fn is_pruning(&self) -> bool {
        self.prune
    }
}

impl<'a, C, F> Iterator for DepthIter<'a, C, F>
where
    F: Fn(NodeRef<'_, C>) -> bool,
{
    type Item = NodeRef<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            let accepted = (self.tester)(node);
            if !(accepted && self.prune) {
                // Reverse push keeps left-to-right order on pop
                self.stack.extend(node.children().iter().rev().copied());
            }
            if accepted {
                return Some(node);
            }
        }
        None
    }
}

impl<C> Tree<C> {
    /// Filtering walk: every descendant is visited, matches are yielded.
    #[instrument(level = "trace", skip(self, tester))]
    pub fn depth_iter<F>(&self, root: NodeId, tester: F) -> TreeResult<DepthIter<'_, C, F>>
    where
        F: Fn(NodeRef<'_, C>) -> bool,
    {
        self.ensure(root)?;
        Ok(DepthIter::new(self, root, tester, false))
    }

    /// Pruning walk: matches are yielded and not descended into.
    #[instrument(level = "trace", skip(self, tester))]
    pub fn depth_iter_pruned<F>(&self, root: NodeId, tester: F) -> TreeResult<DepthIter<'_, C, F>>
    where
        F: Fn(NodeRef<'_, C>) -> bool,
    {
        self.ensure(root)?;
        Ok(DepthIter::new(self, root, tester, true))
    }
}

/// Post-filters an already produced sequence of nodes.
pub fn collect_matching<'a, C, I, F>(nodes: I, tester: F) -> Vec<NodeRef<'a, C>>
where
    I: IntoIterator<Item = NodeRef<'a, C>>,
    F: Fn(NodeRef<'_, C>) -> bool,
{
    nodes.into_iter().filter(|&node| tester(node)).collect()
}

/// Tester matching nodes whose `node_name()` is one of `kinds`.
pub fn kind_tester<C: NodeContent>(kinds: Vec<String>) -> impl Fn(NodeRef<'_, C>) -> bool {
    move |node: NodeRef<'_, C>| {
        let name = node.node_name();
        kinds.iter().any(|kind| *kind == name)
    }
}
