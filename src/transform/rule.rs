//! Rules that record transforms while walking a tree.

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;
use crate::transform::queue::TransformQueue;

/// Outcome of applying a rule to one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformResult {
    /// Whether a pre-order walk descends into the node's children.
    pub visit_children: bool,
}

impl TransformResult {
    pub fn new(visit_children: bool) -> Self {
        Self { visit_children }
    }
}

impl Default for TransformResult {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Order in which a rule meets the nodes of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalStrategy {
    /// Node first, then children. Honors `visit_children`.
    #[default]
    PreOrder,
    /// Children first, then node. Every node is visited.
    PostOrder,
}

impl TraversalStrategy {
    /// Runs `rule` over the subtree at `node` and returns the recorded queue
    /// without executing it.
    #[instrument(level = "debug", skip(tree, rule))]
    pub fn transformations<C, R>(
        self,
        tree: &Tree<C>,
        node: NodeId,
        rule: &mut R,
    ) -> TreeResult<TransformQueue>
    where
        C: NodeContent,
        R: TransformRule<C> + ?Sized,
    {
        tree.ensure(node)?;
        let mut queue = TransformQueue::new(rule.id());
        match self {
            TraversalStrategy::PreOrder => pre_order(tree, node, rule, &mut queue)?,
            TraversalStrategy::PostOrder => post_order(tree, node, rule, &mut queue)?,
        }
        debug!(id = queue.id(), count = queue.len(), "collected transforms");
        Ok(queue)
    }

    /// Collects the transforms of `rule` and applies them.
    pub fn apply<C, R>(self, tree: &mut Tree<C>, node: NodeId, rule: &mut R) -> TreeResult<()>
    where
        C: NodeContent,
        R: TransformRule<C> + ?Sized,
    {
        self.transformations(tree, node, rule)?.apply(tree)
    }
}

fn pre_order<C, R>(tree: &Tree<C>, node: NodeId, rule: &mut R, queue: &mut TransformQueue) -> TreeResult<()>
where
    C: NodeContent,
    R: TransformRule<C> + ?Sized,
{
    let result = rule.apply(tree, node, queue);
    if !result.visit_children {
        return Ok(());
    }
    for &child in tree.children_of(node)? {
        pre_order(tree, child, rule, queue)?;
    }
    Ok(())
}

fn post_order<C, R>(tree: &Tree<C>, node: NodeId, rule: &mut R, queue: &mut TransformQueue) -> TreeResult<()>
where
    C: NodeContent,
    R: TransformRule<C> + ?Sized,
{
    for &child in tree.children_of(node)? {
        post_order(tree, child, rule, queue)?;
    }
    rule.apply(tree, node, queue);
    Ok(())
}

/// A rewrite expressed as transforms recorded per node.
///
/// `apply` only reads the tree; the edits it records run after the walk, so
/// the walk never sees a half-rewritten tree.
pub trait TransformRule<C: NodeContent> {
    fn apply(&mut self, tree: &Tree<C>, node: NodeId, queue: &mut TransformQueue) -> TransformResult;

    fn traversal_strategy(&self) -> TraversalStrategy {
        TraversalStrategy::PreOrder
    }

    /// Queue id; the rule's type name unless overridden.
    fn id(&self) -> String {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }

    /// Walks the subtree at `node` with this rule's strategy and applies the
    /// result.
    fn visit(&mut self, tree: &mut Tree<C>, node: NodeId) -> TreeResult<()> {
        let strategy = self.traversal_strategy();
        strategy.apply(tree, node, self)
    }
}
