/*
Rendering lives behind a trait so it can be implemented for the borrowed
node view without tying `NodeRef` to termtree.
 */
use termtree::Tree as TermTree;
use tracing::instrument;

use crate::config::LabelStyle;
use crate::domain::arena::{NodeId, Tree};
use crate::domain::content::NodeContent;
use crate::domain::error::TreeResult;
use crate::domain::node_ref::NodeRef;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<C: NodeContent> TreeNodeConvert for NodeRef<'_, C> {
    fn to_tree_string(&self) -> TermTree<String> {
        let label = match self.tree().render_config().label {
            LabelStyle::Content => self.to_content_string(),
            LabelStyle::NodeName => self.node_name(),
            LabelStyle::Full => self.to_node_string(),
        };

        // Recursively construct the children
        let leaves: Vec<_> = self.child_refs().map(|c| c.to_tree_string()).collect();

        TermTree::new(label).with_leaves(leaves)
    }
}

impl<C: NodeContent> Tree<C> {
    /// Renders the subtree at `root` as an indented text tree.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, root: NodeId) -> TreeResult<String> {
        Ok(self.node(root)?.to_tree_string().to_string())
    }
}
