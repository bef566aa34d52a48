//! Depth iteration, index paths and the walker

mod common;

use common::{child_labels, labels, sample, Sample, Token};
use rstest::rstest;
use rstree::traversal::{
    accept_all, collect_matching, indexes_of, kind_tester, last_index_except, last_index_of,
};
use rstree::{NodeId, NodeRef, Tree, TreeError, TreeResult, TreeWalker};

fn is_leaf(node: NodeRef<'_, Token>) -> bool {
    !node.has_children()
}

fn ids<'a>(nodes: impl Iterator<Item = NodeRef<'a, Token>>) -> Vec<NodeId> {
    nodes.map(|n| n.id()).collect()
}

// ============================================================
// Depth iteration
// ============================================================

#[rstest]
fn given_leaf_filter_when_iterating_then_yields_leaves_in_pre_order(sample: Sample) {
    let Sample {
        tree,
        root,
        b,
        leaf,
        ..
    } = sample;

    let found = ids(tree.depth_iter(root, is_leaf).unwrap());

    assert_eq!(found, vec![leaf, b]);
}

#[rstest]
fn given_accept_all_when_iterating_then_root_is_excluded(sample: Sample) {
    let Sample {
        tree,
        root,
        a,
        b,
        leaf,
    } = sample;

    let found = ids(tree.depth_iter(root, accept_all::<Token>).unwrap());

    assert_eq!(found, vec![a, leaf, b]);
}

#[rstest]
fn given_matching_inner_node_when_pruning_then_subtree_is_skipped(sample: Sample) {
    let Sample {
        tree,
        root,
        a,
        b,
        leaf,
    } = sample;
    let kinds = vec!["Stmt".to_string(), "Expr".to_string()];

    let filtered = ids(tree.depth_iter(root, kind_tester::<Token>(kinds.clone())).unwrap());
    let pruned = ids(tree.depth_iter_pruned(root, kind_tester::<Token>(kinds)).unwrap());

    assert_eq!(filtered, vec![a, leaf, b]);
    assert_eq!(pruned, vec![a, b]);
}

#[rstest]
fn given_non_matching_nodes_when_pruning_then_they_are_still_descended(sample: Sample) {
    let Sample {
        tree,
        root,
        b,
        leaf,
        ..
    } = sample;

    let iter = tree.depth_iter_pruned(root, is_leaf).unwrap();
    assert!(iter.is_pruning());

    assert_eq!(ids(iter), vec![leaf, b]);
}

#[rstest]
fn given_closure_tester_when_iterating_then_matches_by_content(sample: Sample) {
    let Sample { tree, root, b, .. } = sample;

    let found = ids(tree
        .depth_iter(root, |n: NodeRef<'_, Token>| n.to_content_string() == "B")
        .unwrap());

    assert_eq!(found, vec![b]);
}

#[rstest]
fn given_descendants_when_post_filtering_then_keeps_matches(sample: Sample) {
    let Sample {
        tree,
        root,
        b,
        leaf,
        ..
    } = sample;

    let matched = collect_matching(tree.node(root).unwrap().descendants(), is_leaf);

    assert_eq!(ids(matched.into_iter()), vec![leaf, b]);
}

#[rstest]
fn given_stale_root_when_iterating_then_invalid_operand(sample: Sample) {
    let Sample { mut tree, a, .. } = sample;
    tree.discard(a).unwrap();

    assert!(matches!(
        tree.depth_iter(a, is_leaf),
        Err(TreeError::InvalidOperand(_))
    ));
}

// ============================================================
// Index paths
// ============================================================

#[rstest]
fn given_paths_when_resolving_then_walks_one_index_per_step(sample: Sample) {
    let Sample {
        tree,
        root,
        b,
        leaf,
        ..
    } = sample;

    assert_eq!(tree.child_at_path(root, &[]).unwrap(), root);
    assert_eq!(tree.child_at_path(root, &[0, 0]).unwrap(), leaf);
    assert_eq!(tree.child_at_path(root, &[1]).unwrap(), b);
    assert_eq!(
        tree.child_at_path(root, &[1, 0]),
        Err(TreeError::NoChildren { parent: b, index: 0 })
    );
    assert_eq!(
        tree.child_at_path(root, &[5]),
        Err(TreeError::IndexOutOfRange {
            parent: root,
            index: 5,
            len: 2
        })
    );
}

#[rstest]
fn given_path_when_replacing_then_addressed_node_is_swapped_out(sample: Sample) {
    let Sample {
        mut tree,
        root,
        a,
        leaf,
        ..
    } = sample;
    let fresh = tree.new_node(Token::Expr("fresh"));

    let placed = tree.replace_child_at_path(root, fresh, &[0, 0]).unwrap();

    assert_eq!(placed, Some(fresh));
    assert_eq!(child_labels(&tree, a), vec!["fresh"]);
    assert_eq!(tree.parent_of(leaf).unwrap(), None);
}

#[rstest]
fn given_empty_path_when_replacing_then_empty_path_error(sample: Sample) {
    let Sample { mut tree, root, .. } = sample;
    let fresh = tree.new_node(Token::Expr("fresh"));

    assert_eq!(
        tree.replace_child_at_path(root, fresh, &[]),
        Err(TreeError::EmptyPath)
    );
}

#[test]
fn given_mixed_kinds_when_querying_positions_then_filters_by_node_name() {
    let mut tree = Tree::new();
    let children: Vec<NodeId> = [
        Token::Stmt("s0"),
        Token::Expr("e1"),
        Token::Stmt("s2"),
        Token::Block("b3"),
    ]
    .into_iter()
    .map(|t| tree.new_node(t))
    .collect();

    assert_eq!(indexes_of(&tree, &children, &["Stmt"]), vec![0, 2]);
    assert_eq!(last_index_of(&tree, &children, &["Expr", "Block"]), Some(3));
    assert_eq!(last_index_of(&tree, &children, &["Missing"]), None);
    assert_eq!(last_index_except(&tree, &children, &["Block"]), Some(2));
    assert_eq!(
        labels(&tree, &children[..1]),
        vec!["s0".to_string()]
    );
}

// ============================================================
// Walker
// ============================================================

#[derive(Default)]
struct Collector {
    visited: Vec<String>,
}

impl TreeWalker<Token> for Collector {
    fn visit(&mut self, tree: &mut Tree<Token>, node: NodeId) -> TreeResult<()> {
        self.visited.push(tree.node(node)?.to_content_string());
        self.visit_children(tree, node)
    }
}

struct Noop;

impl TreeWalker<Token> for Noop {}

/// Discards every expression node it meets.
struct ExprPruner;

impl TreeWalker<Token> for ExprPruner {
    fn visit(&mut self, tree: &mut Tree<Token>, node: NodeId) -> TreeResult<()> {
        if tree.node(node)?.node_name() == "Expr" {
            tree.discard(node)?;
            return Ok(());
        }
        self.visit_children(tree, node)
    }
}

/// Discards the right sibling of `A` while visiting `A`.
#[derive(Default)]
struct SiblingDropper {
    visited: Vec<String>,
}

impl TreeWalker<Token> for SiblingDropper {
    fn visit(&mut self, tree: &mut Tree<Token>, node: NodeId) -> TreeResult<()> {
        let label = tree.node(node)?.to_content_string();
        if label == "A" {
            let next = tree.node(node)?.right_siblings().first().copied();
            if let Some(sibling) = next {
                tree.discard(sibling)?;
            }
        }
        self.visited.push(label);
        self.visit_children(tree, node)
    }
}

#[rstest]
fn given_override_when_walking_then_visits_pre_order(sample: Sample) {
    let Sample { mut tree, root, .. } = sample;
    let mut walker = Collector::default();

    walker.visit(&mut tree, root).unwrap();

    assert_eq!(walker.visited, vec!["root", "A", "leaf", "B"]);
}

#[rstest]
fn given_default_walker_when_walking_then_tree_is_untouched(sample: Sample) {
    let Sample {
        mut tree,
        root,
        a,
        b,
        ..
    } = sample;

    Noop.visit(&mut tree, root).unwrap();

    assert_eq!(tree.children_of(root).unwrap(), &[a, b]);
    assert_eq!(tree.len(), 4);
}

#[rstest]
fn given_mutating_walker_when_walking_then_discarded_nodes_are_skipped(sample: Sample) {
    let Sample {
        mut tree,
        root,
        a,
        leaf,
        ..
    } = sample;

    ExprPruner.visit(&mut tree, root).unwrap();

    assert!(tree.children_of(a).unwrap().is_empty());
    assert!(!tree.contains(leaf));

    let mut dropper = SiblingDropper::default();
    dropper.visit(&mut tree, root).unwrap();
    assert_eq!(dropper.visited, vec!["root", "A"]);
    assert_eq!(child_labels(&tree, root), vec!["A"]);
}
