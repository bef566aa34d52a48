#![allow(dead_code)]

use rstest::fixture;
use rstree::util::testing;
use rstree::{NodeContent, NodeId, Tree};

/// Small syntax-tree payload with three node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Block(&'static str),
    Stmt(&'static str),
    Expr(&'static str),
}

impl NodeContent for Token {
    fn to_content_string(&self) -> String {
        match self {
            Token::Block(text) | Token::Stmt(text) | Token::Expr(text) => text.to_string(),
        }
    }

    fn node_name(&self) -> String {
        match self {
            Token::Block(_) => "Block",
            Token::Stmt(_) => "Stmt",
            Token::Expr(_) => "Expr",
        }
        .to_string()
    }
}

/// `root [A [leaf], B]`
pub struct Sample {
    pub tree: Tree<Token>,
    pub root: NodeId,
    pub a: NodeId,
    pub b: NodeId,
    pub leaf: NodeId,
}

#[fixture]
pub fn sample() -> Sample {
    testing::init_test_setup();
    let mut tree = Tree::new();
    let leaf = tree.new_node(Token::Expr("leaf"));
    let a = tree
        .new_node_with_children(Token::Stmt("A"), [leaf])
        .unwrap();
    let b = tree.new_node(Token::Stmt("B"));
    let root = tree
        .new_node_with_children(Token::Block("root"), [a, b])
        .unwrap();
    Sample {
        tree,
        root,
        a,
        b,
        leaf,
    }
}

pub fn labels(tree: &Tree<Token>, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| tree.node(id).unwrap().to_content_string())
        .collect()
}

pub fn child_labels(tree: &Tree<Token>, parent: NodeId) -> Vec<String> {
    labels(tree, tree.children_of(parent).unwrap())
}
