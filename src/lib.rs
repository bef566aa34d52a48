//! Owned mutable trees.
//!
//! Nodes live in a [`Tree`] arena and are addressed by [`NodeId`]. Every node
//! has at most one parent: attaching a node that already has one attaches a
//! deep copy instead. On top of the node base sit removal-safe child cursors,
//! filtered depth iteration, index-path addressing, the [`edit`] primitives,
//! a [`TreeWalker`] visitor and [`Transform`] commands.

pub mod config;
pub mod domain;
pub mod edit;
pub mod transform;
pub mod traversal;
pub mod tree_traits;
pub mod util;

pub use config::{Settings, SettingsError};
pub use domain::{ChildrenCursor, NodeContent, NodeId, NodeRef, Tree, TreeError, TreeResult};
pub use transform::{
    Transform, TransformKind, TransformQueue, TransformResult, TransformRule, TraversalStrategy,
};
pub use traversal::{DepthIter, TreeWalker};
pub use tree_traits::TreeNodeConvert;
