//! Read and navigate utilities: depth iteration, index paths, walkers.

pub mod depth;
pub mod index_path;
pub mod walker;

pub use depth::{accept_all, collect_matching, kind_tester, DepthIter};
pub use index_path::{indexes_of, last_index_except, last_index_of};
pub use walker::TreeWalker;
