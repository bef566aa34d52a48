//! Domain layer: the node arena and its read views
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod children;
pub mod content;
pub mod error;
pub mod node_ref;

pub use arena::{NodeId, Tree};
pub use children::ChildrenCursor;
pub use content::NodeContent;
pub use error::{TreeError, TreeResult};
pub use node_ref::NodeRef;
