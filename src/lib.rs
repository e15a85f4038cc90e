//! Ordered multi-way tree with a fluent, cursor-based builder.
//!
//! Nodes own their children and keep a weak reference to their parent. The
//! [`TreeBuilder`] tracks a root, a cursor and a navigation stack, so nested
//! structures can be assembled without naming ancestors at every step.

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use domain::{ByValue, Entry, Head, Identity, Label, SearchKey, TreeBuilder, TreeNode};
pub use errors::{TreeError, TreeResult};
pub use tree_traits::TreeNodeConvert;
