//! Domain layer: tree nodes, the cursor builder, search and traversal
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod builder;
pub mod head;
pub mod identity;
pub mod iter;
pub mod node;
pub mod search;
pub mod stack;

pub use builder::{Entry, TreeBuilder};
pub use head::{Head, HeadState};
pub use identity::Identity;
pub use iter::{PostOrderIterator, TreeIterator};
pub use node::TreeNode;
pub use search::{ByValue, Label, SearchKey};
pub use stack::NavigationStack;
