//! Scratch record of nodes added at the current nesting scope.

use tracing::trace;

use crate::domain::node::TreeNode;

#[derive(Debug)]
pub struct NavigationStack<T> {
    nodes: Vec<TreeNode<T>>,
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationStack<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: TreeNode<T>) {
        self.nodes.push(node);
    }

    /// Most recently pushed node.
    pub fn last(&self) -> Option<TreeNode<T>> {
        self.nodes.last().cloned()
    }

    pub fn position(&self, node: &TreeNode<T>) -> Option<usize> {
        self.nodes.iter().position(|n| n.ptr_eq(node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Drops the entries that leave scope when the cursor moves up from `node`.
    ///
    /// Without a node, or when the node was never pushed, the whole stack is dropped.
    /// Otherwise the node and everything pushed after it are dropped, unless the node
    /// is a direct child of `head`, whose scope stays intact.
    pub fn free(&mut self, node: Option<&TreeNode<T>>, head: Option<&TreeNode<T>>) {
        let Some((node, index)) = node.and_then(|n| self.position(n).map(|i| (n, i))) else {
            trace!("stack cleared ({} entries)", self.nodes.len());
            self.nodes.clear();
            return;
        };

        let parent_is_head = match (node.parent(), head) {
            (Some(parent), Some(head)) => parent.ptr_eq(head),
            _ => false,
        };
        if !parent_is_head {
            trace!("stack truncated at {index}");
            self.nodes.truncate(index);
        }
    }
}
