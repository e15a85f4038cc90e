//! Root tracking for cursor-based trees.

use crate::domain::node::TreeNode;
use crate::errors::TreeResult;

/// Access to the root of a tree and the cursor reset that goes with it.
pub trait Head<T> {
    /// The root node, or [`crate::TreeError::EmptyTree`] when none is set.
    fn head(&self) -> TreeResult<TreeNode<T>>;

    /// Makes `node` the root, detaching it from any former parent.
    ///
    /// The cursor moves to the new root and the navigation stack is cleared.
    fn set_head(&mut self, node: TreeNode<T>) -> &mut Self;

    /// Moves the cursor back to the root.
    fn rewind(&mut self) -> TreeResult<&mut Self>;

    /// True if the cursor points at the root node itself.
    fn is_head(&self) -> bool;

    fn is_empty(&self) -> bool;
}

/// Holds the root node.
#[derive(Debug)]
pub struct HeadState<T> {
    node: Option<TreeNode<T>>,
}

impl<T> Default for HeadState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HeadState<T> {
    pub fn new() -> Self {
        Self { node: None }
    }

    pub fn get(&self) -> Option<&TreeNode<T>> {
        self.node.as_ref()
    }

    pub fn set(&mut self, node: TreeNode<T>) {
        node.detach();
        self.node = Some(node);
    }

    pub fn clear(&mut self) {
        self.node = None;
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    pub fn is(&self, node: &TreeNode<T>) -> bool {
        self.node.as_ref().is_some_and(|head| head.ptr_eq(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_attached_node_when_set_as_head_then_detached() {
        let parent = TreeNode::new("parent");
        let node = TreeNode::new("node");
        parent.add_child(node.clone()).unwrap();
        let mut head = HeadState::new();

        head.set(node.clone());

        assert!(head.is(&node));
        assert!(node.parent().is_none());
        assert!(!parent.has_children());
    }

    #[test]
    fn given_cleared_head_when_queried_then_empty() {
        let mut head = HeadState::new();
        head.set(TreeNode::new(1));

        head.clear();

        assert!(head.is_empty());
        assert!(head.get().is_none());
    }
}
