//! Depth-first traversals driven by an explicit stack.

use crate::domain::node::TreeNode;

/// Pre-order iterator: parent before children, children in insertion order.
pub struct TreeIterator<T> {
    stack: Vec<TreeNode<T>>,
}

impl<T> TreeIterator<T> {
    pub(crate) fn new(start: Option<TreeNode<T>>) -> Self {
        Self {
            stack: start.into_iter().collect(),
        }
    }
}

impl<T> Iterator for TreeIterator<T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children().into_iter().rev());
        Some(current)
    }
}

/// Post-order iterator: children before their parent.
pub struct PostOrderIterator<T> {
    stack: Vec<(TreeNode<T>, bool)>,
}

impl<T> PostOrderIterator<T> {
    pub(crate) fn new(start: Option<TreeNode<T>>) -> Self {
        Self {
            stack: start.into_iter().map(|node| (node, false)).collect(),
        }
    }
}

impl<T> Iterator for PostOrderIterator<T> {
    type Item = TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if visited {
                return Some(current);
            }
            let children = current.children();
            self.stack.push((current, true));
            for child in children.into_iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
