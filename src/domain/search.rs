//! Node lookup by reference, label or value.
//!
//! Reference, prefix and identity matches end the search at once. Value matches are
//! only a fallback: the first one in pre-order wins if nothing else matched anywhere
//! in the tree.

use tracing::{instrument, trace};

use crate::domain::iter::TreeIterator;
use crate::domain::node::TreeNode;

/// Something a node can be looked up by.
pub trait SearchKey<T> {
    /// Reference identity with a node handle.
    fn matches_node(&self, _node: &TreeNode<T>) -> bool {
        false
    }

    /// Exact match against a prefix or an identity string.
    fn matches_label(&self, _label: &str) -> bool {
        false
    }

    /// Exact match against a payload.
    fn matches_value(&self, _value: &T) -> bool {
        false
    }
}

impl<T> SearchKey<T> for TreeNode<T> {
    fn matches_node(&self, node: &TreeNode<T>) -> bool {
        self.ptr_eq(node)
    }
}

impl<T: PartialEq<str>> SearchKey<T> for str {
    fn matches_label(&self, label: &str) -> bool {
        self == label
    }

    fn matches_value(&self, value: &T) -> bool {
        value == self
    }
}

impl<T: PartialEq<str>> SearchKey<T> for String {
    fn matches_label(&self, label: &str) -> bool {
        self == label
    }

    fn matches_value(&self, value: &T) -> bool {
        value == self.as_str()
    }
}

/// Matches prefixes and identities only, for payloads that are not string-like.
#[derive(Debug, Clone, Copy)]
pub struct Label<'a>(pub &'a str);

impl<T> SearchKey<T> for Label<'_> {
    fn matches_label(&self, label: &str) -> bool {
        self.0 == label
    }
}

/// Matches payloads only.
#[derive(Debug, Clone, Copy)]
pub struct ByValue<'a, T>(pub &'a T);

impl<T: PartialEq> SearchKey<T> for ByValue<'_, T> {
    fn matches_value(&self, value: &T) -> bool {
        self.0 == value
    }
}

/// Searches the tree below `head` in pre-order.
#[instrument(level = "trace", skip_all)]
pub(crate) fn search<T, K>(head: Option<&TreeNode<T>>, key: &K) -> Option<TreeNode<T>>
where
    K: SearchKey<T> + ?Sized,
{
    let mut value_match: Option<TreeNode<T>> = None;

    for node in TreeIterator::new(head.cloned()) {
        let (label_hit, value_hit) = {
            let data = node.data();
            let label_hit = data
                .prefix
                .as_deref()
                .is_some_and(|prefix| key.matches_label(prefix))
                || key.matches_label(data.identity.as_str());
            let value_hit = value_match.is_none() && key.matches_value(&data.value);
            (label_hit, value_hit)
        };

        if label_hit || key.matches_node(&node) {
            trace!("found node {}", node.identity().short(8));
            return Some(node);
        }
        if value_hit {
            trace!("value candidate {}", node.identity().short(8));
            value_match = Some(node);
        }
    }

    value_match
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_prefix_later_than_value_when_searching_then_prefix_wins() {
        // root
        // ├── "py" (value)
        // └── "other" [py]
        let root = TreeNode::new("root".to_string());
        let by_value = TreeNode::new("py".to_string());
        let by_prefix = TreeNode::new("other".to_string()).with_prefix("py");
        root.add_children([by_value.clone(), by_prefix.clone()])
            .unwrap();

        let found = search(Some(&root), "py").unwrap();

        assert!(found.ptr_eq(&by_prefix));
    }

    #[test]
    fn given_duplicate_values_when_searching_then_first_in_preorder_wins() {
        let root = TreeNode::new("root".to_string());
        let deep_parent = TreeNode::new("a".to_string());
        let deep = TreeNode::new("x".to_string());
        deep_parent.add_child(deep.clone()).unwrap();
        root.add_children([deep_parent, TreeNode::new("x".to_string())])
            .unwrap();

        let found = search(Some(&root), "x").unwrap();

        assert!(found.ptr_eq(&deep));
    }

    #[test]
    fn given_integer_payloads_when_searching_by_value_then_found() {
        let root = TreeNode::new(1);
        let two = TreeNode::new(2);
        root.add_child(two.clone()).unwrap();

        assert!(search(Some(&root), &ByValue(&2)).unwrap().ptr_eq(&two));
        assert!(search(Some(&root), &ByValue(&3)).is_none());
    }

    #[test]
    fn given_identity_when_searching_by_label_then_found() {
        let root = TreeNode::new(1);
        let child = TreeNode::new(2);
        root.add_child(child.clone()).unwrap();
        let identity = child.identity();

        let found = search(Some(&root), &Label(identity.as_str())).unwrap();

        assert!(found.ptr_eq(&child));
    }

    #[test]
    fn given_empty_tree_when_searching_then_none() {
        assert!(search::<String, str>(None, "anything").is_none());
    }
}
