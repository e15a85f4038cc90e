//! Cursor-based tree builder.
//!
//! The builder keeps a root (head), a cursor (current) and a navigation stack, so a
//! tree can be assembled fluently:
//!
//! ```
//! use rstree::domain::{Head, TreeBuilder};
//!
//! let mut builder: TreeBuilder<String> = TreeBuilder::new();
//! builder.add("root").add_tree("a").add("b").up()?.add("c");
//!
//! let head = builder.head()?;
//! assert_eq!(head.child_count(), 2);
//! # Ok::<(), rstree::TreeError>(())
//! ```

use tracing::{debug, instrument};

use crate::domain::head::{Head, HeadState};
use crate::domain::iter::{PostOrderIterator, TreeIterator};
use crate::domain::node::TreeNode;
use crate::domain::search::{search, SearchKey};
use crate::domain::stack::NavigationStack;
use crate::errors::{TreeError, TreeResult};

enum Source<T> {
    Value(T),
    Node(TreeNode<T>),
}

/// A value or template node to insert, with an optional prefix.
pub struct Entry<T> {
    source: Source<T>,
    prefix: Option<String>,
}

impl<T> Entry<T> {
    pub fn value(value: impl Into<T>) -> Self {
        Self {
            source: Source::Value(value.into()),
            prefix: None,
        }
    }

    pub fn prefixed(value: impl Into<T>, prefix: impl Into<String>) -> Self {
        Self::value(value).with_prefix(prefix)
    }

    /// Overrides the prefix of the inserted node.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn into_node(self) -> TreeNode<T> {
        let node = match self.source {
            Source::Value(value) => TreeNode::new(value),
            Source::Node(node) => node,
        };
        if let Some(prefix) = self.prefix {
            node.set_prefix(prefix);
        }
        node
    }
}

impl<T: Clone> Entry<T> {
    /// Inserts a childless copy of `template` under a fresh identity; the template is untouched.
    pub fn node(template: &TreeNode<T>) -> Self {
        Self {
            source: Source::Node(template.duplicate()),
            prefix: None,
        }
    }

    /// Inserts a copy of `template` together with all of its descendants.
    ///
    /// Every copied node gets a fresh identity, so the copies can be found with
    /// [`TreeBuilder::go_to`] without ever matching the template.
    pub fn subtree(template: &TreeNode<T>) -> Self {
        Self {
            source: Source::Node(template.duplicate_subtree()),
            prefix: None,
        }
    }
}

/// Converting a template node keeps its children, see [`Entry::subtree`].
impl<T: Clone> From<TreeNode<T>> for Entry<T> {
    fn from(template: TreeNode<T>) -> Self {
        Self::subtree(&template)
    }
}

impl<T: Clone> From<&TreeNode<T>> for Entry<T> {
    fn from(template: &TreeNode<T>) -> Self {
        Self::subtree(template)
    }
}

/// `(value, prefix)` pairs for [`TreeBuilder::add_all`].
impl<T, V, P> From<(V, P)> for Entry<T>
where
    V: Into<T>,
    P: Into<String>,
{
    fn from((value, prefix): (V, P)) -> Self {
        Self::prefixed(value, prefix)
    }
}

enum Step {
    Next,
    Prev,
}

/// Builds and navigates a tree through a cursor.
#[derive(Debug)]
pub struct TreeBuilder<T> {
    head: HeadState<T>,
    current: Option<TreeNode<T>>,
    stack: NavigationStack<T>,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            head: HeadState::new(),
            current: None,
            stack: NavigationStack::new(),
        }
    }

    pub fn with_root(value: impl Into<T>) -> Self {
        let mut builder = Self::new();
        builder.add(value);
        builder
    }

    /// Seeds the builder with a copy of `node` as root.
    pub fn from_node(node: &TreeNode<T>) -> Self
    where
        T: Clone,
    {
        let mut builder = Self::new();
        builder.add_entry(Entry::node(node));
        builder
    }

    /// Adds a node holding `value` below the cursor, or as root on an empty builder.
    ///
    /// The cursor does not move.
    pub fn add(&mut self, value: impl Into<T>) -> &mut Self {
        self.add_entry(Entry::value(value))
    }

    pub fn add_prefixed(&mut self, value: impl Into<T>, prefix: impl Into<String>) -> &mut Self {
        self.add_entry(Entry::prefixed(value, prefix))
    }

    #[instrument(level = "trace", skip_all)]
    pub fn add_entry(&mut self, entry: Entry<T>) -> &mut Self {
        let node = entry.into_node();

        if self.head.is_empty() {
            self.set_head(node.clone());
        } else if let Some(current) = &self.current {
            current.push_child(node.clone());
        }

        self.stack.push(node);
        self
    }

    /// Adds each entry as [`TreeBuilder::add_entry`] would, in order.
    pub fn add_all<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Entry<T>>,
    {
        for entry in entries {
            self.add_entry(entry.into());
        }
        self
    }

    /// Adds a node like [`TreeBuilder::add`] and moves the cursor into it.
    pub fn add_tree(&mut self, value: impl Into<T>) -> &mut Self {
        self.add_tree_entry(Entry::value(value))
    }

    pub fn add_tree_prefixed(
        &mut self,
        value: impl Into<T>,
        prefix: impl Into<String>,
    ) -> &mut Self {
        self.add_tree_entry(Entry::prefixed(value, prefix))
    }

    pub fn add_tree_entry(&mut self, entry: Entry<T>) -> &mut Self {
        self.add_entry(entry);
        self.current = self.stack.last();
        debug!("descended, depth of stack: {}", self.stack.len());
        self
    }

    /// Moves the cursor to its parent, or to the head if it has none.
    #[instrument(level = "debug", skip(self))]
    pub fn up(&mut self) -> TreeResult<&mut Self> {
        let current = self.current()?;
        self.stack.free(Some(&current), self.head.get());

        let target = match current.parent() {
            Some(parent) => parent,
            None => self.head()?,
        };
        self.set_current(&target);
        Ok(self)
    }

    /// Moves the cursor to its next sibling.
    ///
    /// Returns `None` and leaves the cursor in place at the head or at the last sibling.
    pub fn next(&mut self) -> Option<&mut Self> {
        self.step(Step::Next)
    }

    /// Moves the cursor to its previous sibling.
    pub fn prev(&mut self) -> Option<&mut Self> {
        self.step(Step::Prev)
    }

    fn step(&mut self, step: Step) -> Option<&mut Self> {
        let current = self.current.as_ref()?;
        let sibling = match step {
            Step::Next => current.next_sibling(),
            Step::Prev => current.prev_sibling(),
        }?;
        self.current = Some(sibling);
        Some(self)
    }

    /// Points the cursor at `node` if it belongs to this tree; otherwise does nothing.
    pub fn set_current(&mut self, node: &TreeNode<T>) -> &mut Self {
        if self.exists(node) {
            self.current = Some(node.clone());
        } else {
            debug!("ignoring cursor move to a node outside the tree");
        }
        self
    }

    pub fn current(&self) -> TreeResult<TreeNode<T>> {
        self.current.clone().ok_or(TreeError::EmptyTree)
    }

    /// Finds a node reachable from the head.
    ///
    /// Reference, prefix and identity matches win over value matches; among value
    /// matches the first in pre-order is returned.
    pub fn go_to<K>(&self, key: &K) -> Option<TreeNode<T>>
    where
        K: SearchKey<T> + ?Sized,
    {
        search(self.head.get(), key)
    }

    pub fn exists(&self, node: &TreeNode<T>) -> bool {
        self.go_to(node).is_some()
    }

    pub fn child_count(&self) -> usize {
        self.current.as_ref().map_or(0, TreeNode::child_count)
    }

    pub fn first_child(&self) -> Option<TreeNode<T>> {
        self.current.as_ref()?.first_child()
    }

    pub fn last_child(&self) -> Option<TreeNode<T>> {
        self.current.as_ref()?.last_child()
    }

    /// Calls `callback` for every node, pre-order from the head.
    ///
    /// Changing the tree structure through node handles from inside the callback is
    /// not supported; the visiting order is then unspecified.
    pub fn each<F>(&self, mut callback: F)
    where
        F: FnMut(&TreeNode<T>),
    {
        for node in self.iter() {
            callback(&node);
        }
    }

    pub fn iter(&self) -> TreeIterator<T> {
        TreeIterator::new(self.head.get().cloned())
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<T> {
        PostOrderIterator::new(self.head.get().cloned())
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn depth(&self) -> usize {
        self.head.get().map_or(0, TreeNode::depth)
    }

    pub fn leaf_nodes(&self) -> Vec<TreeNode<T>> {
        self.head.get().map(TreeNode::leaf_nodes).unwrap_or_default()
    }

    /// Removes the cursor node with its subtree and moves the cursor to its parent.
    ///
    /// Removing the head empties the builder.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self) -> bool {
        let Some(current) = self.current.clone() else {
            return false;
        };
        self.stack.clear();

        match current.parent() {
            Some(parent) => {
                parent.remove_child(&current);
                self.current = Some(parent);
                true
            }
            None if self.head.is(&current) => {
                debug!("removing head, builder is empty now");
                self.head.clear();
                self.current = None;
                true
            }
            None => {
                self.current = self.head.get().cloned();
                false
            }
        }
    }

    /// Removes `child` from the cursor node, or every child when `None`.
    #[instrument(level = "debug", skip_all)]
    pub fn remove_child(&mut self, child: Option<&TreeNode<T>>) -> bool {
        let Some(current) = self.current.clone() else {
            return false;
        };

        let before = current.child_count();
        match child {
            Some(child) => current.remove_child(child),
            None => current.remove_children(&[]),
        };
        let removed = current.child_count() != before;
        if removed {
            self.stack.clear();
        }
        removed
    }
}

impl<T> Head<T> for TreeBuilder<T> {
    fn head(&self) -> TreeResult<TreeNode<T>> {
        self.head.get().cloned().ok_or(TreeError::EmptyTree)
    }

    fn set_head(&mut self, node: TreeNode<T>) -> &mut Self {
        debug!("new head {}", node.identity().short(8));
        self.head.set(node);
        self.current = self.head.get().cloned();
        self.stack.free(None, None);
        self
    }

    fn rewind(&mut self) -> TreeResult<&mut Self> {
        self.current = Some(self.head()?);
        Ok(self)
    }

    fn is_head(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| self.head.is(current))
    }

    fn is_empty(&self) -> bool {
        self.head.is_empty()
    }
}
