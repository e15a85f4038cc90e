//! Tree node handle with owned children and a weak parent back-reference.

use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use tracing::{instrument, trace};

use crate::domain::identity::Identity;
use crate::domain::iter::{PostOrderIterator, TreeIterator};
use crate::errors::{TreeError, TreeResult};

type WrappedNodeData<T> = Rc<RefCell<NodeData<T>>>;

/// Payload and links of a single node.
#[derive(Debug)]
pub struct NodeData<T> {
    /// Caller payload, opaque to the tree
    pub(crate) value: T,
    /// Caller label, secondary search key
    pub(crate) prefix: Option<String>,
    /// Unique token, primary search key
    pub(crate) identity: Identity,
    /// Non-owning back-reference, None for root and detached nodes
    pub(crate) parent: Option<Weak<RefCell<NodeData<T>>>>,
    /// Owned children in insertion order
    pub(crate) children: Vec<TreeNode<T>>,
}

/// Shared handle to a tree node.
///
/// Cloning the handle aliases the same node. Use [`TreeNode::duplicate`] for a
/// distinct node with a fresh identity.
pub struct TreeNode<T> {
    inner: WrappedNodeData<T>,
}

impl<T> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> TreeNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                value,
                prefix: None,
                identity: Identity::generate(),
                parent: None,
                children: Vec::new(),
            })),
        }
    }

    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Attaches initial children, failing on the first one that is already attached.
    pub fn with_children<I>(self, children: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = TreeNode<T>>,
    {
        self.add_children(children)?;
        Ok(self)
    }

    pub(crate) fn data(&self) -> Ref<'_, NodeData<T>> {
        self.inner.borrow()
    }

    pub fn value(&self) -> Ref<'_, T> {
        Ref::map(self.inner.borrow(), |data| &data.value)
    }

    pub fn set_value(&self, value: T) -> &Self {
        self.inner.borrow_mut().value = value;
        self
    }

    pub fn prefix(&self) -> Option<String> {
        self.inner.borrow().prefix.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) -> &Self {
        self.inner.borrow_mut().prefix = Some(prefix.into());
        self
    }

    pub fn clear_prefix(&self) -> &Self {
        self.inner.borrow_mut().prefix = None;
        self
    }

    pub fn identity(&self) -> Identity {
        self.inner.borrow().identity.clone()
    }

    pub fn regenerate_identity(&self) -> &Self {
        self.inner.borrow_mut().identity = Identity::generate();
        self
    }

    /// True if both handles point at the same node.
    pub fn ptr_eq(&self, other: &TreeNode<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn parent(&self) -> Option<TreeNode<T>> {
        self.inner
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| TreeNode { inner })
    }

    /// Rewires the back-reference only; the parent's child list is untouched.
    pub(crate) fn set_parent(&self, parent: Option<&TreeNode<T>>) {
        self.inner.borrow_mut().parent = parent.map(|p| Rc::downgrade(&p.inner));
    }

    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    fn is_descendant_of(&self, candidate: &TreeNode<T>) -> bool {
        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            if node.ptr_eq(candidate) {
                return true;
            }
            ancestor = node.parent();
        }
        false
    }

    /// Appends a child without precondition checks.
    pub(crate) fn push_child(&self, child: TreeNode<T>) {
        child.set_parent(Some(self));
        self.inner.borrow_mut().children.push(child);
    }

    /// Appends `child` and makes this node its parent.
    ///
    /// A node that is already attached elsewhere is rejected instead of moved, as is
    /// any node that would end up being its own ancestor.
    #[instrument(level = "trace", skip_all)]
    pub fn add_child(&self, child: TreeNode<T>) -> TreeResult<&Self> {
        if child.is_attached() {
            return Err(TreeError::AlreadyAttached(child.identity()));
        }
        if self.ptr_eq(&child) || self.is_descendant_of(&child) {
            return Err(TreeError::CycleDetected(child.identity()));
        }
        self.push_child(child);
        Ok(self)
    }

    pub fn add_children<I>(&self, children: I) -> TreeResult<&Self>
    where
        I: IntoIterator<Item = TreeNode<T>>,
    {
        for child in children {
            self.add_child(child)?;
        }
        Ok(self)
    }

    /// Removes every child whose identity equals `child`'s and detaches it.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_child(&self, child: &TreeNode<T>) -> &Self {
        let identity = child.identity();
        let removed: Vec<TreeNode<T>> = {
            let mut data = self.inner.borrow_mut();
            let (removed, kept) = std::mem::take(&mut data.children)
                .into_iter()
                .partition(|c| c.inner.borrow().identity == identity);
            data.children = kept;
            removed
        };
        trace!("removed {} child node(s)", removed.len());
        for node in &removed {
            node.set_parent(None);
        }
        self
    }

    /// Removes the children listed in `children`, matched by identity.
    ///
    /// An empty slice removes all children. Every removed node loses its parent.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_children(&self, children: &[TreeNode<T>]) -> &Self {
        let remove: HashSet<Identity> = children.iter().map(|c| c.identity()).collect();
        let removed: Vec<TreeNode<T>> = {
            let mut data = self.inner.borrow_mut();
            if remove.is_empty() {
                std::mem::take(&mut data.children)
            } else {
                let (removed, kept) = std::mem::take(&mut data.children)
                    .into_iter()
                    .partition(|c| remove.contains(&c.inner.borrow().identity));
                data.children = kept;
                removed
            }
        };
        trace!("removed {} child node(s)", removed.len());
        for node in &removed {
            node.set_parent(None);
        }
        self
    }

    /// Takes this node out of its parent's child list.
    pub fn detach(&self) -> &Self {
        match self.parent() {
            Some(parent) => {
                parent.remove_child(self);
            }
            None => self.set_parent(None),
        }
        self
    }

    pub fn children(&self) -> Vec<TreeNode<T>> {
        self.inner.borrow().children.clone()
    }

    pub fn child(&self, index: usize) -> Option<TreeNode<T>> {
        self.inner.borrow().children.get(index).cloned()
    }

    pub fn first_child(&self) -> Option<TreeNode<T>> {
        self.inner.borrow().children.first().cloned()
    }

    pub fn last_child(&self) -> Option<TreeNode<T>> {
        self.inner.borrow().children.last().cloned()
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.inner.borrow().children.is_empty()
    }

    /// Position of this node among its parent's children.
    pub fn position(&self) -> Option<usize> {
        let parent = self.parent()?;
        let index = parent
            .inner
            .borrow()
            .children
            .iter()
            .position(|c| c.ptr_eq(self));
        index
    }

    pub fn next_sibling(&self) -> Option<TreeNode<T>> {
        let index = self.position()?;
        self.parent()?.child(index + 1)
    }

    pub fn prev_sibling(&self) -> Option<TreeNode<T>> {
        let index = self.position()?.checked_sub(1)?;
        self.parent()?.child(index)
    }

    /// Number of levels in the subtree rooted here, counting this node.
    pub fn depth(&self) -> usize {
        1 + self
            .inner
            .borrow()
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Nodes without children, in pre-order.
    pub fn leaf_nodes(&self) -> Vec<TreeNode<T>> {
        self.iter().filter(|node| !node.has_children()).collect()
    }

    /// Pre-order traversal of the subtree rooted here.
    pub fn iter(&self) -> TreeIterator<T> {
        TreeIterator::new(Some(self.clone()))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<T> {
        PostOrderIterator::new(Some(self.clone()))
    }
}

impl<T: Clone> TreeNode<T> {
    /// Copy of value and prefix under a fresh identity, detached and childless.
    pub fn duplicate(&self) -> Self {
        let data = self.inner.borrow();
        let node = TreeNode::new(data.value.clone());
        node.inner.borrow_mut().prefix = data.prefix.clone();
        node
    }

    /// Copy of the whole subtree with a fresh identity on every node.
    pub fn duplicate_subtree(&self) -> Self {
        let copy = self.duplicate();
        for child in self.children() {
            copy.push_child(child.duplicate_subtree());
        }
        copy
    }
}

impl<T> PartialEq for TreeNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.borrow().identity == other.inner.borrow().identity
    }
}

impl<T> Eq for TreeNode<T> {}

impl<T> Hash for TreeNode<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.borrow().identity.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(data) => f
                .debug_struct("TreeNode")
                .field("value", &data.value)
                .field("prefix", &data.prefix)
                .field("identity", &data.identity.short(8))
                .field("children", &data.children)
                .finish(),
            Err(_) => f.write_str("TreeNode(<borrowed>)"),
        }
    }
}
