//! Unbalanced binary search tree with pointer-rewiring deletion.
//!
//! Values strictly less than a node go left; everything else (equal values
//! included) goes right. The tree never rebalances, so its shape depends on
//! insertion order. Operations report raw mutation facts (paths, promoted
//! successor, parents) and know nothing about animation.

mod node;

pub use node::{NodeHandle, TreeNode};

/// Result of a [`BinarySearchTree::find_with_parent`] descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// The matching node, if any.
    pub node: Option<NodeHandle>,
    /// The last node visited before `node` (or before falling off the tree).
    pub parent: Option<NodeHandle>,
}

/// In-order successor promoted into a deleted node's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    /// Leftmost node of the deleted node's right subtree.
    pub successor: NodeHandle,
    /// The successor's parent before it was detached. Equal to the deleted
    /// node when the successor was its direct right child.
    pub parent: NodeHandle,
}

/// Facts about a completed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionResult<T> {
    /// Handle of the removed node. It no longer resolves.
    pub deleted: NodeHandle,
    /// Value the removed node held.
    pub value: T,
    /// Parent of the removed node, `None` when it was the root.
    pub parent: Option<NodeHandle>,
    /// Present only for the two-children case.
    pub promotion: Option<Promotion>,
}

/// Arena-backed binary search tree.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    slots: Vec<Option<TreeNode<T>>>,
    root: Option<NodeHandle>,
    len: usize,
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            root: None,
            len: 0,
        }
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root node handle.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    /// Number of live nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Resolve a handle. Returns `None` for handles of deleted nodes.
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&TreeNode<T>> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut TreeNode<T>> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    fn child_toward(
        &self,
        handle: NodeHandle,
        value: &T,
    ) -> Option<NodeHandle> {
        let node = self.get(handle)?;
        if *value < node.value {
            node.left
        } else {
            node.right
        }
    }

    /// Insert `value` at the first empty child slot on its descent path.
    pub fn insert(&mut self, value: T) -> NodeHandle {
        let parent = self.insertion_path(&value).last().copied();
        let handle = NodeHandle::from_index(self.slots.len());
        let goes_left = parent
            .and_then(|p| self.get(p))
            .is_some_and(|p| value < p.value);
        self.slots.push(Some(TreeNode::leaf(value)));
        self.len += 1;

        match parent.and_then(|p| self.get_mut(p)) {
            None => self.root = Some(handle),
            Some(p) if goes_left => p.left = Some(handle),
            Some(p) => p.right = Some(handle),
        }
        handle
    }

    /// Every node an insertion of `value` would pass through, root first.
    /// The last entry is the new node's parent.
    #[must_use]
    pub fn insertion_path(&self, value: &T) -> Vec<NodeHandle> {
        let mut path = Vec::new();
        let mut current = self.root;
        while let Some(handle) = current {
            path.push(handle);
            current = self.child_toward(handle, value);
        }
        path
    }

    /// Nodes visited while searching for `value`, root first, plus the
    /// match. The match (when found) is the last path entry.
    #[must_use]
    pub fn search_path(
        &self,
        value: &T,
    ) -> (Vec<NodeHandle>, Option<NodeHandle>) {
        let mut path = Vec::new();
        let mut current = self.root;
        while let Some(handle) = current {
            path.push(handle);
            if self.get(handle).is_some_and(|n| n.value == *value) {
                return (path, Some(handle));
            }
            current = self.child_toward(handle, value);
        }
        (path, None)
    }

    /// Path from `handle`'s right child down its left spine to the in-order
    /// successor. Empty when `handle` has no right child.
    #[must_use]
    pub fn successor_path(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        let mut path = Vec::new();
        let mut current = self.get(handle).and_then(TreeNode::right);
        while let Some(h) = current {
            path.push(h);
            current = self.get(h).and_then(TreeNode::left);
        }
        path
    }

    /// Leftmost node of the subtree rooted at `handle`.
    #[must_use]
    pub fn find_min(&self, handle: NodeHandle) -> NodeHandle {
        let mut current = handle;
        while let Some(left) = self.get(current).and_then(TreeNode::left) {
            current = left;
        }
        current
    }

    /// Descend toward `value`, tracking the last visited parent.
    #[must_use]
    pub fn find_with_parent(&self, value: &T) -> Lookup {
        let mut parent = None;
        let mut current = self.root;
        while let Some(handle) = current {
            if self.get(handle).is_some_and(|n| n.value == *value) {
                return Lookup {
                    node: Some(handle),
                    parent,
                };
            }
            parent = Some(handle);
            current = self.child_toward(handle, value);
        }
        Lookup { node: None, parent }
    }

    /// Point `parent`'s slot that currently holds `old` at `new` instead,
    /// or replace the root when `parent` is `None`.
    fn replace_child(
        &mut self,
        parent: Option<NodeHandle>,
        old: NodeHandle,
        new: Option<NodeHandle>,
    ) {
        match parent.and_then(|p| self.get_mut(p)) {
            None => self.root = new,
            Some(p) if p.left == Some(old) => p.left = new,
            Some(p) => p.right = new,
        }
    }

    /// Remove the first node holding `value`. Returns `None` (and leaves the
    /// tree untouched) when the value is absent.
    pub fn delete(&mut self, value: &T) -> Option<DeletionResult<T>> {
        let Lookup { node, parent } = self.find_with_parent(value);
        let target = node?;
        let (left, right) = {
            let n = self.get(target)?;
            (n.left, n.right)
        };

        let promotion = match (left, right) {
            (Some(_), Some(right)) => {
                let mut successor_parent = target;
                let mut successor = right;
                while let Some(next) =
                    self.get(successor).and_then(TreeNode::left)
                {
                    successor_parent = successor;
                    successor = next;
                }

                // Detach first: when the successor is the target's direct right
                // child this rewrites the target's own right slot, which the
                // successor must then inherit.
                let successor_right =
                    self.get(successor).and_then(TreeNode::right);
                self.replace_child(
                    Some(successor_parent),
                    successor,
                    successor_right,
                );

                let (left, right) = {
                    let n = self.get(target)?;
                    (n.left, n.right)
                };
                if let Some(s) = self.get_mut(successor) {
                    s.left = left;
                    s.right = right;
                }
                self.replace_child(parent, target, Some(successor));
                Some(Promotion {
                    successor,
                    parent: successor_parent,
                })
            }
            (only, None) | (None, only) => {
                self.replace_child(parent, target, only);
                None
            }
        };

        let removed = self.slots.get_mut(target.index())?.take()?;
        self.len -= 1;
        Some(DeletionResult {
            deleted: target,
            value: removed.value,
            parent,
            promotion,
        })
    }

    /// Handles in ascending value order.
    #[must_use]
    pub fn in_order(&self) -> Vec<NodeHandle> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(h) = current {
                stack.push(h);
                current = self.get(h).and_then(TreeNode::left);
            }
            let Some(h) = stack.pop() else { break };
            out.push(h);
            current = self.get(h).and_then(TreeNode::right);
        }
        out
    }

    /// Handles in breadth-first order, root first, left before right.
    #[must_use]
    pub fn level_order(&self) -> Vec<NodeHandle> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.root);
        let mut i = 0;
        while let Some(&h) = out.get(i) {
            if let Some(n) = self.get(h) {
                out.extend(n.left);
                out.extend(n.right);
            }
            i += 1;
        }
        out
    }
}

impl<T: Ord + Clone> BinarySearchTree<T> {
    /// Values visited on the way to `value`, including the match itself.
    /// `None` when the value is absent.
    #[must_use]
    pub fn find_path(&self, value: &T) -> Option<Vec<T>> {
        let (path, found) = self.search_path(value);
        found.and_then(|_| {
            path.into_iter()
                .map(|h| self.get(h).map(|n| n.value.clone()))
                .collect()
        })
    }

    /// All values in ascending order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.in_order()
            .into_iter()
            .filter_map(|h| self.get(h).map(|n| n.value.clone()))
            .collect()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            let _ = tree.insert(value);
        }
        tree
    }
}
