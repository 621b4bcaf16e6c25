//! Arena node representation.
//!
//! Nodes live in a slot vector owned by the tree. A parent refers to its
//! children by [`NodeHandle`]; there are no back-pointers and no sharing,
//! so the only way to reach a node is by descending from the root.

use std::fmt;

/// Stable identity of a node inside one [`BinarySearchTree`].
///
/// Handles are slot indices that are never recycled: once a node is
/// deleted its slot stays empty, so a handle can be used as an identity
/// key for as long as the tree lives.
///
/// [`BinarySearchTree`]: super::BinarySearchTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u32);

impl NodeHandle {
    pub(super) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Slot index in the owning arena.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    /// Key stored at this node.
    pub value: T,
    pub(super) left: Option<NodeHandle>,
    pub(super) right: Option<NodeHandle>,
}

impl<T> TreeNode<T> {
    pub(super) fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Left child (all values strictly less than this node's).
    #[inline]
    #[must_use]
    pub fn left(&self) -> Option<NodeHandle> {
        self.left
    }

    /// Right child (all values greater than or equal to this node's).
    #[inline]
    #[must_use]
    pub fn right(&self) -> Option<NodeHandle> {
        self.right
    }

    /// Whether both child slots are occupied.
    #[inline]
    #[must_use]
    pub fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Whether neither child slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
