//! This crate exposes a Binary Search Tree (BST) of integer keys whose nodes
//! keep a link back to their parent, along with the order-statistics queries
//! such a tree makes cheap.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. The tree in this crate does no balancing, so
//! inserting keys in sorted order produces a chain whose height is `N - 1`.
//! Every traversal here is iterative for that reason.
//!
//! ## Parent links
//!
//! Each `Node` also knows its parent. That makes it possible to step from
//! any node to its in-order successor or predecessor without a stack, which
//! is what [`linked::Tree::successor`] and [`linked::Tree::predecessor`] do.
//! Nodes are owned by an arena inside the [`linked::Tree`]; parent and child
//! links are plain [`linked::NodeId`] handles, so nothing is owned twice.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod linked;
pub(crate) mod util;

pub use linked::{Iter, NodeId, Tree};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
