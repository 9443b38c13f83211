//! An unbalanced BST of `i32` keys where every node links back to its parent.
//!
//! Nodes live in an arena owned by the [`Tree`] and are addressed by [`NodeId`]s. A `NodeId` is
//! only a handle: once the node it names is removed, every query through it returns `None`.
//!
//! # Examples
//!
//! ```
//! use linked_bst::linked::Tree;
//!
//! let mut tree: Tree = [7, 4, 9, 2, 5].into_iter().collect();
//!
//! // Inserting an existing key does nothing.
//! assert!(!tree.insert(4));
//!
//! let seven = tree.search(7).unwrap();
//! let after_seven = tree.successor(seven).unwrap();
//! assert_eq!(tree.key(after_seven), Some(9));
//!
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.width(), 7);
//! assert_eq!(tree.to_string(), "<7 <4 <2 <><>><5 <><>>><9 <><>>>");
//!
//! // Removing a node with two children keeps the tree ordered.
//! assert!(tree.remove(4));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![2, 5, 7, 9]);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::iter::FusedIterator;

use generational_arena::{Arena, Index};
use log::{debug, trace};

use crate::util::Side;

/// A handle to a node in a [`Tree`]. Handles are cheap to copy and stay valid until the node they
/// name is removed. Using a handle with a tree it didn't come from is allowed but meaningless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

#[derive(Clone, Debug)]
struct Node {
    key: i32,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn new(key: i32, parent: Option<NodeId>) -> Self {
        Self {
            key,
            parent,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// An unbalanced Binary Search Tree of distinct `i32` keys. This can be used for inserting,
/// searching, and removing keys, and for order-statistics queries (extremes, neighbours, height,
/// node count, width, density) over the whole tree or any subtree.
#[derive(Clone)]
pub struct Tree {
    nodes: Arena<Node>,
    root: Option<NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("len", &self.len())
            .field("shape", &format_args!("{}", self))
            .finish()
    }
}

/// Writes the tree in pre-order: each subtree is `<`, then the node's key and a space followed by
/// its left and right subtrees, then `>`. An empty subtree is `<>`.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_subtree(f, self.root)
    }
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key, invalidating every outstanding [`NodeId`].
    pub fn clear(&mut self) {
        // `Arena::clear` keeps the generation, which would let old handles alias new nodes.
        self.nodes.retain(|_, _| false);
        self.root = None;
    }

    /// The root node, if the tree is not empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The key stored in `node`.
    pub fn key(&self, node: NodeId) -> Option<i32> {
        self.node(node).map(|n| n.key)
    }

    /// The node holding `node` as a child. `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// The root of `node`'s left subtree.
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.left)
    }

    /// The root of `node`'s right subtree.
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.right)
    }

    /// Inserts `key` as a new leaf and returns `true`. If the key is already present nothing
    /// changes and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: i32) -> bool {
        let Some(mut current) = self.root else {
            debug!("inserting {} as the root", key);
            self.root = Some(self.alloc(key, None));
            return true;
        };

        loop {
            let Some(node) = self.node(current) else {
                debug_assert!(false, "dangling link while inserting {}", key);
                return false;
            };
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    trace!("{} is already present", key);
                    return false;
                }
                Ordering::Greater => Side::Right,
            };

            match node.child(side) {
                Some(child) => {
                    trace!("descending {:?} of {} looking for {}", side, node.key, key);
                    current = child;
                }
                None => {
                    let leaf = self.alloc(key, Some(current));
                    if let Some(parent) = self.node_mut(current) {
                        *parent.child_mut(side) = Some(leaf);
                    }

                    if cfg!(debug_assertions) {
                        let parent = self.node(current).map(|n| n.key);
                        match side {
                            Side::Left => assert!(parent > Some(key)),
                            Side::Right => assert!(parent < Some(key)),
                        }
                    }
                    return true;
                }
            }
        }
    }

    /// Removes the node holding `key` and returns `true`. If the tree does not contain the key,
    /// nothing happens and `false` is returned.
    ///
    /// A node with two children is not unlinked itself: it takes its in-order successor's key and
    /// the successor's node is unlinked instead. The removed key's [`NodeId`] therefore stays
    /// valid (now naming the successor key) and the successor's `NodeId` goes stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree: Tree = [2, 1, 3].into_iter().collect();
    /// let root = tree.root().unwrap();
    ///
    /// assert!(tree.remove(2));
    /// assert!(!tree.remove(2));
    ///
    /// assert_eq!(tree.root(), Some(root));
    /// assert_eq!(tree.key(root), Some(3));
    /// ```
    pub fn remove(&mut self, key: i32) -> bool {
        let Some(target) = self.search(key) else {
            trace!("{} is not present, nothing to remove", key);
            return false;
        };
        let Some(node) = self.node(target) else {
            return false;
        };

        let doomed = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // The leftmost node of the right subtree has no left child, so it can be spliced.
                let successor = self.extreme(right, Side::Left).unwrap_or(right);
                let Some(successor_key) = self.key(successor) else {
                    debug_assert!(false, "dangling successor while removing {}", key);
                    return false;
                };
                debug!("removing {} by taking its successor {}", key, successor_key);
                if let Some(node) = self.node_mut(target) {
                    node.key = successor_key;
                }
                successor
            }
            _ => target,
        };

        self.splice_out(doomed);
        true
    }

    /// Finds the node holding `key`.
    pub fn search(&self, key: i32) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id)?;
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: i32) -> bool {
        self.search(key).is_some()
    }

    /// The node with the smallest key in the subtree rooted at `node`. `O(h)`.
    pub fn minimum(&self, node: NodeId) -> Option<NodeId> {
        self.extreme(node, Side::Left)
    }

    /// The node with the largest key in the subtree rooted at `node`. `O(h)`.
    pub fn maximum(&self, node: NodeId) -> Option<NodeId> {
        self.extreme(node, Side::Right)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<i32> {
        self.root
            .and_then(|root| self.minimum(root))
            .and_then(|n| self.key(n))
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<i32> {
        self.root
            .and_then(|root| self.maximum(root))
            .and_then(|n| self.key(n))
    }

    /// The node holding the next larger key after `node`'s, or `None` if `node` holds the
    /// largest key. `O(h)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree = [7, 4, 9, 2, 5, 6].into_iter().collect();
    ///
    /// // No right child: climb until we come up from a left child.
    /// let six = tree.search(6).unwrap();
    /// assert_eq!(tree.successor(six).and_then(|n| tree.key(n)), Some(7));
    ///
    /// let nine = tree.search(9).unwrap();
    /// assert_eq!(tree.successor(nine), None);
    /// ```
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.neighbour(node, Side::Right)
    }

    /// The node holding the next smaller key before `node`'s, or `None` if `node` holds the
    /// smallest key. `O(h)`.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.neighbour(node, Side::Left)
    }

    /// The number of edges on the longest path from the root down to a leaf. A tree with only a
    /// root has height 0 and an empty tree has height -1.
    pub fn height(&self) -> isize {
        self.root.map_or(-1, |root| self.subtree_height(root))
    }

    /// Like [`Tree::height`] for the subtree rooted at `node`. -1 if `node` is stale.
    pub fn subtree_height(&self, node: NodeId) -> isize {
        let mut deepest = -1;
        self.walk(node, |_, depth| deepest = deepest.max(depth as isize));
        deepest
    }

    /// The number of nodes in the subtree rooted at `node`. 0 if `node` is stale. For the root
    /// this equals [`Tree::len`], which is `O(1)` instead of `O(n)`.
    pub fn node_count(&self, node: NodeId) -> usize {
        let mut count = 0;
        self.walk(node, |_, _| count += 1);
        count
    }

    /// The largest key minus the smallest key. 0 for an empty tree.
    pub fn width(&self) -> i64 {
        self.root.map_or(0, |root| self.subtree_width(root))
    }

    /// Like [`Tree::width`] for the subtree rooted at `node`. 0 if `node` is stale.
    pub fn subtree_width(&self, node: NodeId) -> i64 {
        let min = self.minimum(node).and_then(|n| self.key(n));
        let max = self.maximum(node).and_then(|n| self.key(n));
        match (min, max) {
            (Some(min), Some(max)) => i64::from(max) - i64::from(min),
            _ => 0,
        }
    }

    /// How full the tree is: its node count divided by the node count of a complete tree of the
    /// same height. 1.0 for a complete tree, 0.0 for an empty one.
    pub fn density(&self) -> f64 {
        self.root.map_or(0.0, |root| self.subtree_density(root))
    }

    /// Like [`Tree::density`] for the subtree rooted at `node`. 0.0 if `node` is stale.
    pub fn subtree_density(&self, node: NodeId) -> f64 {
        let count = self.node_count(node);
        if count == 0 {
            return 0.0;
        }

        let levels = (self.subtree_height(node) + 1) as f64;
        let capacity = levels.exp2() - 1.0;
        count as f64 / capacity
    }

    /// Iterates the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(tree.iter().rev().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            front: self.root.and_then(|root| self.minimum(root)),
            back: self.root.and_then(|root| self.maximum(root)),
            remaining: self.len(),
        }
    }

    /// The bracketed pre-order form of the subtree rooted at `node`, as written by the tree's
    /// `Display` implementation. A stale `node` prints as an empty subtree.
    pub fn display_subtree(&self, node: NodeId) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_subtree(&mut out, Some(node));
        out
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn alloc(&mut self, key: i32, parent: Option<NodeId>) -> NodeId {
        NodeId(self.nodes.insert(Node::new(key, parent)))
    }

    /// Follows `side` links from `node` until there are none left.
    fn extreme(&self, node: NodeId, side: Side) -> Option<NodeId> {
        let mut current = node;
        while let Some(next) = self.node(current)?.child(side) {
            current = next;
        }
        Some(current)
    }

    /// The in-order neighbour of `node` towards `side`: `Right` is the successor, `Left` the
    /// predecessor.
    fn neighbour(&self, node: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.node(node)?.child(side) {
            return self.extreme(child, side.opposite());
        }

        // Climb while we're coming up from the `side` child. The first ancestor we reach from
        // the other side is the neighbour.
        let mut current = node;
        let mut parent = self.parent(current);
        while let Some(up) = parent {
            if self.node(up)?.child(side) != Some(current) {
                break;
            }
            current = up;
            parent = self.parent(up);
        }
        parent
    }

    /// Unlinks `doomed`, which must have at most one child, by handing its slot in its parent
    /// (or the root) to that child, then frees it.
    fn splice_out(&mut self, doomed: NodeId) {
        let Some(node) = self.nodes.remove(doomed.0) else {
            return;
        };
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "splicing out {} which has two children",
            node.key
        );

        let child = node.left.or(node.right);
        if let Some(child) = child.and_then(|c| self.node_mut(c)) {
            child.parent = node.parent;
        }

        match node.parent {
            Some(parent_id) => {
                let Some(parent) = self.node_mut(parent_id) else {
                    debug_assert!(false, "dangling parent of {}", node.key);
                    return;
                };
                let side = if parent.left == Some(doomed) {
                    Side::Left
                } else {
                    Side::Right
                };
                debug!(
                    "spliced {} out of the {:?} of {}",
                    node.key, side, parent.key
                );
                *parent.child_mut(side) = child;
            }
            None => {
                debug!("spliced out root {}", node.key);
                self.root = child;
            }
        }
    }

    /// Visits every node of the subtree rooted at `node` in pre-order along with its depth below
    /// `node`. Uses an explicit stack so degenerate trees can't overflow the call stack.
    fn walk(&self, node: NodeId, mut visit: impl FnMut(&Node, usize)) {
        let mut stack = vec![(node, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            visit(node, depth);
            stack.extend(node.right.map(|right| (right, depth + 1)));
            stack.extend(node.left.map(|left| (left, depth + 1)));
        }
    }

    fn write_subtree(&self, out: &mut impl Write, node: Option<NodeId>) -> fmt::Result {
        enum Step {
            Open(Option<NodeId>),
            Close,
        }

        let mut stack = vec![Step::Open(node)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Close => out.write_char('>')?,
                Step::Open(id) => {
                    out.write_char('<')?;
                    match id.and_then(|id| self.node(id)) {
                        Some(node) => {
                            write!(out, "{} ", node.key)?;
                            stack.push(Step::Close);
                            stack.push(Step::Open(node.right));
                            stack.push(Step::Open(node.left));
                        }
                        None => out.write_char('>')?,
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<i32> for Tree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for Tree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An ascending iterator over a [`Tree`]'s keys. It steps with [`Tree::successor`] from the front
/// and [`Tree::predecessor`] from the back.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    tree: &'a Tree,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(id);
        self.tree.key(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(id);
        self.tree.key(id)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
