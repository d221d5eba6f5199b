//! Module provide ordered-set implemented by [RbTree] type.
//!
//! RbTree is a classic [red-black tree][wiki-rbtree], the textbook variant
//! with parent links, where rebalancing after a write happens in two
//! iterative fix-up loops. Nodes are kept in an arena, `Vec<Node<T>>`,
//! slot zero being the sentinel that stands for every missing child.
//!
//! Deleted slots are recycled by later inserts. [RbTree::make_empty]
//! releases the whole arena.
//!
//! [wiki-rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt,
    io,
    iter::FromIterator,
};

use crate::{
    iter::Iter,
    node::{Node, Side, NIL},
    Error, Result,
};

/// RbTree manage a single instance of in-memory ordered-set using
/// [red-black][rbtree] tree.
///
/// [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<T> {
    nodes: Vec<Node<T>>, // nodes[NIL] is the sentinel.
    free: Vec<usize>,    // vacated slots, reused by insert.
    root: usize,
    n_count: usize, // number of elements in the tree.
}

/// Statistics gathered by [RbTree::validate].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of elements.
    pub n_count: usize,
    /// Black nodes on every path from root to sentinel, sentinel excluded.
    pub n_blacks: usize,
    /// Number of nodes on the longest path from root.
    pub depth: usize,
}

impl<T> Default for RbTree<T> {
    fn default() -> RbTree<T> {
        RbTree::new()
    }
}

impl<T> RbTree<T> {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree<T> {
        RbTree {
            nodes: vec![Node::sentinel()],
            free: Vec::default(),
            root: NIL,
            n_count: Default::default(),
        }
    }
}

/// Maintenance API.
impl<T> RbTree<T> {
    /// Return number of elements in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Remove all elements. Root is rebound to the sentinel in O(1), and
    /// the arena is truncated, which drops every element in linear time.
    pub fn make_empty(&mut self) {
        debug!("make_empty(): dropping {} elements", self.n_count);

        self.root = NIL;
        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
        self.n_count = 0;
    }

    /// Validate tree with following rules:
    ///
    /// * Root and sentinel are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Parent links match child links.
    /// * Elements are in strictly ascending order.
    ///
    /// Additionally return statistics on the tree, refer to [Stats].
    pub fn validate(&self) -> Result<Stats>
    where
        T: Ord + fmt::Debug,
    {
        if !self.nodes[NIL].is_black() {
            err_at!(Fatal, msg: "sentinel is red")?;
        }
        if !self.nodes[self.root].is_black() {
            err_at!(Fatal, msg: "root is red")?;
        }
        if self.root != NIL && self.nodes[self.root].parent != NIL {
            err_at!(Fatal, msg: "root has parent {}", self.nodes[self.root].parent)?;
        }

        let (n_count, n_blacks, depth) = self.validate_tree(self.root, false, 0, 0, 1)?;
        if n_count != self.n_count {
            err_at!(Fatal, msg: "mismatch in count {} != {}", n_count, self.n_count)?;
        }

        let mut prev: Option<&T> = None;
        for element in self.iter() {
            match prev {
                Some(prev) if prev >= element => {
                    err_at!(Fatal, msg: "sort {:?} before {:?}", prev, element)?;
                }
                _ => (),
            }
            prev = Some(element);
        }

        Ok(Stats {
            n_count,
            n_blacks,
            depth,
        })
    }

    /// Write all elements in ascending order, tab separated, followed by
    /// a newline. An empty tree writes `Empty tree`.
    pub fn print_tree<W>(&self, w: &mut W) -> Result<()>
    where
        T: fmt::Display,
        W: io::Write,
    {
        if self.is_empty() {
            return err_at!(IOError, writeln!(w, "Empty tree"));
        }
        for element in self.iter() {
            err_at!(IOError, write!(w, "{}\t", element))?;
        }
        err_at!(IOError, writeln!(w))
    }
}

/// Read API.
impl<T> RbTree<T> {
    /// Check whether an element equal to `value` is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_position(value) != NIL
    }

    /// Return the stored element that is equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find_position(value) {
            NIL => None,
            z => Some(self.nodes[z].as_element()),
        }
    }

    /// Return the smallest element, fails with [Error::EmptyTree] when
    /// there is none.
    pub fn find_min(&self) -> Result<&T> {
        if self.is_empty() {
            return err_at!(EmptyTree, msg: "find_min() on empty tree");
        }
        Ok(self.nodes[self.minimum(self.root)].as_element())
    }

    /// Return the largest element, fails with [Error::EmptyTree] when
    /// there is none.
    pub fn find_max(&self) -> Result<&T> {
        if self.is_empty() {
            return err_at!(EmptyTree, msg: "find_max() on empty tree");
        }
        Ok(self.nodes[self.maximum(self.root)].as_element())
    }

    /// Return a lazy iterator over all elements in ascending order.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self)
    }

    pub(crate) fn to_root(&self) -> usize {
        self.root
    }

    pub(crate) fn to_node(&self, idx: usize) -> &Node<T> {
        &self.nodes[idx]
    }

    fn find_position<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while node != NIL {
            let nref = &self.nodes[node];
            node = match nref.as_element().borrow().cmp(value) {
                Ordering::Greater => nref.left,
                Ordering::Less => nref.right,
                Ordering::Equal => return node,
            };
        }
        NIL
    }

    fn minimum(&self, mut node: usize) -> usize {
        while self.nodes[node].left != NIL {
            node = self.nodes[node].left;
        }
        node
    }

    fn maximum(&self, mut node: usize) -> usize {
        while self.nodes[node].right != NIL {
            node = self.nodes[node].right;
        }
        node
    }

    fn validate_tree(
        &self,
        node: usize,
        fromred: bool,
        mut n_count: usize,
        mut n_blacks: usize,
        depth: usize,
    ) -> Result<(usize, usize, usize)> {
        if node == NIL {
            return Ok((n_count, n_blacks, depth - 1));
        }
        n_count += 1;

        let nref = &self.nodes[node];
        let red = nref.is_red();
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at {}", node)?;
        }
        if !red {
            n_blacks += 1;
        }

        for child in [nref.left, nref.right].iter() {
            if *child != NIL && self.nodes[*child].parent != node {
                let parent = self.nodes[*child].parent;
                err_at!(Fatal, msg: "child {} points to {} not {}", child, parent, node)?;
            }
        }

        let (n_count, lb, ld) = self.validate_tree(nref.left, red, n_count, n_blacks, depth + 1)?;
        let (n_count, rb, rd) =
            self.validate_tree(nref.right, red, n_count, n_blacks, depth + 1)?;
        if lb != rb {
            err_at!(Fatal, msg: "unbalanced blacks {} {}", lb, rb)?;
        }

        Ok((n_count, lb, ld.max(rd)))
    }
}

/// Write API.
impl<T> RbTree<T> {
    /// Insert `element` into the set. Return false, leaving the tree
    /// untouched, if an equal element is already present.
    pub fn insert(&mut self, element: T) -> bool
    where
        T: Ord,
    {
        let (mut parent, mut node) = (NIL, self.root);
        let mut side = Side::Left;
        while node != NIL {
            parent = node;
            let nref = &self.nodes[node];
            side = match element.cmp(nref.as_element()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            node = nref.child(side);
        }

        let z = self.alloc(Node::new(element, parent));
        match parent {
            NIL => self.root = z,
            _ => self.nodes[parent].set_child(side, z),
        }
        self.n_count += 1;

        self.insert_fixup(z);
        true
    }

    /// Remove the element equal to `value` and return it. Fails with
    /// [Error::NotFound], leaving the tree untouched, if there is none.
    pub fn delete<Q>(&mut self, value: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let z = match self.find_position(value) {
            NIL => return err_at!(NotFound, msg: "delete(): element not in tree"),
            z => z,
        };

        let (zl, zr) = (self.nodes[z].left, self.nodes[z].right);
        let mut removed_black = self.nodes[z].is_black();
        let x = if zl == NIL {
            self.transplant(z, zr);
            zr
        } else if zr == NIL {
            self.transplant(z, zl);
            zl
        } else {
            let y = self.minimum(zr);
            removed_black = self.nodes[y].is_black();
            let x = self.nodes[y].right;
            if self.nodes[y].parent == z {
                // x may be the sentinel, fix-up walks up from its parent.
                self.nodes[x].parent = y;
            } else {
                self.transplant(y, x);
                self.nodes[y].right = zr;
                self.nodes[zr].parent = y;
            }
            self.transplant(z, y);
            self.nodes[y].left = zl;
            self.nodes[zl].parent = y;
            self.nodes[y].black = self.nodes[z].black;
            x
        };

        if removed_black {
            self.delete_fixup(x);
        }
        self.nodes[NIL].parent = NIL;
        self.n_count -= 1;

        Ok(self.release(z))
    }
}

impl<T> RbTree<T> {
    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> T {
        let element = match self.nodes[idx].element.take() {
            Some(element) => element,
            None => panic!("release(): slot {} is vacant, call the programmer", idx),
        };
        self.nodes[idx] = Node::sentinel();
        if self.n_count == 0 {
            self.nodes.truncate(1);
            self.free.clear();
        } else {
            self.free.push(idx);
        }
        element
    }

    #[inline]
    fn side_of(&self, parent: usize, node: usize) -> Side {
        if self.nodes[parent].left == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Point `parent`'s link at `old` to `new`, or the root when `parent`
    // is the sentinel.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new
        } else {
            let side = self.side_of(parent, old);
            self.nodes[parent].set_child(side, new)
        }
    }

    // Replace subtree at `u` with subtree at `v`, colors are untouched.
    // `v` may be the sentinel, its parent is set all the same.
    fn transplant(&mut self, u: usize, v: usize) {
        let parent = self.nodes[u].parent;
        self.replace_child(parent, u, v);
        self.nodes[v].parent = parent;
    }

    //  side == Left                     side == Right
    //
    //       x              y                 x              y
    //      / \            / \               / \            / \
    //     a   y    =>    x   c             y   c    =>    a   x
    //        / \        / \               / \                / \
    //       b   c      a   b             a   b              b   c
    //
    fn rotate(&mut self, x: usize, side: Side) {
        let y = self.nodes[x].child(side.opposite());
        if y == NIL {
            panic!("rotate(): promoting the sentinel ? Call the programmer");
        }

        let b = self.nodes[y].child(side);
        self.nodes[x].set_child(side.opposite(), b);
        if b != NIL {
            self.nodes[b].parent = x;
        }

        let parent = self.nodes[x].parent;
        self.replace_child(parent, x, y);
        self.nodes[y].parent = parent;

        self.nodes[y].set_child(side, x);
        self.nodes[x].parent = y;
    }

    fn insert_fixup(&mut self, mut z: usize) {
        while self.nodes[self.nodes[z].parent].is_red() {
            // parent is red, hence not the root, hence grandparent exists.
            let parent = self.nodes[z].parent;
            let grand = self.nodes[parent].parent;
            let side = self.side_of(grand, parent);
            let uncle = self.nodes[grand].child(side.opposite());

            if self.nodes[uncle].is_red() {
                trace!("insert_fixup(): red uncle at {}", uncle);
                self.nodes[parent].set_black();
                self.nodes[uncle].set_black();
                self.nodes[grand].set_red();
                z = grand;
                continue;
            }

            if z == self.nodes[parent].child(side.opposite()) {
                trace!("insert_fixup(): inner child {}", z);
                z = parent;
                self.rotate(z, side);
            }

            trace!("insert_fixup(): outer child {}", z);
            let parent = self.nodes[z].parent;
            let grand = self.nodes[parent].parent;
            self.nodes[parent].set_black();
            self.nodes[grand].set_red();
            self.rotate(grand, side.opposite());
        }

        let root = self.root;
        self.nodes[root].set_black();
    }

    fn delete_fixup(&mut self, mut x: usize) {
        while x != self.root && self.nodes[x].is_black() {
            let parent = self.nodes[x].parent;
            let side = self.side_of(parent, x);
            let mut sibling = self.nodes[parent].child(side.opposite());

            if self.nodes[sibling].is_red() {
                trace!("delete_fixup(): red sibling {}", sibling);
                self.nodes[sibling].set_black();
                self.nodes[parent].set_red();
                self.rotate(parent, side);
                sibling = self.nodes[parent].child(side.opposite());
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());
            if self.nodes[near].is_black() && self.nodes[far].is_black() {
                trace!("delete_fixup(): black nephews under {}", sibling);
                self.nodes[sibling].set_red();
                x = parent;
                continue;
            }

            if self.nodes[far].is_black() {
                trace!("delete_fixup(): red near nephew {}", near);
                self.nodes[near].set_black();
                self.nodes[sibling].set_red();
                self.rotate(sibling, side.opposite());
                sibling = self.nodes[parent].child(side.opposite());
            }

            trace!("delete_fixup(): red far nephew under {}", sibling);
            self.nodes[sibling].black = self.nodes[parent].black;
            self.nodes[parent].set_black();
            let far = self.nodes[sibling].child(side.opposite());
            self.nodes[far].set_black();
            self.rotate(parent, side);
            x = self.root;
        }

        self.nodes[x].set_black();
    }
}

impl<'a, T> IntoIterator for &'a RbTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for RbTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> RbTree<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RbTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(|element| {
            self.insert(element);
        });
    }
}

impl<T> fmt::Debug for RbTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
