use crate::{node::NIL, rbtree::RbTree};

/// Lazy, ascending iterator over the elements of [RbTree], created
/// by [RbTree::iter].
///
/// Holds the path of nodes whose left subtree is done but which are not
/// yet yielded, so memory is bounded by the tree height.
pub struct Iter<'a, T> {
    tree: &'a RbTree<T>,
    paths: Vec<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a RbTree<T>) -> Iter<'a, T> {
        let mut paths = Vec::default();
        build_iter(tree, tree.to_root(), &mut paths);

        Iter {
            tree,
            paths,
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<T> = self.tree;

        let node = tree.to_node(self.paths.pop()?);
        build_iter(tree, node.right, &mut self.paths);
        self.remaining -= 1;

        Some(node.as_element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

// push `node` and its chain of left descendants.
fn build_iter<T>(tree: &RbTree<T>, mut node: usize, paths: &mut Vec<usize>) {
    while node != NIL {
        paths.push(node);
        node = tree.to_node(node).left;
    }
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
