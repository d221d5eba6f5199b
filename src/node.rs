// Arena slot for the shared sentinel. Stands for every missing child and
// for the root's parent, it is always black.
pub const NIL: usize = 0;

/// Which child of a parent, also the direction of a rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// Node corresponds to a single element in RbTree instance. Links are
// indices into the tree's arena.
pub struct Node<T> {
    pub element: Option<T>, // None for sentinel and vacated slots.
    pub black: bool,        // store: black or red
    pub left: usize,        // store: left child
    pub right: usize,       // store: right child
    pub parent: usize,      // back-reference, not owning
}

impl<T> Node<T> {
    pub fn sentinel() -> Node<T> {
        Node {
            element: None,
            black: true,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    pub fn new(element: T, parent: usize) -> Node<T> {
        Node {
            element: Some(element),
            black: false,
            left: NIL,
            right: NIL,
            parent,
        }
    }

    pub fn as_element(&self) -> &T {
        match self.element.as_ref() {
            Some(element) => element,
            None => panic!("as_element(): sentinel has no element, call the programmer"),
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub fn set_child(&mut self, side: Side, child: usize) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        !self.black
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
