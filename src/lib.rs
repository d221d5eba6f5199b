//! Package implement an ordered set using [red-black tree][wiki-rbtree].
//!
//! [RbTree] is an ephemeral, single threaded, ordered set of comparable
//! elements:
//!
//! - Parametrised over `element-type`, which must implement [Ord].
//! - CRUD operations, via insert(), contains(), get(), delete() api.
//! - Smallest and largest element via find_min() and find_max().
//! - Full table scan, to iterate over all elements in ascending order.
//! - Nodes live in an arena, links are indices, and a shared sentinel
//!   slot stands in for every missing child and for the root's parent.
//! - Worst case O(log n) for insert, delete and lookup.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Inserting an element that compares equal to an existing one is a
//! no-op, the set never holds duplicates.
//!
//! ```
//! use rbset::RbTree;
//!
//! let mut set: RbTree<i64> = RbTree::new();
//! assert_eq!(set.is_empty(), true);
//!
//! for value in [10, 20, 15, 5, 25].iter() {
//!     set.insert(*value);
//! }
//! assert_eq!(set.len(), 5);
//! assert_eq!(*set.find_min().unwrap(), 5);
//! assert_eq!(*set.find_max().unwrap(), 25);
//!
//! let items: Vec<i64> = set.iter().cloned().collect();
//! assert_eq!(items, vec![5, 10, 15, 20, 25]);
//!
//! assert_eq!(set.delete(&15).unwrap(), 15);
//! assert!(set.delete(&15).is_err());
//! assert_eq!(set.contains(&15), false);
//! ```
//!
//! [wiki-rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(NotFound, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(IOError, writeln!(w, "{}", item));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(IOError, w.flush(), format!("flush failed"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod iter;
mod node;
mod rbtree;

pub use iter::Iter;
pub use rbtree::{RbTree, Stats};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Tree invariant is broken, returned by [RbTree::validate].
    Fatal(String, String),
    /// find_min() or find_max() on a tree without elements.
    EmptyTree(String, String),
    /// delete() of an element that is not in the tree.
    NotFound(String, String),
    /// Writer failure in print_tree().
    IOError(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            EmptyTree(p, msg) => write!(f, "{} EmptyTree: {}", p, msg),
            NotFound(p, msg) => write!(f, "{} NotFound: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
