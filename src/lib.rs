//! This crate provides a doubly-linked list with owned nodes and checked
//! positions, implemented as a cyclic list around a ghost node.
//!
//! The [`List`] allows inserting, removing elements at any given position in
//! constant time. In compromise, accessing or mutating elements at any position
//! take *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use stable_list::{Error, List};
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let two = {
//!     let mut pos = list.begin();
//!     pos.move_next(&list).unwrap();
//!     pos
//! };
//!
//! list.insert(two, 0).unwrap(); // insert 0 before 2
//! assert_eq!(list, List::from_iter([1, 0, 2, 3, 4]));
//!
//! list.sort(); // positions follow their elements
//! assert_eq!(list.get(two), Ok(&2));
//!
//! list.erase(two).unwrap(); // only `two` is invalidated
//! assert_eq!(list.get(two), Err(Error::InvalidIterator));
//! assert_eq!(list, List::from_iter([0, 1, 3, 4]));
//! ```
//!
//! # Memory Layout
//!
//! Every node lives in a slab owned by the list and links to its neighbours
//! by slab key:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                       (Ghost) Node  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢                        ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║   stamp   ║           ║   stamp   ║                        │ stamp = 0 │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │    first node              second node                            ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   nodes   ║  (the slab)
//! ╟───────────╢
//! ║    len    ║
//! ╟───────────╢
//! ║    id     ║
//! ╚═══════════╝
//!     List
//! ```
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and
//! `prev` keys point to itself. As elements are inserted into the list,
//! `ghost.next` points to the first element, and `ghost.prev` points to the last
//! element of the list.
//!
//! # Positions
//!
//! A [`Position`] records the identity of its list, the slab key of its node and
//! the stamp the node got when it was created. Stamps are never reused within a
//! list, so a position whose element was removed is detected as invalid even if
//! its slab key has since been handed to a new element. Every checked operation
//! reports misuse through [`Error`] instead of panicking.
//!
//! A [`Cursor`] pairs a position with a shared borrow of the list, for reading
//! without passing the list around.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//!
//! ```
//! use stable_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Algorithms
//!
//! - [`sort`]: stable merge sort that only relinks nodes;
//! - [`merge`]: stable merge of another sorted list, leaving it empty;
//! - [`reverse`]: in-place reversal;
//! - [`unique`]: removal of consecutive duplicates.
//!
//! Each has a `_by` variant taking a comparator. None of them invalidates a
//! position of an element that stays in the list.
//!
//! # Features
//!
//! - `ring-checks`: walk the whole ring after every algorithm and panic if a
//!   link or the length is inconsistent.
//!
//! [`sort`]: crate::List::sort
//! [`merge`]: crate::List::merge
//! [`reverse`]: crate::List::reverse
//! [`unique`]: crate::List::unique
#![forbid(unsafe_code)]

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::position::{Cursor, Position};
#[doc(inline)]
pub use list::List;

mod error;
pub mod list;
