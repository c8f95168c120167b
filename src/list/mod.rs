use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use slab::Slab;

use crate::list::position::{Cursor, Position};
use crate::{Error, IntoIter, Iter, IterMut};

pub mod iterator;
pub mod position;

mod algorithms;
// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests;

/// The `List` is a doubly-linked list with owned nodes, implemented as a cyclic list.
/// It allows inserting, removing elements at any given position in constant time.
/// In compromise, accessing or mutating elements at any position take *O*(*n*) time.
///
/// The `List` contains:
/// - a slab `nodes` holding every node of the ring, addressed by stable keys;
/// - the key `ghost` of the ghost node, which carries no element;
/// - a length field `len` indicating the number of elements;
/// - an identity `id`, which every [`Position`] handed out by the list records.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    pub(crate) nodes: Slab<Node<T>>,
    ghost: usize,
    /// the length of the list
    pub(crate) len: usize,
    pub(crate) id: ListId,
    /// the stamp of the most recently created node
    stamp: u64,
}

/// Identity of a list instance. `ListId(0)` is owned by no list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct ListId(u64);

impl ListId {
    fn fresh() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        ListId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) struct Node<T> {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    /// Distinguishes this node from earlier nodes that lived under the same key.
    pub(crate) stamp: u64,
    pub(crate) payload: Payload<T>,
}

pub(crate) enum Payload<T> {
    Ghost,
    Element(T),
}

impl<T> Node<T> {
    /// A node linked to itself, which is the whole ring of an empty list
    /// when it is the ghost node.
    fn detached(key: usize, stamp: u64, payload: Payload<T>) -> Self {
        Node {
            next: key,
            prev: key,
            stamp,
            payload,
        }
    }

    #[cfg(any(test, feature = "ring-checks"))]
    pub(crate) fn is_ghost(&self) -> bool {
        matches!(self.payload, Payload::Ghost)
    }

    pub(crate) fn element(&self) -> &T {
        match &self.payload {
            Payload::Element(element) => element,
            Payload::Ghost => unreachable!("the ghost node carries no element"),
        }
    }

    pub(crate) fn element_mut(&mut self) -> &mut T {
        match &mut self.payload {
            Payload::Element(element) => element,
            Payload::Ghost => unreachable!("the ghost node carries no element"),
        }
    }

    fn into_element(self) -> T {
        match self.payload {
            Payload::Element(element) => element,
            Payload::Ghost => unreachable!("the ghost node carries no element"),
        }
    }
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> usize {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> usize {
        self.nodes[self.ghost].next
    }
    pub(crate) fn back_node(&self) -> usize {
        self.nodes[self.ghost].prev
    }
    pub(crate) fn node(&self, key: usize) -> &Node<T> {
        &self.nodes[key]
    }
    pub(crate) fn element(&self, key: usize) -> &T {
        self.nodes[key].element()
    }

    pub(crate) fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Link the detached node `node` into the ring, right before `next`.
    ///
    /// `next` must be a live node of this list (the ghost node included).
    pub(crate) fn attach_node(&mut self, next: usize, node: usize) {
        let prev = self.nodes[next].prev;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Unlink `node` from the ring without releasing it.
    ///
    /// `node` must be a live element node of this list, never the ghost node.
    pub(crate) fn detach_node(&mut self, node: usize) {
        debug_assert_ne!(node, self.ghost, "Cannot detach the ghost node");
        let (prev, next) = (self.nodes[node].prev, self.nodes[node].next);
        self.connect(prev, next);
        self.len -= 1;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
    }

    /// Allocate a detached node holding `element`.
    fn new_node(&mut self, element: T) -> usize {
        self.stamp += 1;
        let entry = self.nodes.vacant_entry();
        let key = entry.key();
        entry.insert(Node::detached(key, self.stamp, Payload::Element(element)));
        key
    }

    /// Release a detached node and hand back its element.
    fn release_node(&mut self, node: usize) -> T {
        self.nodes.remove(node).into_element()
    }

    pub(crate) fn insert_before(&mut self, next: usize, element: T) -> Position {
        let node = self.new_node(element);
        self.attach_node(next, node);
        self.position_of(node)
    }

    pub(crate) fn remove_node(&mut self, node: usize) -> T {
        self.detach_node(node);
        self.release_node(node)
    }

    /// Rebuild the ring so that it visits the element nodes in `order`.
    ///
    /// `order` must hold every element node of the list exactly once.
    pub(crate) fn relink(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.len);
        let mut prev = self.ghost;
        for &node in order {
            self.connect(prev, node);
            prev = node;
        }
        self.connect(prev, self.ghost);
    }

    pub(crate) fn position_of(&self, node: usize) -> Position {
        Position::new(self.id, node, self.nodes[node].stamp)
    }

    /// Resolve `pos` to a node of this list, the ghost node included.
    pub(crate) fn locate(&self, pos: Position) -> Result<usize, Error> {
        if pos.list != self.id {
            return Err(Error::InvalidIterator);
        }
        match self.nodes.get(pos.key) {
            Some(node) if node.stamp == pos.stamp => Ok(pos.key),
            _ => Err(Error::InvalidIterator),
        }
    }

    /// Resolve `pos` to an element node of this list.
    pub(crate) fn locate_element(&self, pos: Position) -> Result<usize, Error> {
        match self.locate(pos)? {
            node if node == self.ghost => Err(Error::InvalidIterator),
            node => Ok(node),
        }
    }

    pub(crate) fn next_position(&self, pos: Position) -> Result<Position, Error> {
        let node = self.locate_element(pos)?;
        Ok(self.position_of(self.nodes[node].next))
    }

    pub(crate) fn prev_position(&self, pos: Position) -> Result<Position, Error> {
        let node = self.locate(pos)?;
        if node == self.ghost && self.is_empty() {
            return Err(Error::InvalidIterator);
        }
        Ok(self.position_of(self.nodes[node].prev))
    }

    /// Full ring validation, enabled by `feature = "ring-checks"`.
    #[inline]
    pub(crate) fn check_ring(&self) {
        #[cfg(feature = "ring-checks")]
        self.assert_ring();
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use stable_list::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `List` with room for `capacity` elements before
    /// reallocating its node storage.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity + 1);
        let entry = nodes.vacant_entry();
        let ghost = entry.key();
        entry.insert(Node::detached(ghost, 0, Payload::Ghost));
        Self {
            nodes,
            ghost,
            len: 0,
            id: ListId::fresh(),
            stamp: 0,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`, front to back.
    ///
    /// Positions of removed elements become invalid; the end position stays valid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Ok(&1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), Err(Error::EmptyContainer));
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(self.element(self.front_node()))
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(1);
    ///
    /// if let Ok(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Ok(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let front = self.front_node();
        Ok(self.nodes[front].element_mut())
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(self.element(self.back_node()))
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let back = self.back_node();
        Ok(self.nodes[back].element_mut())
    }

    /// Adds an element first in the list, and returns its position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// let one = list.push_front(1);
    /// assert_eq!(list.get(one), Ok(&1));
    /// assert_eq!(one, list.begin());
    /// ```
    pub fn push_front(&mut self, elt: T) -> Position {
        self.insert_before(self.front_node(), elt)
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), Err(Error::EmptyContainer));
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// ```
    pub fn pop_front(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(self.remove_node(self.front_node()))
    }

    /// Appends an element to the back of a list, and returns its position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) -> Position {
        self.insert_before(self.ghost_node(), elt)
    }

    /// Removes the last element from a list and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the list is empty.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(self.remove_node(self.back_node()))
    }

    /// The position of the first element, or the end position if the list
    /// is empty.
    #[inline]
    pub fn begin(&self) -> Position {
        self.position_of(self.front_node())
    }

    /// The end position, denoted by the ghost node. It stays valid for the
    /// whole life of the list.
    #[inline]
    pub fn end(&self) -> Position {
        self.position_of(self.ghost_node())
    }

    /// Provides a reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `pos` is the end position, belongs to
    /// another list, or denotes a removed element.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// let pos = list.push_back('a');
    /// assert_eq!(list.get(pos), Ok(&'a'));
    /// assert_eq!(list.get(list.end()), Err(Error::InvalidIterator));
    /// ```
    pub fn get(&self, pos: Position) -> Result<&T, Error> {
        let node = self.locate_element(pos)?;
        Ok(self.element(node))
    }

    /// Provides a mutable reference to the element at `pos`.
    ///
    /// # Errors
    ///
    /// See [`List::get`].
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, Error> {
        let node = self.locate_element(pos)?;
        Ok(self.nodes[node].element_mut())
    }

    /// Inserts `elt` right before `pos`, and returns the position of the new
    /// element. Inserting before the end position appends to the list.
    ///
    /// Every other position stays valid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if `pos` belongs to another list or denotes
    /// a removed element. The list is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3]);
    /// let mut pos = list.begin();
    /// pos.move_next(&list).unwrap();
    ///
    /// let two = list.insert(pos, 2).unwrap();
    /// assert_eq!(list.get(two), Ok(&2));
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn insert(&mut self, pos: Position, elt: T) -> Result<Position, Error> {
        let next = self.locate(pos)?;
        Ok(self.insert_before(next, elt))
    }

    /// Removes the element at `pos`, and returns the position of the element
    /// that followed it (or the end position).
    ///
    /// Only `pos` itself, and copies of it, become invalid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyContainer`] if the list is empty, checked first;
    /// - [`Error::InvalidIterator`] if `pos` is the end position, belongs to
    ///   another list, or denotes a removed element.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(['a', 'b', 'c']);
    /// let a = list.begin();
    /// let mut b = a;
    /// b.move_next(&list).unwrap();
    ///
    /// let c = list.erase(b).unwrap();
    /// assert_eq!(list.get(c), Ok(&'c'));
    /// assert_eq!(list.get(b), Err(Error::InvalidIterator));
    ///
    /// let mut after_a = a;
    /// after_a.move_next(&list).unwrap();
    /// assert_eq!(after_a, c);
    /// ```
    pub fn erase(&mut self, pos: Position) -> Result<Position, Error> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let node = self.locate_element(pos)?;
        let next = self.nodes[node].next;
        drop(self.remove_node(node));
        Ok(self.position_of(next))
    }

    /// Provides a cursor at `pos`, viewing the list immutably.
    ///
    /// The cursor is not checked on creation: an invalid `pos` gives a cursor
    /// whose every move and read fails with [`Error::InvalidIterator`].
    pub fn cursor(&self, pos: Position) -> Cursor<'_, T> {
        Cursor::new(self, pos)
    }

    /// Provides a cursor at the first element, or at the ghost node if the
    /// list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let cursor = list.cursor_begin();
    /// assert_eq!(cursor.current(), Ok(&1));
    /// ```
    pub fn cursor_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// Provides a cursor at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// assert_eq!(cursor.current(), Err(Error::InvalidIterator));
    /// cursor.move_prev().unwrap();
    /// assert_eq!(cursor.current(), Ok(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.end())
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// The elements are moved, never cloned. After this operation, `other`
    /// becomes empty, and every position into `other` other than its end
    /// position is invalid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the
    /// length of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2 = List::new();
    /// list2.push_back('b');
    /// list2.push_back('c');
    ///
    /// list1.append(&mut list2);
    ///
    /// let mut iter = list1.iter();
    /// assert_eq!(iter.next(), Some(&'a'));
    /// assert_eq!(iter.next(), Some(&'b'));
    /// assert_eq!(iter.next(), Some(&'c'));
    /// assert!(iter.next().is_none());
    ///
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let ghost = self.ghost_node();
        while let Ok(elt) = other.pop_front() {
            self.insert_before(ghost, elt);
        }
        self.check_ring();
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.nodes[prev].next, next);
        assert_eq!(self.nodes[next].prev, prev);
    }

    /// Walk the whole ring in both directions and check that it is circular,
    /// doubly consistent, and holds exactly `len` element nodes.
    #[cfg(any(test, feature = "ring-checks"))]
    pub(crate) fn assert_ring(&self) {
        assert!(self.nodes[self.ghost].is_ghost());
        let mut forward = 0;
        let mut node = self.front_node();
        while node != self.ghost {
            assert!(forward < self.len, "ring is longer than the list length");
            assert!(!self.nodes[node].is_ghost());
            assert_eq!(self.nodes[self.nodes[node].next].prev, node);
            assert_eq!(self.nodes[self.nodes[node].prev].next, node);
            forward += 1;
            node = self.nodes[node].next;
        }
        assert_eq!(forward, self.len);

        let mut backward = 0;
        let mut node = self.back_node();
        while node != self.ghost {
            assert!(backward < self.len, "ring is longer than the list length");
            backward += 1;
            node = self.nodes[node].prev;
        }
        assert_eq!(backward, self.len);
        assert_eq!(self.nodes.len(), self.len + 1);
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
