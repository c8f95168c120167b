use crate::list::{List, ListId};
use crate::Error;
use std::fmt;
use std::fmt::Formatter;

/// A checked, detached position in a `List`.
///
/// A `Position` names one node of one list: an element, or the ghost node
/// that marks the end. It does not borrow the list, so it survives any number
/// of insertions and removals elsewhere in the list, and it can be handed
/// back to [`List::insert`], [`List::erase`] or [`List::get`] later on.
///
/// A position is *valid* while its node is still linked in the list that
/// created it. Removing the node (by [`List::erase`], a pop, [`List::clear`],
/// [`List::unique`] or [`List::merge`]) invalidates it for good, even if the
/// list later reuses the storage slot. The end position of a list is valid as
/// long as the list lives. `Position::default()` belongs to no list and is
/// never valid.
///
/// In a list with length *n*, there are *n* + 1 valid positions. Moving forward
/// from the last element reaches the end; moving backward from the end reaches
/// the last element.
///
/// # Examples
///
/// ```
/// use stable_list::{Error, List, Position};
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C # ]
/// let mut list = List::from_iter(['A', 'B', 'C']);
///
/// let mut pos = list.begin();
/// assert_eq!(list.get(pos), Ok(&'A'));
///
/// pos.move_next(&list).unwrap();
/// let b = pos;
/// pos.move_next(&list).unwrap();
/// assert_eq!(list.get(pos), Ok(&'C'));
///
/// // Erasing `B` only invalidates `b`.
/// list.erase(b).unwrap();
/// assert_eq!(list.get(b), Err(Error::InvalidIterator));
/// assert_eq!(list.get(pos), Ok(&'C'));
///
/// // The end position cannot be moved forward or read.
/// let mut end = list.end();
/// assert_eq!(end.move_next(&list), Err(Error::InvalidIterator));
/// assert_eq!(Position::default().is_valid(&list), false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub(crate) list: ListId,
    pub(crate) key: usize,
    pub(crate) stamp: u64,
}

impl Position {
    pub(crate) fn new(list: ListId, key: usize, stamp: u64) -> Self {
        Self { list, key, stamp }
    }

    /// Returns `true` if the position denotes a node (the ghost node included)
    /// that is still linked in `list`.
    pub fn is_valid<T>(&self, list: &List<T>) -> bool {
        list.locate(*self).is_ok()
    }

    /// Returns `true` if the position is the end position of `list`.
    pub fn is_end<T>(&self, list: &List<T>) -> bool {
        list.locate(*self) == Ok(list.ghost_node())
    }

    /// Move the position to the next node.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position is the end position or is not
    /// valid in `list`. The position is left unchanged.
    pub fn move_next<T>(&mut self, list: &List<T>) -> Result<(), Error> {
        *self = list.next_position(*self)?;
        Ok(())
    }

    /// Move the position to the previous node.
    ///
    /// From the end position this reaches the last element. From the first
    /// element it reaches the end position.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the position is not valid in `list`, or
    /// is the end position of an empty list. The position is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// let mut end = list.end();
    /// assert_eq!(end.move_prev(&list), Err(Error::InvalidIterator));
    ///
    /// list.push_back(1);
    /// list.push_back(2);
    /// end.move_prev(&list).unwrap();
    /// assert_eq!(list.get(end), Ok(&2));
    /// ```
    pub fn move_prev<T>(&mut self, list: &List<T>) -> Result<(), Error> {
        *self = list.prev_position(*self)?;
        Ok(())
    }
}

/// A read-only cursor over a `List`.
///
/// A `Cursor` bundles a [`Position`] with a shared borrow of its list, so it
/// can move and read without the list being passed around. It checks every
/// step the same way a `Position` does, and compares equal to a `Position`
/// (in either order) that names the same node of the same list.
///
/// # Examples
///
/// ```
/// use stable_list::{Error, List};
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D # ]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// let mut cursor = list.cursor_begin();
/// assert_eq!(cursor.current(), Ok(&'A'));
///
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Ok(&'B'));
///
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), Err(Error::InvalidIterator));
/// assert!(cursor.move_next().is_err());
///
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Ok(&'D'));
/// ```
pub struct Cursor<'a, T: 'a> {
    position: Position,
    list: &'a List<T>,
}

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, position: Position) -> Self {
        Self { position, list }
    }

    /// The position the cursor is at.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The list the cursor views.
    pub fn view(&self) -> &'a List<T> {
        self.list
    }

    /// Returns `true` if the cursor is at the ghost node.
    pub fn is_end(&self) -> bool {
        self.position.is_end(self.list)
    }

    /// Move the cursor to the next node. See [`Position::move_next`].
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.position.move_next(self.list)
    }

    /// Move the cursor to the previous node. See [`Position::move_prev`].
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.position.move_prev(self.list)
    }

    /// Provides a reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIterator`] if the cursor is at the ghost node or its
    /// position is not valid.
    pub fn current(&self) -> Result<&'a T, Error> {
        self.list.get(self.position)
    }
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a> Copy for Cursor<'a, T> {}

/// Compare cursors by the node they are at.
///
/// # Examples
/// ```
/// use stable_list::List;
/// use std::iter::FromIterator;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor_begin();
/// let mut cursor2 = cursor1;
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next().unwrap();
/// assert_ne!(cursor1, cursor2);
///
/// // A clone is a different list, so its positions differ too.
/// let another_list = list.clone();
/// assert_ne!(cursor1, another_list.cursor_begin());
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

impl<'a, T: 'a> PartialEq<Position> for Cursor<'a, T> {
    fn eq(&self, other: &Position) -> bool {
        self.position == *other
    }
}

impl<'a, T: 'a> PartialEq<Cursor<'a, T>> for Position {
    fn eq(&self, other: &Cursor<'a, T>) -> bool {
        *self == other.position
    }
}

impl<'a, T: 'a> From<Cursor<'a, T>> for Position {
    fn from(cursor: Cursor<'a, T>) -> Self {
        cursor.position
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("list", self.list)
            .field("current", &self.current().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, List, Position};
    use std::iter::FromIterator;

    #[test]
    fn position_walks_the_ring() {
        let list = List::from_iter(0..5);
        let mut pos = list.begin();
        for i in 0..5 {
            assert_eq!(list.get(pos), Ok(&i));
            pos.move_next(&list).unwrap();
        }
        assert!(pos.is_end(&list));
        assert_eq!(pos, list.end());
        assert_eq!(list.get(pos), Err(Error::InvalidIterator));
        assert_eq!(pos.move_next(&list), Err(Error::InvalidIterator));
        assert_eq!(pos, list.end());

        for i in (0..5).rev() {
            pos.move_prev(&list).unwrap();
            assert_eq!(list.get(pos), Ok(&i));
        }
        assert_eq!(pos, list.begin());
        // the ghost node precedes the first element
        pos.move_prev(&list).unwrap();
        assert_eq!(pos, list.end());
    }

    #[test]
    fn position_of_empty_list() {
        let list = List::<i32>::new();
        let mut pos = list.end();
        assert!(pos.is_valid(&list));
        assert!(pos.is_end(&list));
        assert_eq!(pos.move_next(&list), Err(Error::InvalidIterator));
        assert_eq!(pos.move_prev(&list), Err(Error::InvalidIterator));
        assert_eq!(list.get(pos), Err(Error::InvalidIterator));
    }

    #[test]
    fn default_position_is_invalid() {
        let list = List::from_iter([1]);
        let mut pos = Position::default();
        assert!(!pos.is_valid(&list));
        assert!(!pos.is_end(&list));
        assert_eq!(pos.move_next(&list), Err(Error::InvalidIterator));
        assert_eq!(pos.move_prev(&list), Err(Error::InvalidIterator));
        assert_eq!(list.get(pos), Err(Error::InvalidIterator));
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn foreign_position_is_invalid() {
        let list = List::from_iter([1, 2]);
        let other = List::from_iter([1, 2]);
        let mut pos = other.begin();
        assert!(!pos.is_valid(&list));
        assert_eq!(list.get(pos), Err(Error::InvalidIterator));
        assert_eq!(pos.move_next(&list), Err(Error::InvalidIterator));
        assert_ne!(list.end(), other.end());
    }

    #[test]
    fn cursor_and_position_compare() {
        let mut list = List::from_iter([1, 2, 3]);
        let two = {
            let mut pos = list.begin();
            pos.move_next(&list).unwrap();
            pos
        };

        {
            let mut cursor = list.cursor_begin();
            assert_eq!(cursor, list.begin());
            assert_eq!(list.begin(), cursor);
            cursor.move_next().unwrap();
            assert_eq!(cursor, two);
            assert_eq!(two, cursor);
            assert_eq!(cursor, list.cursor(two));
            assert_eq!(Position::from(cursor), two);
            assert_eq!(cursor.current(), Ok(&2));
            assert_eq!(cursor.view().len(), 3);
        }

        list.erase(two).unwrap();
        let cursor = list.cursor(two);
        assert_eq!(cursor.current(), Err(Error::InvalidIterator));
        let mut moved = cursor;
        assert_eq!(moved.move_next(), Err(Error::InvalidIterator));
        assert_eq!(moved.move_prev(), Err(Error::InvalidIterator));
    }

    #[test]
    fn cursor_end_moves_back() {
        let list = List::from_iter(['x']);
        let mut cursor = list.cursor_end();
        assert!(cursor.is_end());
        cursor.move_prev().unwrap();
        assert!(!cursor.is_end());
        assert_eq!(cursor.current(), Ok(&'x'));
        assert_eq!(format!("{:?}", cursor), "Cursor { list: ['x'], current: Some('x') }");
    }
}
