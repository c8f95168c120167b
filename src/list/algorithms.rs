use crate::list::List;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    /// Deep copy into a new list, with its own identity: no position of
    /// `self` is valid in the clone.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Clear `self`, then copy every element of `other` in order.
    ///
    /// `self` keeps its identity, so its end position stays valid.
    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements). Only the
    /// links are rewritten: elements are neither moved nor cloned, and every
    /// position keeps denoting the same element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(*n*) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a bottom-up merge sort over the node keys,
    /// followed by a single pass relinking the nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::merge_sort(self, |a, b| a.lt(b));
        self.check_ring();
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert!(v.iter().eq(&[1, 2, 3, 4, 5]));
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert!(v.iter().eq(&[5, 4, 3, 2, 1]));
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less);
        self.check_ring();
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements)
    /// and *O*(*m* \* *n* \* log(*n*)) worst-case, where the
    /// key function is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(Vec::from_iter(v), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)));
        self.check_ring();
    }

    /// Merge the sorted list `other` into this sorted list, leaving `other`
    /// empty.
    ///
    /// Both lists must be sorted in ascending order. The merge is stable:
    /// on equal elements, those already in `self` come first. Elements are
    /// moved, never cloned. Positions into `self` stay valid; positions of
    /// elements moved out of `other` become invalid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3, 5]);
    /// let mut other = List::from_iter([2, 3, 4]);
    ///
    /// list.merge(&mut other);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 3, 4, 5]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.merge_with(other, |a, b| a.lt(b));
    }

    /// Merge the list `other` into this list with a comparator function,
    /// leaving `other` empty.
    ///
    /// Both lists must be sorted by `compare`. See [`List::merge`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 3, 1]);
    /// let mut other = List::from_iter([4, 2]);
    ///
    /// list.merge_by(&mut other, |a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(list), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn merge_by<F>(&mut self, other: &mut Self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.merge_with(other, |a, b| compare(a, b) == Ordering::Less);
    }

    /// The list must not be empty.
    fn front_element(&self) -> &T {
        self.element(self.front_node())
    }

    fn merge_with<F>(&mut self, other: &mut Self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut merged = self.front_node();
        while !other.is_empty() {
            // Find the first node of `self` that the front of `other`
            // must precede.
            while merged != ghost && !less(other.front_element(), self.element(merged)) {
                merged = self.node(merged).next;
            }
            if merged == ghost {
                self.append(other);
                break;
            }
            // Move the run of `other` that precedes `merged`.
            while !other.is_empty() && less(other.front_element(), self.element(merged)) {
                if let Ok(elt) = other.pop_front() {
                    self.insert_before(merged, elt);
                }
            }
        }
        self.check_ring();
        other.check_ring();
    }

    /// Reverse the order of the list in place.
    ///
    /// Every node, the ghost node included, swaps its `next` and `prev`
    /// links. No element is moved, and every position keeps denoting the
    /// same element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let one = list.begin();
    ///
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list.iter().copied()), vec![3, 2, 1]);
    /// assert_eq!(list.get(one), Ok(&1));
    /// ```
    pub fn reverse(&mut self) {
        if self.len() < 2 {
            return;
        }
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            let current = &mut self.nodes[node];
            std::mem::swap(&mut current.next, &mut current.prev);
            // `prev` now holds the old `next`
            node = current.prev;
            if node == ghost {
                break;
            }
        }
        self.check_ring();
    }

    /// Remove consecutive repeated elements, keeping the first of each run.
    ///
    /// Only adjacent duplicates are removed; run [`List::sort`] first to
    /// remove all duplicates. Positions of removed elements become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 1, 1, 3, 3]);
    /// list.unique();
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 1, 3]);
    /// ```
    pub fn unique(&mut self)
    where
        T: PartialEq,
    {
        self.unique_by(|kept, next| kept == next)
    }

    /// Remove consecutive elements that `same` considers equal, keeping the
    /// first of each run.
    ///
    /// `same` is called with the element that is kept and the element that
    /// follows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["foo", "Foo", "bar", "BAZ", "baz"]);
    /// list.unique_by(|a, b| a.eq_ignore_ascii_case(b));
    /// assert_eq!(Vec::from_iter(list), vec!["foo", "bar", "BAZ"]);
    /// ```
    pub fn unique_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.len() < 2 {
            return;
        }
        let ghost = self.ghost_node();
        let mut kept = self.front_node();
        while kept != ghost {
            let mut next = self.node(kept).next;
            while next != ghost && same(self.element(kept), self.element(next)) {
                let following = self.node(next).next;
                drop(self.remove_node(next));
                next = following;
            }
            kept = next;
        }
        self.check_ring();
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, List};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn list_compare_and_hash() {
        let a = List::from_iter([1, 2, 3]);
        let b = List::from_iter([1, 2, 3]);
        let c = List::from_iter([1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c < a);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn sort_is_stable() {
        let mut list = List::from_iter([(1, 'a'), (1, 'b'), (0, 'c')]);
        list.sort_by_key(|&(key, _)| key);
        assert_eq!(Vec::from_iter(list), vec![(0, 'c'), (1, 'a'), (1, 'b')]);

        let mut list = List::from_iter([(2, 'x'), (1, 'a'), (2, 'y'), (1, 'b'), (0, 'z')]);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            Vec::from_iter(list),
            vec![(0, 'z'), (1, 'a'), (1, 'b'), (2, 'x'), (2, 'y')]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let mut list = List::from_iter([9, 3, 7, 3, 1, 8, 2, 2, 0]);
        list.sort();
        let once = list.clone();
        list.sort();
        assert_eq!(list, once);
        assert!(list.iter().eq(&[0, 1, 2, 2, 3, 3, 7, 8, 9]));
        list.assert_ring();
    }

    #[test]
    fn sort_keeps_positions() {
        let mut list = List::new();
        let three = list.push_back(3);
        let one = list.push_back(1);
        let two = list.push_back(2);
        let end = list.end();
        list.sort();
        assert_eq!(list.begin(), one);
        assert_eq!(list.get(three), Ok(&3));
        let mut pos = one;
        pos.move_next(&list).unwrap();
        assert_eq!(pos, two);
        pos.move_next(&list).unwrap();
        assert_eq!(pos, three);
        pos.move_next(&list).unwrap();
        assert_eq!(pos, end);
    }

    #[test]
    fn sort_short_lists() {
        let mut list = List::<i32>::new();
        list.sort();
        assert!(list.is_empty());
        list.push_back(1);
        list.sort();
        assert!(list.iter().eq(&[1]));
        list.assert_ring();
    }

    #[test]
    fn merge_sorted_lists() {
        let mut list = List::new();
        list.push_back((1, 'l'));
        let three = list.push_back((3, 'l'));
        list.push_back((5, 'l'));
        let mut other = List::from_iter([(2, 'r'), (3, 'r'), (4, 'r')]);
        let moved = other.begin();
        let other_end = other.end();

        list.merge_by(&mut other, |a, b| a.0.cmp(&b.0));
        assert_eq!(
            Vec::from_iter(list.iter().copied()),
            vec![(1, 'l'), (2, 'r'), (3, 'l'), (3, 'r'), (4, 'r'), (5, 'l')]
        );
        assert!(other.is_empty());
        assert_eq!(list.len(), 6);
        assert_eq!(list.get(three), Ok(&(3, 'l')));
        assert_eq!(other.get(moved), Err(Error::InvalidIterator));
        assert_eq!(list.get(moved), Err(Error::InvalidIterator));
        assert!(other_end.is_end(&other));
        list.assert_ring();
        other.assert_ring();
    }

    #[test]
    fn merge_edge_cases() {
        let mut list = List::from_iter([1, 3, 5]);
        let mut other = List::from_iter([2, 3, 4]);
        list.merge(&mut other);
        assert!(list.iter().eq(&[1, 2, 3, 3, 4, 5]));
        assert!(other.is_empty());

        // merging an empty list changes nothing
        list.merge(&mut List::new());
        assert!(list.iter().eq(&[1, 2, 3, 3, 4, 5]));

        // into an empty list
        let mut empty = List::new();
        empty.merge(&mut list);
        assert!(empty.iter().eq(&[1, 2, 3, 3, 4, 5]));
        assert!(list.is_empty());

        // every element of `other` goes first, or last
        let mut list = List::from_iter([5, 6]);
        list.merge(&mut List::from_iter([1, 2]));
        assert!(list.iter().eq(&[1, 2, 5, 6]));
        list.merge(&mut List::from_iter([7, 8]));
        assert!(list.iter().eq(&[1, 2, 5, 6, 7, 8]));
        assert_eq!(list.len(), 6);
        list.assert_ring();
    }

    #[test]
    fn reverse_twice() {
        let mut list = List::from_iter(0..7);
        let first = list.begin();
        let end = list.end();
        list.reverse();
        assert!(list.iter().copied().eq((0..7).rev()));
        assert!(list.iter().rev().copied().eq(0..7));
        assert_eq!(list.front(), Ok(&6));
        assert_eq!(list.back(), Ok(&0));
        assert_eq!(list.end(), end);
        let mut last = end;
        last.move_prev(&list).unwrap();
        assert_eq!(last, first);
        list.assert_ring();

        list.reverse();
        assert!(list.iter().copied().eq(0..7));
        list.assert_ring();
    }

    #[test]
    fn reverse_short_lists() {
        let mut list = List::<i32>::new();
        list.reverse();
        assert!(list.is_empty());
        list.push_back(1);
        list.reverse();
        assert!(list.iter().eq(&[1]));
        list.push_back(2);
        list.reverse();
        assert!(list.iter().eq(&[2, 1]));
        list.assert_ring();
    }

    #[test]
    fn unique_consecutive_runs() {
        let mut list = List::from_iter([1, 1, 2, 1, 1, 3, 3]);
        let first = list.begin();
        let mut second = first;
        second.move_next(&list).unwrap();
        list.unique();
        assert!(list.iter().eq(&[1, 2, 1, 3]));
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(first), Ok(&1));
        assert_eq!(list.get(second), Err(Error::InvalidIterator));
        list.assert_ring();

        let mut list = List::from_iter([4, 4, 4]);
        list.unique();
        assert!(list.iter().eq(&[4]));

        let mut list = List::<i32>::new();
        list.unique();
        assert!(list.is_empty());
    }

    #[test]
    fn contains() {
        let list = List::from_iter(["a", "b"]);
        assert!(list.contains(&"b"));
        assert!(!list.contains(&"c"));
    }
}
