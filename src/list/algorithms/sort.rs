use crate::List;

/// Stable bottom-up merge sort over the node keys of `list`.
///
/// The ring is left alone while sorting; it is relinked once, in the sorted
/// order, at the end. A panicking `less` therefore leaves the list untouched.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = list.len();
    if len < 2 {
        return;
    }

    let mut keys = Vec::with_capacity(len);
    let mut node = list.front_node();
    while node != list.ghost_node() {
        keys.push(node);
        node = list.node(node).next;
    }
    let mut buffer = vec![list.ghost_node(); len];

    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_runs(
                list,
                &keys[start..mid],
                &keys[mid..end],
                &mut buffer[start..end],
                &mut less,
            );
        }
        std::mem::swap(&mut keys, &mut buffer);
        width *= 2;
    }

    list.relink(&keys);
}

/// Merge the sorted runs `left` and `right` into `merged`.
///
/// On ties the node from `left` goes first.
fn merge_runs<T, F>(
    list: &List<T>,
    left: &[usize],
    right: &[usize],
    merged: &mut [usize],
    less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert_eq!(left.len() + right.len(), merged.len());
    let (mut l, mut r) = (0, 0);
    for slot in merged.iter_mut() {
        let take_right = l == left.len()
            || (r < right.len() && less(list.element(right[r]), list.element(left[l])));
        if take_right {
            *slot = right[r];
            r += 1;
        } else {
            *slot = left[l];
            l += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_sort;
    use crate::List;
    use std::iter::FromIterator;

    #[test]
    fn merge_sort_lengths() {
        for len in 0..40 {
            let values: Vec<u32> = (0..len).map(|i| (i * 7919 + 13) % 17).collect();
            let mut list = List::from_iter(values.iter().copied());
            merge_sort(&mut list, |a, b| a < b);
            let mut expected = values.clone();
            expected.sort();
            assert_eq!(Vec::from_iter(list.iter().copied()), expected);
            list.assert_ring();
        }
    }

    #[test]
    fn merge_sort_counts_comparisons() {
        let mut list = List::from_iter((0..64).rev());
        let mut comparisons = 0;
        merge_sort(&mut list, |a, b| {
            comparisons += 1;
            a < b
        });
        assert!(list.iter().copied().eq(0..64));
        // n * log2(n)
        assert!(comparisons <= 64 * 6);
    }
}
