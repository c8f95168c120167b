use std::collections::VecDeque;
use std::iter::FromIterator;

use proptest::prelude::*;
use proptest::test_runner::Config;

use crate::{Error, List, Position};

#[derive(Clone, Debug)]
enum Op {
    PushFront(u8),
    PushBack(u8),
    PopFront,
    PopBack,
    /// Insert before the element at this index, modulo `len + 1`.
    Insert(usize, u8),
    /// Erase the element at this index, modulo `len`.
    Erase(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => any::<u8>().prop_map(Op::PushFront),
        2 => any::<u8>().prop_map(Op::PushBack),
        1 => Just(Op::PopFront),
        1 => Just(Op::PopBack),
        2 => (any::<usize>(), any::<u8>()).prop_map(|(at, value)| Op::Insert(at, value)),
        2 => any::<usize>().prop_map(Op::Erase),
    ]
}

/// Keyed values: equal keys with different tags expose unstable algorithms.
fn keyed(max_len: usize) -> impl Strategy<Value = Vec<(u8, u16)>> {
    prop::collection::vec(0..8u8, 0..max_len).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(tag, key)| (key, tag as u16))
            .collect()
    })
}

fn positions<T>(list: &List<T>) -> Vec<Position> {
    let mut all = Vec::with_capacity(list.len());
    let mut pos = list.begin();
    while !pos.is_end(list) {
        all.push(pos);
        if pos.move_next(list).is_err() {
            break;
        }
    }
    all
}

proptest! {
    #![proptest_config(Config {
        failure_persistence: None,
        .. Config::default()
    })]

    #[test]
    fn ops_match_vec_deque(ops in prop::collection::vec(op(), 0..200)) {
        let mut list = List::new();
        let mut reference = VecDeque::new();
        // positions of erased elements, which must stay invalid
        let mut erased = Vec::new();

        for op in ops {
            match op {
                Op::PushFront(value) => {
                    let pos = list.push_front(value);
                    reference.push_front(value);
                    prop_assert_eq!(list.get(pos), Ok(&value));
                }
                Op::PushBack(value) => {
                    let pos = list.push_back(value);
                    reference.push_back(value);
                    prop_assert_eq!(list.get(pos), Ok(&value));
                }
                Op::PopFront => {
                    prop_assert_eq!(list.pop_front().ok(), reference.pop_front());
                }
                Op::PopBack => {
                    prop_assert_eq!(list.pop_back().ok(), reference.pop_back());
                }
                Op::Insert(at, value) => {
                    let at = at % (reference.len() + 1);
                    let before = positions(&list)
                        .get(at)
                        .copied()
                        .unwrap_or_else(|| list.end());
                    let pos = list.insert(before, value).unwrap();
                    reference.insert(at, value);
                    prop_assert_eq!(list.get(pos), Ok(&value));
                }
                Op::Erase(at) => {
                    if reference.is_empty() {
                        prop_assert_eq!(list.erase(list.end()), Err(Error::EmptyContainer));
                        continue;
                    }
                    let at = at % reference.len();
                    let pos = positions(&list)[at];
                    let next = list.erase(pos).unwrap();
                    reference.remove(at);
                    prop_assert_eq!(list.get(next).ok(), reference.get(at));
                    erased.push(pos);
                }
            }
            list.assert_ring();
            prop_assert_eq!(list.len(), reference.len());
            prop_assert!(list.iter().eq(reference.iter()));
            prop_assert!(list.iter().rev().eq(reference.iter().rev()));
        }
        for pos in erased {
            prop_assert!(!pos.is_valid(&list));
        }
    }

    #[test]
    fn sort_matches_stable_sort(values in keyed(100)) {
        let mut list = List::from_iter(values.iter().copied());
        let before = positions(&list);
        list.sort_by_key(|&(key, _)| key);
        list.assert_ring();

        let mut expected = values.clone();
        expected.sort_by_key(|&(key, _)| key);
        prop_assert!(list.iter().eq(expected.iter()));
        // every position still reads its own element
        for (pos, value) in before.into_iter().zip(values.iter()) {
            prop_assert_eq!(list.get(pos), Ok(value));
        }
    }

    #[test]
    fn merge_matches_stable_sort(mut a in keyed(50), mut b in keyed(50)) {
        a.sort_by_key(|&(key, _)| key);
        // tag the right side apart from the left one
        for (_, tag) in b.iter_mut() {
            *tag += 1000;
        }
        b.sort_by_key(|&(key, _)| key);

        let mut list = List::from_iter(a.iter().copied());
        let mut other = List::from_iter(b.iter().copied());
        let kept = positions(&list);
        list.merge_by(&mut other, |x, y| x.0.cmp(&y.0));
        list.assert_ring();
        other.assert_ring();

        let mut expected = a.clone();
        expected.extend(b.iter().copied());
        expected.sort_by_key(|&(key, _)| key);
        prop_assert!(other.is_empty());
        prop_assert!(list.iter().eq(expected.iter()));
        for (pos, value) in kept.into_iter().zip(a.iter()) {
            prop_assert_eq!(list.get(pos), Ok(value));
        }
    }

    #[test]
    fn reverse_twice_is_identity(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut list = List::from_iter(values.iter().copied());
        list.reverse();
        list.assert_ring();
        prop_assert!(list.iter().eq(values.iter().rev()));
        list.reverse();
        list.assert_ring();
        prop_assert!(list.iter().eq(values.iter()));
    }

    #[test]
    fn unique_matches_dedup(values in prop::collection::vec(0..4u8, 0..100)) {
        let mut list = List::from_iter(values.iter().copied());
        list.unique();
        list.assert_ring();

        let mut expected = values;
        expected.dedup();
        prop_assert!(list.iter().eq(expected.iter()));
    }
}
