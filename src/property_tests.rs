use proptest_derive::Arbitrary;

use crate::{natural, NaturalIgnoreCase, Queue, QueueError};
use proptest::prelude::*;
use std::collections::VecDeque;

// Letters and digit runs that never start with a zero: natural order is a strict total order
// over these, so a stable sort of the model gives the one right answer.
const TOKENS: &str = "([a-c]|[1-9][0-9]?){0,4}";

// simple enum to allow queue operations in any order
#[derive(Debug, Clone, Arbitrary)]
enum QueueOps {
    InsertHead(#[proptest(regex = "([a-c]|[1-9][0-9]?){0,4}")] String),
    InsertTail(#[proptest(regex = "([a-c]|[1-9][0-9]?){0,4}")] String),
    RemoveHead(#[proptest(strategy = "0usize..8")] usize),
    PopFront,
    Reverse,
    Sort,
}

proptest! {
    // Test that any sequence of operations keeps the links consistent and matches a VecDeque model
    #[test]
    fn test_ops_match_model(ref ops in proptest::collection::vec(any::<QueueOps>(), 0..100)) {
        let mut queue = Queue::new();
        let mut model: VecDeque<String> = VecDeque::new();
        for op in ops.iter() {
            match op {
                QueueOps::InsertHead(s) => {
                    prop_assert!(queue.insert_head(s).is_ok());
                    model.push_front(s.clone());
                }
                QueueOps::InsertTail(s) => {
                    prop_assert!(queue.insert_tail(s).is_ok());
                    model.push_back(s.clone());
                }
                QueueOps::RemoveHead(capacity) => {
                    let mut buf = vec![0xffu8; *capacity];
                    let result = queue.remove_head(&mut buf);
                    match model.front() {
                        None => prop_assert_eq!(result, Err(QueueError::Empty)),
                        Some(_) if *capacity == 0 => {
                            prop_assert!(matches!(result, Err(QueueError::InvalidArgument(_))));
                        }
                        Some(expected) => {
                            let copied = expected.len().min(capacity - 1);
                            prop_assert_eq!(result, Ok(copied));
                            prop_assert_eq!(&buf[..copied], &expected.as_bytes()[..copied]);
                            prop_assert_eq!(buf[copied], 0);
                            model.pop_front();
                        }
                    }
                }
                QueueOps::PopFront => prop_assert_eq!(queue.pop_front(), model.pop_front()),
                QueueOps::Reverse => {
                    queue.reverse();
                    model.make_contiguous().reverse();
                }
                QueueOps::Sort => {
                    queue.sort();
                    model.make_contiguous().sort_by(|a, b| natural::compare(a, b));
                }
            }
            queue.assert_invariants();
            prop_assert_eq!(queue.len(), model.len());
        }
        prop_assert!(queue.iter().eq(model.iter().map(String::as_str)));
    }

    // Test that reversing twice restores any queue, including empty and single-element ones
    #[test]
    fn test_reverse_involution(ref values in proptest::collection::vec(any::<String>(), 0..50)) {
        let mut queue: Queue = values.iter().collect();
        queue.reverse();
        queue.assert_invariants();
        prop_assert!(queue.iter().eq(values.iter().rev().map(String::as_str)));
        queue.reverse();
        queue.assert_invariants();
        prop_assert!(queue.iter().eq(values.iter().map(String::as_str)));
    }

    // Test that sorting is stable and idempotent when the collation has ties
    #[test]
    fn test_sort_ignore_case_is_stable(ref values in proptest::collection::vec("([a-cA-C]|[1-9][0-9]?){0,3}", 0..100)) {
        let mut queue = Queue::<NaturalIgnoreCase>::default();
        queue.extend(values.iter());
        queue.sort();
        queue.assert_invariants();

        let mut model = values.clone();
        model.sort_by(|a, b| natural::compare_ignore_case(a, b));
        prop_assert!(queue.iter().eq(model.iter().map(String::as_str)));

        queue.sort();
        queue.assert_invariants();
        prop_assert!(queue.iter().eq(model.iter().map(String::as_str)));
    }

    // Test that the natural sort agrees with a stable sort of the same strings
    #[test]
    fn test_sort_matches_model(ref values in proptest::collection::vec(TOKENS, 0..200)) {
        let mut queue: Queue = values.iter().collect();
        queue.sort();
        queue.assert_invariants();

        let mut model = values.clone();
        model.sort_by(|a, b| natural::compare(a, b));
        prop_assert!(queue.iter().eq(model.iter().map(String::as_str)));
    }
}
