//! A singly-linked queue of owned strings.
//!
//! [`Queue`] supports insertion at either end, removal from the head, in-place reversal, and a
//! stable merge sort that orders strings *naturally*: runs of digits compare by their numeric
//! value, so `"img2"` comes before `"img10"`.
//!
//! ```
//! use linguine::Queue;
//! let mut queue = Queue::new();
//! queue.insert_tail("b").unwrap();
//! queue.insert_tail("a").unwrap();
//! queue.insert_head("c").unwrap();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["c", "b", "a"]);
//!
//! queue.sort();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
//! ```
//!
//! The [`handle`] module exposes the same operations over optional handles with `bool` results.

mod error;
pub mod handle;
pub mod natural;
mod queue;
mod settings;

pub use error::{QueueError, Result};
pub use queue::{IntoIter, Iter, Queue};
pub use settings::{Bytewise, Collation, Natural, NaturalIgnoreCase};

#[cfg(test)]
mod property_tests;
