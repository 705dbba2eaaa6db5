//! Operations over optional queue handles.
//!
//! These functions mirror the [`Queue`] methods but accept an absent handle or buffer, and
//! report the outcome as a `bool` (or `0` for [`size`]) instead of a [`QueueError`]. Nothing
//! here panics; failures are logged through `tracing` and leave the queue unchanged.
//!
//! # Examples
//! ```
//! use linguine::handle;
//! let mut queue = handle::create();
//! assert!(handle::insert_tail(queue.as_deref_mut(), "b"));
//! assert!(handle::insert_head(queue.as_deref_mut(), "a"));
//! assert_eq!(handle::size(queue.as_deref()), 2);
//!
//! let mut buf = [0u8; 4];
//! assert!(handle::remove_head(queue.as_deref_mut(), Some(&mut buf), 4));
//! assert_eq!(&buf[..2], b"a\0");
//! handle::destroy(queue);
//! ```

use crate::error::QueueError;
use crate::queue::try_box;
use crate::Queue;

fn report<T>(op: &'static str, result: Result<T, QueueError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(op, error = %e, "queue operation failed");
            false
        }
    }
}

/// Allocates a new, empty queue on the heap. Returns `None` if the allocation fails.
pub fn create() -> Option<Box<Queue>> {
    match try_box(Queue::new()) {
        Ok(queue) => Some(queue),
        Err(e) => {
            tracing::warn!(error = %e, "failed to allocate a queue");
            None
        }
    }
}

/// Frees a queue and every string it holds. An absent handle is ignored.
#[inline]
pub fn destroy(queue: Option<Box<Queue>>) {
    drop(queue);
}

/// Copies `s` onto the head of the queue. Returns `false` if the handle is absent or memory ran out.
pub fn insert_head(queue: Option<&mut Queue>, s: &str) -> bool {
    let Some(queue) = queue else {
        tracing::warn!("insert_head called without a queue");
        return false;
    };
    report("insert_head", queue.insert_head(s))
}

/// Copies `s` onto the tail of the queue. Returns `false` if the handle is absent or memory ran out.
pub fn insert_tail(queue: Option<&mut Queue>, s: &str) -> bool {
    let Some(queue) = queue else {
        tracing::warn!("insert_tail called without a queue");
        return false;
    };
    report("insert_tail", queue.insert_tail(s))
}

/// Removes the head of the queue, copying up to `capacity - 1` bytes of it plus a `0` terminator
/// into `buf`. The capacity is clamped to the length of `buf`.
///
/// Returns `false` without touching the queue if the handle or buffer is absent, the capacity is
/// zero, or the queue is empty.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>, capacity: usize) -> bool {
    let Some(queue) = queue else {
        tracing::warn!("remove_head called without a queue");
        return false;
    };
    let Some(buf) = buf else {
        tracing::warn!("remove_head called without an output buffer");
        return false;
    };
    let capacity = capacity.min(buf.len());
    report("remove_head", queue.remove_head(&mut buf[..capacity]))
}

/// Returns the number of strings in the queue, or `0` for an absent handle.
#[inline]
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, |queue| queue.len())
}

/// Reverses the queue in place. An absent handle is ignored.
#[inline]
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Sorts the queue in natural order. An absent handle is ignored.
#[inline]
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
