//! A module to hold [`Queue`], a singly-linked queue of owned strings.
//!

use crate::error::{QueueError, Result};
use crate::settings::{Collation, Natural};
use std::alloc::Layout;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ptr::NonNull;

struct Node {
    value: String,
    next: Option<NonNull<Node>>,
}

/// Moves `value` into a fresh heap allocation, returning an error instead of aborting when the
/// allocator comes back empty.
pub(crate) fn try_box<T>(value: T) -> Result<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }
    let ptr = unsafe { std::alloc::alloc(layout) } as *mut T;
    let ptr = NonNull::new(ptr).ok_or(QueueError::AllocationFailed)?;
    unsafe {
        // SAFETY: `ptr` was just allocated with the layout of `T` by the global allocator,
        // which is exactly what `Box::from_raw` expects
        ptr.as_ptr().write(value);
        Ok(Box::from_raw(ptr.as_ptr()))
    }
}

fn try_copy_str(s: &str) -> Result<String> {
    let mut value = String::new();
    value
        .try_reserve_exact(s.len())
        .map_err(|_| QueueError::AllocationFailed)?;
    value.push_str(s);
    Ok(value)
}

impl Node {
    // the string is allocated first so that a failed node allocation drops it on the way out
    fn try_new(s: &str) -> Result<Box<Node>> {
        let value = try_copy_str(s)?;
        try_box(Node { value, next: None })
    }
}

/// A singly-linked queue of owned strings.
/// Strings can be inserted at either end and removed from the front, and the whole queue can be
/// reversed or sorted in place without allocating.
///
/// Every inserted string is copied into storage owned by the queue, so the caller's buffer can be
/// reused immediately.
///
/// # Examples
/// ```
/// use linguine::Queue;
/// let mut queue = Queue::new();
/// queue.insert_tail("img2").unwrap();
/// queue.insert_tail("img10").unwrap();
/// queue.insert_head("img1").unwrap();
/// queue.sort();
/// assert_eq!(queue.iter().collect::<Vec<_>>(), ["img1", "img2", "img10"]);
/// ```
///
/// # Collation
/// The ordering used by [`sort`](Queue::sort) is picked at the type level. The default,
/// [`Natural`], compares runs of digits by their numeric value. Use
/// [`with_collation`](Queue::with_collation) to switch to
/// [`NaturalIgnoreCase`](crate::NaturalIgnoreCase) or [`Bytewise`](crate::Bytewise).
pub struct Queue<C = Natural>
where
    C: Collation,
{
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
    len: usize,
    collation: C,
    _owns: PhantomData<Box<Node>>,
}

// The queue owns its strings outright and hands out no interior mutability.
unsafe impl<C: Collation> Send for Queue<C> {}
unsafe impl<C: Collation> Sync for Queue<C> {}

impl Queue<Natural> {
    /// Creates a new, empty `Queue` that sorts in natural order.
    /// No memory is allocated until the first insertion.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let queue = Queue::new();
    /// assert_eq!(queue.len(), 0);
    /// assert!(queue.front().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Queue {
            head: None,
            tail: None,
            len: 0,
            collation: Natural,
            _owns: PhantomData,
        }
    }
}

impl<C> Default for Queue<C>
where
    C: Collation,
{
    #[inline]
    fn default() -> Self {
        Queue {
            head: None,
            tail: None,
            len: 0,
            collation: C::default(),
            _owns: PhantomData,
        }
    }
}

impl<C> Queue<C>
where
    C: Collation,
{
    /// Changes the collation used by [`sort`](Queue::sort) without touching the elements.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// use linguine::Bytewise;
    /// let queue: Queue = ["img2", "img10", "img1"].into_iter().collect();
    /// let mut queue = queue.with_collation::<Bytewise>();
    /// queue.sort();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["img1", "img10", "img2"]);
    /// ```
    #[inline]
    pub fn with_collation<D>(self) -> Queue<D>
    where
        D: Collation,
    {
        let this = std::mem::ManuallyDrop::new(self);
        Queue {
            head: this.head,
            tail: this.tail,
            len: this.len,
            collation: D::default(),
            _owns: PhantomData,
        }
    }

    /// Returns the collation marker of this queue.
    #[inline]
    pub fn collation(&self) -> C {
        self.collation
    }

    /// Returns the number of strings in the `Queue`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the string at the head of the `Queue`, or `None` if it is empty.
    #[inline]
    pub fn front(&self) -> Option<&str> {
        // SAFETY: `head` is a live node owned by `self`
        self.head
            .map(|node| unsafe { &*node.as_ptr() }.value.as_str())
    }

    /// Returns the string at the tail of the `Queue`, or `None` if it is empty.
    #[inline]
    pub fn back(&self) -> Option<&str> {
        // SAFETY: `tail` is a live node owned by `self`
        self.tail
            .map(|node| unsafe { &*node.as_ptr() }.value.as_str())
    }

    /// Returns an iterator over the strings from head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Copies `s` and links the copy in as the new head.
    ///
    /// # Errors
    /// Returns [`QueueError::AllocationFailed`] if storage for the string or its node could not be
    /// obtained. The queue is left unchanged and nothing is leaked.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue = Queue::new();
    /// queue.insert_head("b").unwrap();
    /// queue.insert_head("a").unwrap();
    /// assert_eq!(queue.front(), Some("a"));
    /// assert_eq!(queue.back(), Some("b"));
    /// ```
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        let node = Node::try_new(s).inspect_err(|_| {
            tracing::warn!(bytes = s.len(), "failed to allocate an element for insert_head");
        })?;
        self.push_node_front(node);
        Ok(())
    }

    /// Copies `s` and links the copy in as the new tail.
    ///
    /// # Errors
    /// Returns [`QueueError::AllocationFailed`] if storage for the string or its node could not be
    /// obtained. The queue is left unchanged and nothing is leaked.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.front(), Some("a"));
    /// assert_eq!(queue.back(), Some("b"));
    /// ```
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        let node = Node::try_new(s).inspect_err(|_| {
            tracing::warn!(bytes = s.len(), "failed to allocate an element for insert_tail");
        })?;
        self.push_node_back(node);
        Ok(())
    }

    /// Removes the head of the `Queue` and hands back its string, or `None` if the queue is empty.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue: Queue = ["a", "b"].into_iter().collect();
    /// assert_eq!(queue.pop_front().as_deref(), Some("a"));
    /// assert_eq!(queue.pop_front().as_deref(), Some("b"));
    /// assert_eq!(queue.pop_front(), None);
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Option<String> {
        self.pop_node_front().map(|node| node.value)
    }

    /// Removes the head of the `Queue`, copying its string into `buf` followed by a `0` byte.
    /// At most `buf.len() - 1` bytes of the string are copied; the rest is dropped.
    /// Returns the number of string bytes written, not counting the terminator.
    ///
    /// # Errors
    /// - [`QueueError::Empty`] if there is nothing to remove.
    /// - [`QueueError::InvalidArgument`] if `buf` cannot hold even the terminator.
    ///
    /// In both cases the queue is left unchanged.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue = Queue::new();
    /// queue.insert_head("xyz").unwrap();
    /// let mut buf = [0xffu8; 2];
    /// assert_eq!(queue.remove_head(&mut buf), Ok(1));
    /// assert_eq!(&buf, b"x\0");
    /// assert!(queue.is_empty());
    /// ```
    pub fn remove_head(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.is_empty() {
            tracing::debug!("remove_head on an empty queue");
            return Err(QueueError::Empty);
        }
        if buf.is_empty() {
            return Err(QueueError::InvalidArgument(
                "output buffer has no room for the terminator",
            ));
        }
        let value = self.pop_front().ok_or(QueueError::Empty)?;
        let copied = value.len().min(buf.len() - 1);
        buf[..copied].copy_from_slice(&value.as_bytes()[..copied]);
        buf[copied] = 0;
        Ok(copied)
    }

    /// Moves every string out of `other` onto the tail of `self`, leaving `other` empty.
    /// This only relinks nodes, so it runs in constant time.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut a: Queue = ["1", "2"].into_iter().collect();
    /// let mut b: Queue = ["3"].into_iter().collect();
    /// a.append(&mut b);
    /// assert_eq!(a.iter().collect::<Vec<_>>(), ["1", "2", "3"]);
    /// assert!(b.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let Some(other_head) = other.head.take() else {
            return;
        };
        match self.tail {
            // SAFETY: `tail` is a live node owned by `self`
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(other_head) },
            None => self.head = Some(other_head),
        }
        self.tail = other.tail.take();
        self.len += std::mem::take(&mut other.len);
    }

    /// Removes and frees every string in the `Queue`.
    /// Nodes are released one at a time from the head, so arbitrarily long queues never recurse.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_node_front().is_some() {}
    }

    /// Reverses the order of the strings in place.
    /// Only the links are rewritten; no node is allocated or freed.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue: Queue = ["a", "b", "c"].into_iter().collect();
    /// queue.reverse();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        tracing::trace!(len = self.len, "reversing queue");
        if self.len < 2 {
            return;
        }
        let mut remaining = self.head.take();
        // the old head ends up last
        self.tail = remaining;
        while let Some(node) = remaining {
            // SAFETY: every node reachable from the old head is owned by `self` and is visited once
            unsafe {
                remaining = (*node.as_ptr()).next;
                (*node.as_ptr()).next = self.head;
            }
            self.head = Some(node);
        }
    }

    /// Sorts the strings in ascending order under the queue's [`Collation`].
    ///
    /// The sort is a bottom-up merge sort over the links: it is stable, runs in `O(n log n)`,
    /// and needs no extra memory or recursion regardless of the queue's length.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue: Queue = ["b", "a", "c"].into_iter().collect();
    /// queue.sort();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    #[inline]
    pub fn sort(&mut self) {
        self.sort_by(C::compare)
    }

    /// Sorts the strings with a custom comparison function.
    /// Strings that compare equal keep their relative order.
    ///
    /// # Examples
    /// ```
    /// # use linguine::Queue;
    /// let mut queue: Queue = ["bb", "a", "ccc"].into_iter().collect();
    /// queue.sort_by(|a, b| b.len().cmp(&a.len()));
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["ccc", "bb", "a"]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        tracing::trace!(len = self.len, "sorting queue");
        let mut width = 1;
        while width < self.len {
            let mut source = std::mem::take(self);
            while !source.is_empty() {
                let mut left = source.split_front(width);
                let mut right = source.split_front(width);
                self.merge_runs(&mut left, &mut right, &mut compare);
            }
            width *= 2;
        }
    }

    // Detaches up to `n` nodes from the head into a new queue.
    fn split_front(&mut self, n: usize) -> Self {
        let mut run = Self::default();
        for _ in 0..n {
            match self.pop_node_front() {
                Some(node) => run.push_node_back(node),
                None => break,
            }
        }
        run
    }

    // Merges two sorted runs onto the tail of `self`. Ties go to `left`.
    fn merge_runs<F>(&mut self, left: &mut Self, right: &mut Self, compare: &mut F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        loop {
            let take_right = match (left.front(), right.front()) {
                (Some(l), Some(r)) => compare(l, r) == Ordering::Greater,
                (Some(_), None) => {
                    self.append(left);
                    return;
                }
                (None, _) => {
                    self.append(right);
                    return;
                }
            };
            let run = if take_right { &mut *right } else { &mut *left };
            if let Some(node) = run.pop_node_front() {
                self.push_node_back(node);
            }
        }
    }

    #[inline]
    fn push_node_front(&mut self, mut node: Box<Node>) {
        node.next = self.head;
        let node = NonNull::from(Box::leak(node));
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.len += 1;
    }

    #[inline]
    fn push_node_back(&mut self, mut node: Box<Node>) {
        node.next = None;
        let node = NonNull::from(Box::leak(node));
        match self.tail {
            // SAFETY: `tail` is a live node owned by `self`
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    #[inline]
    fn pop_node_front(&mut self) -> Option<Box<Node>> {
        let head = self.head?;
        // SAFETY: `head` was leaked from a `Box` when it was linked in, and unlinking it here
        // makes this the only owner again
        let mut node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next.take();
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node)
    }

    /// Walks the links and panics if the head, tail and length disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);
        let mut steps = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            steps += 1;
            assert!(steps <= self.len, "more nodes are linked than the length says");
            last = Some(node);
            cursor = unsafe { (*node.as_ptr()).next };
        }
        assert_eq!(steps, self.len);
        assert_eq!(last, self.tail);
    }
}

impl<C> Drop for Queue<C>
where
    C: Collation,
{
    #[inline]
    fn drop(&mut self) {
        self.clear();
    }
}

impl<C> Debug for Queue<C>
where
    C: Collation,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<C> PartialEq for Queue<C>
where
    C: Collation,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<C> Eq for Queue<C> where C: Collation {}

impl<C, S> Extend<S> for Queue<C>
where
    C: Collation,
    S: AsRef<str>,
{
    /// Appends every string to the tail.
    /// Like the standard collections, this aborts through [`std::alloc::handle_alloc_error`] if
    /// memory runs out; use [`insert_tail`](Queue::insert_tail) to handle that case instead.
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for s in iter {
            let s = s.as_ref();
            if self.insert_tail(s).is_err() {
                std::alloc::handle_alloc_error(Layout::for_value(s));
            }
        }
    }
}

impl<C, S> FromIterator<S> for Queue<C>
where
    C: Collation,
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.extend(iter);
        queue
    }
}

/// A borrowing iterator over the strings of a [`Queue`], from head to tail.
/// This struct is created by the [`iter`](Queue::iter) method on [`Queue`].
#[derive(Clone)]
pub struct Iter<'a> {
    next: Option<NonNull<Node>>,
    remaining: usize,
    _marker: PhantomData<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            // SAFETY: the borrowed queue keeps every node alive and unmodified for 'a
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.remaining -= 1;
            node.value.as_str()
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

unsafe impl Send for Iter<'_> {}
unsafe impl Sync for Iter<'_> {}

impl ExactSizeIterator for Iter<'_> {}
impl std::iter::FusedIterator for Iter<'_> {}

/// An owning iterator that pops strings off the head of a [`Queue`].
/// This struct is created by the `into_iter` method on [`Queue`].
pub struct IntoIter<C = Natural>
where
    C: Collation,
{
    queue: Queue<C>,
}

impl<C> Iterator for IntoIter<C>
where
    C: Collation,
{
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<C> ExactSizeIterator for IntoIter<C> where C: Collation {}
impl<C> std::iter::FusedIterator for IntoIter<C> where C: Collation {}

impl<C> IntoIterator for Queue<C>
where
    C: Collation,
{
    type Item = String;
    type IntoIter = IntoIter<C>;

    #[inline]
    fn into_iter(self) -> IntoIter<C> {
        IntoIter { queue: self }
    }
}

impl<'a, C> IntoIterator for &'a Queue<C>
where
    C: Collation,
{
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[doc(hidden)]
pub(crate) mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<C> Serialize for Queue<C>
    where
        C: Collation,
    {
        #[inline]
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, C> Deserialize<'de> for Queue<C>
    where
        C: Collation,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            let values = Vec::<String>::deserialize(deserializer)?;
            let mut queue = Queue::default();
            for value in values {
                // the deserialized string is moved into its node rather than copied again
                let node = try_box(Node { value, next: None }).map_err(<D::Error as serde::de::Error>::custom)?;
                queue.push_node_back(node);
            }
            Ok(queue)
        }
    }

}
