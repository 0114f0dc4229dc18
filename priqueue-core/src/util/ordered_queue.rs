use super::comparator::Comparator;
use itertools::Itertools;
use log::trace;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("index {index} is out of bounds for queue of length {len}")]
    NotFound { index: usize, len: usize },
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// Priority queue backed by a sorted singly linked list.
///
/// Elements are kept in the order given by the comparator `C`, which is fixed when the queue
/// is created. Among elements that compare equal, the one inserted first is polled first.
///
/// Elements are usually references or shared pointers (`&T`, `Rc<T>`, `Arc<T>`) to data owned by
/// the caller. The queue owns only its nodes: dropping the queue drops the stored handles but
/// never touches the data behind them.
pub struct OrderedQueue<T, C> {
    head: Link<T>,
    len: usize,
    comparator: C,
}

impl<T, C> OrderedQueue<T, C>
where
    C: Comparator<T>,
{
    pub fn new(comparator: C) -> Self {
        Self {
            head: None,
            len: 0,
            comparator,
        }
    }

    /// Inserts `value` after every element that sorts before it or compares equal to it, and
    /// returns the position where it ended up.
    pub fn insert(&mut self, value: T) -> usize {
        let comparator = &self.comparator;
        let index = self
            .iter()
            .take_while(|existing| comparator.compare(existing, &value) != Ordering::Greater)
            .count();

        let link = self.link_mut(index);
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;

        index
    }

    /// Checks that every pair of neighbouring elements is in order.
    pub fn is_ordered(&self) -> bool {
        self.iter()
            .tuple_windows()
            .all(|(a, b)| self.comparator.compare(a, b) != Ordering::Greater)
    }
}

impl<T, C> OrderedQueue<T, C> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the element that would be polled next.
    pub fn peek(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Removes and returns the element at the front of the queue.
    pub fn poll(&mut self) -> Option<T> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;

        Some(node.value)
    }

    /// Returns the element at position `index`, where `0` is the front of the queue.
    pub fn at(&self, index: usize) -> Result<&T, QueueError> {
        self.check_index(index)?;
        self.iter().nth(index).ok_or(QueueError::NotFound {
            index,
            len: self.len,
        })
    }

    /// Removes and returns the element at position `index`. The relative order of the remaining
    /// elements is unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<T, QueueError> {
        self.check_index(index)?;
        let len = self.len;

        let link = self.link_mut(index);
        let mut node = link.take().ok_or(QueueError::NotFound { index, len })?;
        *link = node.next.take();
        self.len -= 1;

        Ok(node.value)
    }

    /// Removes every element for which `condition` returns true and returns how many were
    /// removed. Elements are visited from front to back, each exactly once.
    pub fn remove_if<F>(&mut self, mut condition: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut link = &mut self.head;

        while link.is_some() {
            if link.as_ref().map_or(false, |node| condition(&node.value)) {
                if let Some(mut node) = link.take() {
                    *link = node.next.take();
                    removed += 1;
                }
            } else if let Some(node) = link {
                link = &mut node.next;
            }
        }

        self.len -= removed;
        debug_assert_eq!(self.count_nodes(), self.len);
        removed
    }

    /// Removes every entry that points to the same object as `target`. Entries that merely
    /// compare equal to `target` are kept: the comparator is not consulted.
    pub fn remove_all(&mut self, target: &T::Target) -> usize
    where
        T: Deref,
    {
        let removed = self.remove_if(|value| std::ptr::eq(&**value, target));

        if removed > 0 {
            trace!("removed {} entries by identity ({} left)", removed, self.len);
        }

        removed
    }

    /// Drops every element. Nodes are unlinked one at a time, so arbitrarily long queues do not
    /// recurse.
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }

        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Removes elements in queue order. Whatever the iterator did not yield is dropped together
    /// with it, leaving the queue empty but usable.
    pub fn drain(&mut self) -> Drain<'_, T, C> {
        Drain { queue: self }
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        if index >= self.len {
            return Err(QueueError::NotFound {
                index,
                len: self.len,
            });
        }

        Ok(())
    }

    fn link_mut(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }

        link
    }

    fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            cursor = node.next.as_deref();
            count += 1;
        }

        count
    }
}

impl<T, C: Default + Comparator<T>> Default for OrderedQueue<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C> Drop for OrderedQueue<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct Iter<'a, T> {
    cursor: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedQueue<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<T, C> {
    queue: OrderedQueue<T, C>,
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.poll()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> IntoIterator for OrderedQueue<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

pub struct Drain<'a, T, C> {
    queue: &'a mut OrderedQueue<T, C>,
}

impl<'a, T, C> Iterator for Drain<'a, T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.poll()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<'a, T, C> Drop for Drain<'a, T, C> {
    fn drop(&mut self) {
        self.queue.clear();
    }
}
