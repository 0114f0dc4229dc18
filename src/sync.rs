//! Thread-safe wrapper around [`OrderedQueue`].
//!
//! The queue itself is strictly single-threaded. `SharedQueue` serializes every call through one
//! mutex, which is all a scheduler feeding jobs from several threads needs.
use std::ops::Deref;

use crate::prelude::*;
use crate::types::{Comparator, OrderedQueue, QueueConfig, QueueError};

pub struct SharedQueue<T, C> {
    inner: Mutex<OrderedQueue<T, C>>,
    config: QueueConfig,
}

impl<T, C> SharedQueue<T, C>
where
    C: Comparator<T>,
{
    pub fn new(comparator: C) -> Self {
        Self::with_config(comparator, QueueConfig::from_env())
    }

    pub fn with_config(comparator: C, config: QueueConfig) -> Self {
        debug!("queue {:?}: created ({:?})", config.name, config);

        Self {
            inner: Mutex::new(OrderedQueue::new(comparator)),
            config,
        }
    }

    pub fn insert(&self, value: T) -> usize {
        self.with(move |queue| queue.insert(value))
    }

    pub fn poll(&self) -> Option<T> {
        self.with(|queue| queue.poll())
    }

    pub fn remove_at(&self, index: usize) -> Result<T, QueueError> {
        self.with(|queue| queue.remove_at(index))
    }

    pub fn remove_all(&self, target: &T::Target) -> usize
    where
        T: Deref,
    {
        self.with(|queue| queue.remove_all(target))
    }

    pub fn clear(&self) {
        self.with(|queue| queue.clear())
    }

    /// Runs `fun` while holding the lock, so that a sequence of operations is observed as one.
    /// Invariants are verified afterwards if the configuration asks for it.
    pub fn with<F, R>(&self, fun: F) -> R
    where
        F: FnOnce(&mut OrderedQueue<T, C>) -> R,
    {
        let mut guard = self.inner.lock();
        let before = guard.len();
        let result = fun(&mut *guard);

        if self.config.trace_operations {
            trace!(
                "queue {:?}: length {} -> {}",
                self.config.name,
                before,
                guard.len()
            );
        }

        if self.config.check_invariants {
            assert!(
                guard.is_ordered(),
                "queue {:?} is no longer ordered",
                self.config.name
            );
            assert_eq!(
                guard.len(),
                guard.iter().count(),
                "queue {:?} lost track of its length",
                self.config.name
            );
        }

        result
    }
}

impl<T, C> SharedQueue<T, C> {
    /// Calls `fun` with the front element, or `None` if the queue is empty.
    pub fn peek_with<F, R>(&self, fun: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        fun(self.inner.lock().peek())
    }

    /// Calls `fun` with the element at `index`.
    pub fn at_with<F, R>(&self, index: usize, fun: F) -> Result<R, QueueError>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().at(index).map(fun)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn into_inner(self) -> OrderedQueue<T, C> {
        self.inner.into_inner()
    }
}

impl<T, C: Comparator<T> + Default> Default for SharedQueue<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{ByKey, NaturalOrder};
    use std::sync::Arc;
    use std::thread;

    fn checked(name: &str) -> QueueConfig {
        QueueConfig {
            check_invariants: true,
            trace_operations: true,
            ..QueueConfig::new(name)
        }
    }

    #[test]
    fn test_basic() {
        let queue: SharedQueue<i32, _> = SharedQueue::with_config(NaturalOrder, checked("basic"));
        assert!(queue.is_empty());
        assert_eq!(queue.peek_with(|v| v.copied()), None);

        assert_eq!(queue.insert(3), 0);
        assert_eq!(queue.insert(1), 0);
        assert_eq!(queue.insert(2), 1);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.peek_with(|v| v.copied()), Some(1));
        assert_eq!(queue.at_with(2, |v| *v), Ok(3));
        assert_eq!(
            queue.at_with(3, |v| *v),
            Err(QueueError::NotFound { index: 3, len: 3 })
        );

        assert_eq!(queue.remove_at(1), Ok(2));
        assert_eq!(queue.poll(), Some(1));
        assert_eq!(queue.poll(), Some(3));
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.config().name, "basic");
    }

    #[test]
    #[should_panic(expected = "no longer ordered")]
    fn test_invariant_violation_panics() {
        use std::cell::Cell;

        let flipped = Cell::new(false);
        let comparator = |a: &i32, b: &i32| {
            if flipped.get() {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        };
        let queue = SharedQueue::with_config(comparator, checked("flip"));

        queue.insert(1);
        queue.insert(2);
        flipped.set(true);
        queue.insert(3);
    }

    #[test]
    fn test_compound() {
        let queue: SharedQueue<i32, _> =
            SharedQueue::with_config(NaturalOrder, checked("compound"));
        queue.with(|q| q.extend(vec![5, 4, 3, 2, 1]));

        // Poll the two smallest as one atomic step.
        let pair = queue.with(|q| (q.poll(), q.poll()));
        assert_eq!(pair, (Some(1), Some(2)));

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_concurrent_inserts() {
        let num_threads = 8;
        let per_thread = 250;
        let queue = Arc::new(SharedQueue::with_config(
            ByKey::new(|job: &(u32, u32)| job.1),
            checked("concurrent"),
        ));

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        queue.insert((thread_id, (i * 7 + thread_id) % 31));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), (num_threads * per_thread) as usize);

        let queue = Arc::try_unwrap(queue).ok().unwrap().into_inner();
        let priorities: Vec<_> = queue.into_iter().map(|job| job.1).collect();
        assert_eq!(priorities.len(), (num_threads * per_thread) as usize);
        assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_remove_all_shared() {
        let target = Arc::new("job");
        let other = Arc::new("job");
        let queue = SharedQueue::with_config(NaturalOrder, checked("remove"));

        queue.insert(Arc::clone(&target));
        queue.insert(Arc::clone(&other));
        queue.insert(Arc::clone(&target));

        assert_eq!(queue.remove_all(&target), 2);
        assert_eq!(queue.remove_all(&target), 0);
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.peek_with(|v| v.map(|v| Arc::ptr_eq(v, &other))),
            Some(true)
        );
        assert_eq!(Arc::strong_count(&target), 1);
    }
}
