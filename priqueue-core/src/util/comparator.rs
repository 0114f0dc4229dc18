use std::cmp::Ordering;
use std::fmt;

/// Total (or partial) order over the elements of an [`OrderedQueue`](super::OrderedQueue).
///
/// `Less` means `a` should be polled before `b`. Elements comparing `Equal` keep their
/// insertion order.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self)(a, b)
    }
}

/// Orders elements by their `Ord` implementation, smallest first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        Ord::cmp(a, b)
    }
}

/// Flips the order of the inner comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a) // note: reversed arguments
    }
}

/// Orders elements by a key extracted from each of them.
#[derive(Clone, Copy)]
pub struct ByKey<F>(F);

impl<F> ByKey<F> {
    pub fn new(extraction: F) -> Self {
        Self(extraction)
    }
}

impl<T: ?Sized, F, K> Comparator<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        Ord::cmp(&(self.0)(a), &(self.0)(b))
    }
}

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ByKey(<fn>)")
    }
}
