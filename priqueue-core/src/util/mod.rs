//! Ordered containers and the comparators that drive them.

pub use self::comparator::*;
pub use self::ordered_queue::*;

mod comparator;
mod ordered_queue;
