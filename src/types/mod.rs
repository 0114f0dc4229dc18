//! Common types shared by the queue wrappers.
mod config;

pub use priqueue_core::{ByKey, Comparator, NaturalOrder, OrderedQueue, QueueError, Reversed};

pub use self::config::*;
