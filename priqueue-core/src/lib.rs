pub mod prelude;
pub mod util;

pub use util::{ByKey, Comparator, NaturalOrder, OrderedQueue, QueueError, Reversed};
