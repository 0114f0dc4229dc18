pub use parking_lot::Mutex;
pub use priqueue_core::prelude::*;
