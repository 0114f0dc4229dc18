pub use log::{debug, error, info, trace, warn};

#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
