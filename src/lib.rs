//! Comparator-driven priority queue for schedulers.
//!
//! The container lives in `priqueue-core` and is re-exported here, together with the
//! embedding-side pieces: logging setup, environment configuration, and a mutex-guarded
//! wrapper for callers that share one queue between threads.
mod prelude;
pub mod sync;
pub mod types;

pub use self::sync::SharedQueue;
pub use self::types::*;

pub fn initialize_logger() {
    use std::time::Instant;

    lazy_static::lazy_static! {
        static ref START_TIMING: Instant = Instant::now();
    }

    let _ = *START_TIMING;

    env_logger::Builder::from_default_env()
        .format(|formatter, record| {
            use std::io::Write;
            let duration = START_TIMING.elapsed();

            writeln!(
                formatter,
                "[{} {:.6}] {}: {}",
                record.module_path().unwrap_or("?"),
                duration.as_secs_f64(),
                record.level(),
                record.args(),
            )
        })
        .init();
}
