use std::env;

use crate::prelude::*;

/// Settings for a [`SharedQueue`](crate::sync::SharedQueue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Label prefixed to every log line emitted for this queue.
    pub name: String,
    /// Verify ordering and size after every mutation. Violations panic.
    pub check_invariants: bool,
    /// Emit a `trace!` line for every operation.
    pub trace_operations: bool,
}

impl QueueConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..default()
        }
    }

    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Ok(name) = env::var("PRIQUEUE_NAME") {
            let name = name.trim();

            if !name.is_empty() {
                out.name = name.to_string();
            }
        }

        if let Ok(flag) = env::var("PRIQUEUE_CHECK_INVARIANTS") {
            out.check_invariants = parse_flag("PRIQUEUE_CHECK_INVARIANTS", &flag, false);
        }

        if let Ok(flag) = env::var("PRIQUEUE_TRACE") {
            out.trace_operations = parse_flag("PRIQUEUE_TRACE", &flag, false);
        }

        if out.check_invariants {
            info!("queue {:?}: invariant checking enabled", out.name);
        }

        out
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "queue".to_string(),
            check_invariants: false,
            trace_operations: false,
        }
    }
}

fn parse_flag(key: &str, value: &str, fallback: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => true,
        "0" | "false" | "off" | "no" => false,
        "" => fallback,
        s => {
            warn!("unknown value {:?} for {}, reverting to {}", s, key, fallback);
            fallback
        }
    }
}
