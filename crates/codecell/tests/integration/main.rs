//! Integration tests for codecell
//!
//! Submissions written against `sh` run unconditionally. Tests that need a
//! python3 interpreter live in the `python` module and are gated:
//! cargo test -p codecell --features integration-tests

use std::time::Duration;

use codecell::{Config, Executor};

mod concurrency;
#[cfg(feature = "integration-tests")]
mod python;
mod timeouts;

/// Executor that runs submissions with `sh -c`, available on any unix host
pub(crate) fn sh_executor() -> Executor {
    Executor::new(sh_config())
}

pub(crate) fn sh_config() -> Config {
    Config {
        interpreter_path: Some("sh".into()),
        ..Default::default()
    }
}

/// Executor with a short deadline for timeout tests
pub(crate) fn sh_executor_with_deadline(deadline: Duration) -> Executor {
    Executor::new(Config {
        interpreter_path: Some("sh".into()),
        time_limit: deadline.as_secs_f64(),
    })
}
