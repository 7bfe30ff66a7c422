//! A library for running untrusted code in a fresh interpreter process.
//!
//! Codecell provides an async Rust API for executing arbitrary source text as
//! a program in an isolated child process, with stdin piping and wall-clock
//! deadline enforcement. Each run spawns one interpreter process, captures
//! stdout/stderr, and classifies the outcome.
//!
//! # Features
//!
//! - **Process isolation** — every submission runs in a fresh OS process in
//!   its own process group; a timed-out run is killed together with anything
//!   it forked, and reaped before the call returns.
//! - **Outcome classification** — success, runtime error, timeout, or
//!   system error, with trimmed stdout/stderr.
//! - **TOML configuration** — interpreter path and time budget.
//! - **Stateless** — no queue, no persistence, no cross-call shared state;
//!   concurrent executions are independent.

pub use config::{Config, ConfigError, DEFAULT_TIME_LIMIT, EXAMPLE_CONFIG};
pub use executor::Executor;
pub use types::{ExecutionResult, ExecutionStatus, Submission};

pub mod config;
pub mod executor;
pub mod types;
