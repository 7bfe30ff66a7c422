//! Code executor
//!
//! Runs an untrusted submission in a fresh interpreter process and classifies
//! the outcome. Each call spawns exactly one OS process, feeds it the joined
//! stdin lines, and waits until exit or the wall-clock deadline. There is no
//! shared mutable state between calls, so concurrent executions are safe by
//! construction.

use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::types::{ExecutionResult, Submission};

use self::process::{InterpreterProcess, WaitOutcome};

mod process;

/// Executor for untrusted submissions
#[derive(Debug, Clone)]
pub struct Executor {
    config: Config,
}

impl Executor {
    /// Create a new executor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new executor with default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute a submission under the configured deadline.
    ///
    /// Never fails at the signature level: every outcome, including a failure
    /// to spawn the interpreter, folds into the result's status. No retries;
    /// every outcome is terminal.
    pub async fn execute(&self, submission: &Submission) -> ExecutionResult {
        self.execute_with_deadline(submission, self.config.deadline())
            .await
    }

    /// Execute a submission with an explicit wall-clock deadline
    #[instrument(skip(self, submission), fields(deadline = ?deadline))]
    pub async fn execute_with_deadline(
        &self,
        submission: &Submission,
        deadline: Duration,
    ) -> ExecutionResult {
        let interpreter = self.config.interpreter_binary();

        let process = match InterpreterProcess::spawn(&interpreter, &submission.source) {
            Ok(process) => process,
            Err(e) => {
                warn!(interpreter = %interpreter.display(), "failed to spawn interpreter: {e}");
                return ExecutionResult::system_error(format!(
                    "failed to spawn interpreter '{}': {e}",
                    interpreter.display()
                ));
            }
        };

        let stdin_blob = submission.stdin_blob();

        let result = match process
            .wait_with_deadline(stdin_blob.as_bytes(), deadline)
            .await
        {
            WaitOutcome::Completed {
                status,
                stdout,
                stderr,
            } => ExecutionResult::from_exit(status, stdout, stderr),
            WaitOutcome::TimedOut => ExecutionResult::timed_out(),
            WaitOutcome::Failed(e) => {
                warn!("failed to manage interpreter process: {e}");
                ExecutionResult::system_error(format!("failed to manage interpreter process: {e}"))
            }
        };

        debug!(
            status = ?result.status,
            exit_code = ?result.exit_code,
            "execution complete"
        );

        result
    }
}
