use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

/// A single run request: untrusted source text plus ordered stdin lines.
///
/// The `inputs` are joined with newline separators into one stdin blob before
/// execution; sequential reads by the submitted program consume them in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    /// Source text to execute. May be empty or arbitrary (including
    /// adversarial) content; it is never parsed or validated beforehand.
    pub source: String,

    /// Ordered stdin lines for the submitted program
    #[serde(default)]
    pub inputs: Vec<String>,
}

impl Submission {
    /// Create a submission with no stdin input
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            inputs: Vec::new(),
        }
    }

    /// Set the stdin lines for this submission
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Join the input lines into the stdin blob fed to the interpreter.
    ///
    /// An empty input sequence produces an empty blob.
    pub fn stdin_blob(&self) -> String {
        self.inputs.join("\n")
    }
}

/// Status of an execution. Exactly one holds for every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Program exited with code 0 within the deadline
    Success,

    /// Program ran but did not exit 0 (non-zero exit code or killed by a signal)
    RuntimeError,

    /// Program exceeded the wall-clock deadline and was forcibly terminated
    Timeout,

    /// Host-side failure to launch or manage the process
    SystemError,
}

/// Result of executing a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Execution status
    pub status: ExecutionStatus,

    /// Captured standard output, trimmed of surrounding whitespace
    pub stdout: String,

    /// Captured standard error, trimmed of surrounding whitespace
    pub stderr: String,

    /// Exit code if the program exited normally.
    /// Always `None` for `Timeout` and `SystemError`.
    pub exit_code: Option<i32>,

    /// Host-side diagnostic for `SystemError`. Meant for logs, not for
    /// callers of the HTTP surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExecutionResult {
    /// Check if the execution was successful (exited with code 0)
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::Success)
    }

    /// Classify a completed process by its exit status.
    ///
    /// Exit code 0 maps to `Success`; any other outcome, including death by
    /// signal (where the OS reports no exit code), maps to `RuntimeError`.
    pub(crate) fn from_exit(status: ExitStatus, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        let stdout = String::from_utf8_lossy(&stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();

        if status.success() {
            Self {
                status: ExecutionStatus::Success,
                stdout,
                stderr,
                exit_code: Some(0),
                message: None,
            }
        } else {
            Self {
                status: ExecutionStatus::RuntimeError,
                stdout,
                stderr,
                exit_code: status.code(),
                message: None,
            }
        }
    }

    /// Result for a submission that exceeded the deadline.
    ///
    /// Captured output is discarded; the caller supplies the user-facing
    /// timeout message.
    pub(crate) fn timed_out() -> Self {
        Self {
            status: ExecutionStatus::Timeout,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            message: None,
        }
    }

    /// Result for a host-side failure to launch or manage the process
    pub(crate) fn system_error(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::SystemError,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            message: Some(message.into()),
        }
    }
}
