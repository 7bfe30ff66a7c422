//! Interpreter process lifecycle
//!
//! Handles spawning the interpreter, piping I/O, and deadline enforcement.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Outcome of waiting for an interpreter process
#[derive(Debug)]
pub(crate) enum WaitOutcome {
    /// Process exited on its own within the deadline
    Completed {
        status: std::process::ExitStatus,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },

    /// Deadline elapsed; the process group was killed and the child reaped
    TimedOut,

    /// Waiting on or piping to the process failed
    Failed(std::io::Error),
}

/// A spawned interpreter child with piped stdio.
///
/// The child runs in its own process group so that a timeout kill also
/// reaches anything the submitted program forked.
#[derive(Debug)]
pub(crate) struct InterpreterProcess {
    child: tokio::process::Child,
}

impl InterpreterProcess {
    /// Spawn `interpreter -c <source>` with stdin/stdout/stderr piped.
    ///
    /// The child inherits the service environment as-is; nothing is injected.
    pub(crate) fn spawn(interpreter: &Path, source: &str) -> std::io::Result<Self> {
        let mut command = Command::new(interpreter);
        command
            .arg("-c")
            .arg(source)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn()?;
        debug!(pid = child.id(), "spawned interpreter process");

        Ok(Self { child })
    }

    /// Feed stdin, drain stdout/stderr, and wait for exit, all under one
    /// wall-clock deadline.
    ///
    /// The three I/O legs run concurrently with the wait: a child that fills
    /// one pipe while another is still open must not deadlock the host. On
    /// deadline the whole process group is killed and the child is reaped
    /// before this returns, so no process outlives the call.
    pub(crate) async fn wait_with_deadline(
        mut self,
        stdin_blob: &[u8],
        deadline: Duration,
    ) -> WaitOutcome {
        let stdin = self.child.stdin.take();
        let mut stdout = self.child.stdout.take();
        let mut stderr = self.child.stderr.take();

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let run = async {
            let feed = async {
                if let Some(mut stdin) = stdin {
                    // A program that exits without reading its input closes
                    // the pipe; that is not a failure of the run.
                    if let Err(e) = stdin.write_all(stdin_blob).await
                        && e.kind() != std::io::ErrorKind::BrokenPipe
                    {
                        warn!("failed to write submission input: {e}");
                    }
                    let _ = stdin.shutdown().await;
                }
            };

            let drain_stdout = async {
                if let Some(ref mut stdout) = stdout {
                    let _ = stdout.read_to_end(&mut stdout_buf).await;
                }
            };

            let drain_stderr = async {
                if let Some(ref mut stderr) = stderr {
                    let _ = stderr.read_to_end(&mut stderr_buf).await;
                }
            };

            let (_, _, _, status) =
                tokio::join!(feed, drain_stdout, drain_stderr, self.child.wait());
            status
        };

        match tokio::time::timeout(deadline, run).await {
            Ok(Ok(status)) => WaitOutcome::Completed {
                status,
                stdout: stdout_buf,
                stderr: stderr_buf,
            },
            Ok(Err(e)) => WaitOutcome::Failed(e),
            Err(_elapsed) => {
                self.kill_group().await;
                WaitOutcome::TimedOut
            }
        }
    }

    /// Forcibly terminate the child and its descendants, then reap the child.
    async fn kill_group(&mut self) {
        #[cfg(unix)]
        if let Some(pid) = self.child.id() {
            // The child leads its own process group; -pgid reaches the whole group.
            // SAFETY: plain kill(2) call, no memory is touched.
            unsafe {
                libc::kill(-(pid as i32), libc::SIGKILL);
            }
        }

        if let Err(e) = self.child.kill().await {
            warn!("failed to kill interpreter process: {e}");
        }

        // kill() above already awaits the child on success, but wait() is
        // idempotent and guarantees the zombie is reaped on every path.
        match self.child.wait().await {
            Ok(status) => debug!(?status, "reaped timed-out interpreter process"),
            Err(e) => warn!("failed to reap interpreter process: {e}"),
        }
    }
}
