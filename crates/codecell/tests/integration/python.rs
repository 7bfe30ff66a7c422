//! Python-backed tests, gated behind the `integration-tests` feature because
//! they require a python3 interpreter on PATH.

use std::time::{Duration, Instant};

use codecell::{Config, Executor, ExecutionStatus, Submission};

fn python_executor() -> Executor {
    Executor::new(Config::default())
}

#[tokio::test]
async fn test_print_hi() {
    let executor = python_executor();

    let result = executor.execute(&Submission::new("print('hi')")).await;

    assert!(result.is_success());
    assert_eq!(result.stdout, "hi");
}

#[tokio::test]
async fn test_two_line_sum() {
    let executor = python_executor();

    let submission = Submission::new("a = int(input())\nb = int(input())\nprint(a + b)")
        .with_inputs(["3", "4"]);
    let result = executor.execute(&submission).await;

    assert!(result.is_success(), "expected success, got {result:?}");
    assert_eq!(result.stdout, "7");
}

#[tokio::test]
async fn test_division_by_zero() {
    let executor = python_executor();

    let result = executor.execute(&Submission::new("1/0")).await;

    assert_eq!(result.status, ExecutionStatus::RuntimeError);
    assert!(
        result.stderr.contains("ZeroDivisionError"),
        "stderr should mention division by zero: {}",
        result.stderr
    );
}

#[tokio::test]
async fn test_while_true_times_out() {
    let executor = Executor::new(Config {
        time_limit: 1.0,
        ..Default::default()
    });

    let started = Instant::now();
    let result = executor
        .execute(&Submission::new("while True: pass"))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(result.status, ExecutionStatus::Timeout);
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(2500), "took {elapsed:?}");
}

#[tokio::test]
async fn test_stderr_diagnostics_on_success() {
    let executor = python_executor();

    let result = executor
        .execute(&Submission::new(
            "import sys\nprint('ok')\nprint('note', file=sys.stderr)",
        ))
        .await;

    assert!(result.is_success());
    assert_eq!(result.stdout, "ok");
    assert_eq!(result.stderr, "note");
}
