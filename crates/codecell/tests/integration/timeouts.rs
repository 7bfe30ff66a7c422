use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use codecell::{ExecutionStatus, Submission};

use super::sh_executor_with_deadline;

/// Scan /proc for a live process whose command line contains `marker`
fn process_with_marker_exists(marker: &str) -> bool {
    let Ok(entries) = std::fs::read_dir("/proc") else {
        return false;
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let cmdline_path = entry.path().join("cmdline");
        if let Ok(cmdline) = std::fs::read(&cmdline_path)
            && String::from_utf8_lossy(&cmdline).contains(marker)
        {
            return true;
        }
    }

    false
}

fn unique_marker(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("codecell-test-{tag}-{}-{nanos}", std::process::id())
}

#[tokio::test]
async fn test_infinite_loop_times_out_near_deadline() {
    let executor = sh_executor_with_deadline(Duration::from_secs(1));

    let started = Instant::now();
    let result = executor
        .execute(&Submission::new("while :; do :; done"))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(result.status, ExecutionStatus::Timeout);
    assert_eq!(result.exit_code, None);
    assert!(elapsed >= Duration::from_secs(1), "returned before deadline");
    assert!(
        elapsed < Duration::from_millis(2500),
        "timeout took too long: {elapsed:?}"
    );
}

#[tokio::test]
async fn test_timed_out_process_is_gone() {
    let executor = sh_executor_with_deadline(Duration::from_millis(500));

    let marker = unique_marker("reap");
    let source = format!("while :; do :; done # {marker}");

    let result = executor.execute(&Submission::new(source)).await;
    assert_eq!(result.status, ExecutionStatus::Timeout);

    // The direct child is reaped before execute() returns; give the kernel a
    // moment to tear down anything reparented.
    for _ in 0..20 {
        if !process_with_marker_exists(&marker) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("process matching the submission is still alive after timeout");
}

#[tokio::test]
async fn test_timeout_kills_forked_descendants() {
    let executor = sh_executor_with_deadline(Duration::from_millis(500));

    let marker = unique_marker("fork");
    // The backgrounded subshell shares the child's process group; the group
    // kill must take both down.
    let source = format!("while :; do :; done & wait # {marker}");

    let result = executor.execute(&Submission::new(source)).await;
    assert_eq!(result.status, ExecutionStatus::Timeout);

    for _ in 0..20 {
        if !process_with_marker_exists(&marker) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("forked descendant survived the timeout kill");
}

#[tokio::test]
async fn test_fast_program_is_not_penalized_by_deadline() {
    let executor = sh_executor_with_deadline(Duration::from_secs(5));

    let started = Instant::now();
    let result = executor.execute(&Submission::new("echo quick")).await;

    assert!(result.is_success());
    assert_eq!(result.stdout, "quick");
    assert!(started.elapsed() < Duration::from_secs(2));
}
