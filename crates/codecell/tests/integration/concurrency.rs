use codecell::Submission;

use super::sh_executor;

#[tokio::test]
async fn test_fifty_concurrent_submissions_do_not_cross_contaminate() {
    let executor = sh_executor();

    let mut handles = Vec::new();
    for i in 0..50 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            let token = format!("token-{i}");
            let submission = Submission::new(format!("echo {token}"));
            let result = executor.execute(&submission).await;
            (token, result)
        }));
    }

    for handle in handles {
        let (token, result) = handle.await.expect("task panicked");
        assert!(result.is_success(), "submission {token} failed: {result:?}");
        assert_eq!(result.stdout, token);
        assert!(result.stderr.is_empty());
    }
}

#[tokio::test]
async fn test_concurrent_mixed_outcomes_classify_independently() {
    let executor = sh_executor();

    let ok = tokio::spawn({
        let executor = executor.clone();
        async move { executor.execute(&Submission::new("echo fine")).await }
    });
    let err = tokio::spawn({
        let executor = executor.clone();
        async move { executor.execute(&Submission::new("echo bad >&2; exit 1")).await }
    });

    let ok = ok.await.expect("task panicked");
    let err = err.await.expect("task panicked");

    assert!(ok.is_success());
    assert_eq!(ok.stdout, "fine");
    assert!(!err.is_success());
    assert_eq!(err.stderr, "bad");
    assert!(err.stdout.is_empty());
}
