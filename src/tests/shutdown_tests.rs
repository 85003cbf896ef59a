#[cfg(all(test, unix))]
pub mod tests {
    use std::process::Command;
    use std::time::Duration;

    use crate::bot::init::shutdown_signal;

    #[tokio::test]
    async fn test_sigterm_triggers_shutdown() {
        let shutdown = shutdown_signal().unwrap();

        let status = Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let signal = tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .unwrap();
        assert_eq!(signal, "SIGTERM");
    }
}
