use crate::error::ProcessError;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

use super::WorkerCommand;

#[derive(Debug)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run one worker to completion.
///
/// `payload` goes to the child's stdin, which is then closed. Stdout and stderr
/// are drained while the payload is still being written, so neither side can
/// block on a full pipe. A non-zero exit is returned as `Ok`; only launch and
/// IO failures (and an elapsed `timeout`, when one is set) are errors. With
/// `timeout` unset the wait is unbounded.
pub async fn run_worker_process(
    command: &WorkerCommand,
    payload: &str,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ProcessError> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = std::time::Instant::now();

    let mut child = cmd.spawn().map_err(|e| ProcessError::Spawn {
        program: command.display_program(),
        source: e,
    })?;
    debug!("Spawned {} (pid {:?})", command.display_program(), child.id());

    let stdin = child.stdin.take();
    let payload = payload.as_bytes().to_vec();
    let write_input = async move {
        if let Some(mut stdin) = stdin {
            match stdin.write_all(&payload).await {
                // Child exited without reading its input; its exit status says why
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e),
                Ok(()) => {}
            }
            // Dropping the handle closes the pipe and signals EOF
            drop(stdin);
        }
        Ok(())
    };

    let run = async {
        let (written, output) = tokio::join!(write_input, child.wait_with_output());
        written.and(output)
    };

    let output = match timeout {
        Some(limit) => tokio_timeout(limit, run)
            .await
            .map_err(|_| ProcessError::Timeout(limit))??,
        None => run.await?,
    };

    Ok(ProcessOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh(script: &str) -> WorkerCommand {
        WorkerCommand {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[tokio::test]
    async fn test_payload_reaches_stdin() {
        let output = run_worker_process(&sh("cat"), "def f(): pass", None)
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "def f(): pass");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let output = run_worker_process(&sh("cat >/dev/null; printf boom >&2; exit 3"), "x", None)
            .await
            .unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr, "boom");
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let cmd = WorkerCommand {
            program: PathBuf::from("/nonexistent/aspectrev-worker"),
            args: vec![],
        };
        let err = run_worker_process(&cmd, "x", None).await.unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_large_payload_does_not_deadlock() {
        // Echo more than a pipe buffer back while input is still arriving
        let payload = "a".repeat(1 << 20);
        let output = run_worker_process(&sh("cat"), &payload, None).await.unwrap();
        assert_eq!(output.stdout.len(), payload.len());
    }

    #[tokio::test]
    async fn test_child_ignoring_stdin() {
        let payload = "b".repeat(1 << 20);
        let output = run_worker_process(&sh("exit 0"), &payload, None)
            .await
            .unwrap();
        assert!(output.success());
    }

    #[tokio::test]
    async fn test_timeout() {
        let err = run_worker_process(&sh("sleep 5"), "", Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Timeout(_)));
    }
}
