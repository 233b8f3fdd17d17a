//! Key generator process: spawn, drain both streams, wait for exit.

use crate::error::{KeygenError, KeygenResult};
use crate::types::SubprocessOutcome;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

const READ_CHUNK: usize = 4096;

/// Run the key generator to completion and collect its exit code and stderr text.
///
/// Stdout is logged and dropped. Stderr bytes are kept in arrival order. With a
/// `timeout`, a child still running at the deadline is killed and the call fails
/// with `Timeout`.
pub async fn run_key_generator(
    binary: &Path,
    args: &[OsString],
    timeout: Option<Duration>,
) -> KeygenResult<SubprocessOutcome> {
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| KeygenError::BinaryUnavailable {
            path: binary.to_path_buf(),
            source: e,
        })?;
    debug!(component = "orchestrator", pid = ?child.id(), "key generator spawned");

    let waited = match timeout {
        Some(limit) => tokio::time::timeout(limit, wait_and_drain(&mut child))
            .await
            .ok(),
        None => Some(wait_and_drain(&mut child).await),
    };

    let Some((status, stderr_bytes)) = waited else {
        let seconds = timeout.map(|t| t.as_secs()).unwrap_or_default();
        warn!(component = "orchestrator", seconds, "key generator timed out, killing");
        if let Err(e) = child.kill().await {
            debug!(component = "orchestrator", error = %e, "kill after timeout failed");
        }
        return Err(KeygenError::Timeout { seconds });
    };

    let status = status.map_err(|e| {
        KeygenError::Runtime(format!("Failed to wait for key generator: {}", e))
    })?;
    debug!(component = "orchestrator", code = ?status.code(), "key generator exited");

    Ok(SubprocessOutcome {
        exit_code: status.code(),
        stderr_text: String::from_utf8_lossy(&stderr_bytes).into_owned(),
    })
}

async fn wait_and_drain(child: &mut Child) -> (std::io::Result<ExitStatus>, Vec<u8>) {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let drain_stdout = async {
        if let Some(stdout) = stdout {
            drain(stdout, "stdout", |_| {}).await;
        }
    };
    let drain_stderr = async {
        let mut collected = Vec::new();
        if let Some(stderr) = stderr {
            drain(stderr, "stderr", |chunk| collected.extend_from_slice(chunk)).await;
        }
        collected
    };

    // Streams must be drained alongside wait() or a chatty child blocks on a full pipe.
    let ((), stderr_bytes, status) = tokio::join!(drain_stdout, drain_stderr, child.wait());
    (status, stderr_bytes)
}

async fn drain<R, F>(mut stream: R, name: &'static str, mut on_chunk: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(&[u8]),
{
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                trace!(
                    component = "orchestrator",
                    stream = name,
                    chunk = %String::from_utf8_lossy(&buf[..n]),
                    "key generator output"
                );
                on_chunk(&buf[..n]);
            }
            Err(e) => {
                debug!(component = "orchestrator", stream = name, error = %e, "stream read failed");
                break;
            }
        }
    }
}
