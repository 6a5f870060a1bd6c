//! Running helper programs with an optional bounded wait.

use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::AdapterError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs OS helper commands (PowerShell, `open`, `gtk-launch`, `pgrep`).
///
/// With no timeout a call blocks for as long as the program runs. With a
/// timeout the program is killed once the deadline passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run to completion and capture stdout/stderr.
    pub fn output(&self, cmd: &mut Command, label: &str) -> Result<Output, AdapterError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!(command = label, "running helper command");

        let Some(timeout) = self.timeout else {
            return cmd.output().map_err(|e| AdapterError::from_io(label, e));
        };

        let mut child = cmd.spawn().map_err(|e| AdapterError::from_io(label, e))?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_with_deadline(&mut child, timeout, label)?;
        Ok(Output {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }

    /// Run to completion; a non-zero exit becomes an error carrying stderr.
    pub fn run_checked(&self, cmd: &mut Command, label: &str) -> Result<Output, AdapterError> {
        let output = self.output(cmd, label)?;
        if output.status.success() {
            return Ok(output);
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("{} exited with {}", label, output.status)
        } else {
            format!("{} exited with {}: {}", label, output.status, stderr)
        };
        Err(classify_stderr(detail))
    }
}

/// Map common OS wording in a failure message onto an error class.
fn classify_stderr(detail: String) -> AdapterError {
    let lower = detail.to_lowercase();
    if lower.contains("access is denied")
        || lower.contains("permission denied")
        || lower.contains("not permitted")
    {
        AdapterError::PermissionDenied(detail)
    } else if lower.contains("cannot find")
        || lower.contains("not found")
        || lower.contains("unable to find")
        || lower.contains("no such")
    {
        AdapterError::NotFound(detail)
    } else {
        AdapterError::Rejected(detail)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
    label: &str,
) -> Result<std::process::ExitStatus, AdapterError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                warn!(command = label, ?timeout, "helper command timed out, killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Err(AdapterError::TimedOut(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(AdapterError::from_io(label, e)),
        }
    }
}
