//! Process table adapter backed by `sysinfo`.

use sysinfo::System;
use tracing::debug;

use super::{AdapterError, CommandRunner, ProcessDirectory, TerminateError};
use crate::domain::{AppName, ProcessDescriptor};

/// The live OS process table
#[derive(Debug, Clone, Default)]
pub struct SystemProcesses {
    runner: CommandRunner,
}

impl SystemProcesses {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

impl ProcessDirectory for SystemProcesses {
    fn list_processes(&self) -> Result<Vec<ProcessDescriptor>, AdapterError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(AdapterError::Unavailable(
                "process listing is not supported on this platform".to_string(),
            ));
        }

        let mut system = System::new();
        system.refresh_processes();
        let titles = window_titles();

        let processes: Vec<ProcessDescriptor> = system
            .processes()
            .iter()
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                ProcessDescriptor {
                    pid,
                    name: process.name().to_string(),
                    window_title: titles.get(&pid).cloned(),
                }
            })
            .collect();
        debug!(count = processes.len(), "listed processes");
        Ok(processes)
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        send_terminate(pid)
    }

    fn terminate_by_name_or_title(&self, app: &AppName) -> Result<(), AdapterError> {
        kill_by_name_or_title(&self.runner, app)
    }
}

/// SIGTERM, the same polite request `kill` sends by default.
#[cfg(unix)]
fn send_terminate(pid: u32) -> Result<(), TerminateError> {
    let Ok(raw) = libc::pid_t::try_from(pid) else {
        return Err(TerminateError::NotFound);
    };
    if raw <= 0 {
        // 0 and negatives address process groups, never a single process
        return Err(TerminateError::NotFound);
    }

    let rc = unsafe { libc::kill(raw, libc::SIGTERM) };
    if rc == 0 {
        return Ok(());
    }
    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(TerminateError::NotFound),
        Some(libc::EPERM) => Err(TerminateError::PermissionDenied),
        _ => Err(TerminateError::Other(err.to_string())),
    }
}

#[cfg(not(unix))]
fn send_terminate(pid: u32) -> Result<(), TerminateError> {
    use sysinfo::Pid;

    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    if !system.refresh_process(pid) {
        return Err(TerminateError::NotFound);
    }
    let Some(process) = system.process(pid) else {
        return Err(TerminateError::NotFound);
    };
    if process.kill() {
        return Ok(());
    }

    // TerminateProcess gives no reason; a process that is still there was refused.
    if system.refresh_process(pid) {
        Err(TerminateError::PermissionDenied)
    } else {
        Err(TerminateError::NotFound)
    }
}

#[cfg(target_os = "windows")]
fn window_titles() -> std::collections::HashMap<u32, String> {
    super::windows::window_titles()
}

#[cfg(not(target_os = "windows"))]
fn window_titles() -> std::collections::HashMap<u32, String> {
    std::collections::HashMap::new()
}

#[cfg(target_os = "windows")]
fn kill_by_name_or_title(runner: &CommandRunner, app: &AppName) -> Result<(), AdapterError> {
    super::windows::stop_process_by_name_or_title(runner, app)
}

/// `pgrep` matches process names only; there are no window titles to search.
/// The matches are signalled here so the running voxctl process can be skipped.
#[cfg(unix)]
fn kill_by_name_or_title(runner: &CommandRunner, app: &AppName) -> Result<(), AdapterError> {
    use std::process::Command;

    let pattern = regex::escape(app.as_str());
    let output = runner.output(
        Command::new("pgrep").args(["-i", "--"]).arg(&pattern),
        "pgrep",
    )?;
    match output.status.code() {
        Some(0) => {}
        Some(1) => return Err(no_name_match(app)),
        _ => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AdapterError::Rejected(format!(
                "pgrep exited with {}: {}",
                output.status, stderr
            )));
        }
    }

    let own_pid = std::process::id();
    let pids: Vec<u32> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .filter(|pid| *pid != own_pid)
        .collect();

    let mut signalled = false;
    let mut denied = false;
    for pid in pids {
        match send_terminate(pid) {
            Ok(()) => signalled = true,
            Err(TerminateError::PermissionDenied) => denied = true,
            Err(e) => debug!(pid, "name match not signalled: {}", e),
        }
    }

    if signalled {
        Ok(())
    } else if denied {
        Err(AdapterError::PermissionDenied(format!(
            "not permitted to signal processes matching '{}'",
            app
        )))
    } else {
        Err(no_name_match(app))
    }
}

#[cfg(unix)]
fn no_name_match(app: &AppName) -> AdapterError {
    AdapterError::NotFound(format!("no process name matches '{}'", app))
}

#[cfg(not(any(unix, target_os = "windows")))]
fn kill_by_name_or_title(_runner: &CommandRunner, _app: &AppName) -> Result<(), AdapterError> {
    Err(AdapterError::Unavailable(
        "no process-control surface on this platform".to_string(),
    ))
}
