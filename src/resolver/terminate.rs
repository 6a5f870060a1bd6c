//! Terminate strategies, in the order the engine tries them.

use tracing::{debug, info, warn};

use crate::domain::{AppName, AttemptFailure, ProcessDescriptor, TerminationReport};
use crate::platform::{ProcessDirectory, TerminateError};

/// What one terminate strategy achieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminateAttempt {
    /// At least one process was closed, or the OS reported success without a count
    Closed(TerminationReport),
    /// Nothing was closed
    NoneClosed(AttemptFailure),
}

/// One way of finding and closing an application's processes
pub trait TerminateStrategy {
    fn name(&self) -> &'static str;

    fn attempt(&self, app: &AppName, processes: &dyn ProcessDirectory) -> TerminateAttempt;
}

/// Processes named exactly `<app><suffix>`, ignoring case
#[derive(Debug, Clone, Default)]
pub struct ExactExecutable {
    suffix: String,
}

impl ExactExecutable {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl TerminateStrategy for ExactExecutable {
    fn name(&self) -> &'static str {
        "exact_executable"
    }

    fn attempt(&self, app: &AppName, processes: &dyn ProcessDirectory) -> TerminateAttempt {
        let executable = app.with_suffix(&self.suffix).to_lowercase();
        terminate_matching(processes, |p| p.name.to_lowercase() == executable)
    }
}

/// Processes whose name contains the app name, ignoring case
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringName;

impl TerminateStrategy for SubstringName {
    fn name(&self) -> &'static str {
        "substring_name"
    }

    fn attempt(&self, app: &AppName, processes: &dyn ProcessDirectory) -> TerminateAttempt {
        terminate_matching(processes, |p| app.is_contained_in(&p.name))
    }
}

/// Hand the name to the OS process-control surface, matching names and
/// window titles. It reports no count, so success is only presumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOrTitle;

impl TerminateStrategy for NameOrTitle {
    fn name(&self) -> &'static str {
        "name_or_title"
    }

    fn attempt(&self, app: &AppName, processes: &dyn ProcessDirectory) -> TerminateAttempt {
        match processes.terminate_by_name_or_title(app) {
            Ok(()) => {
                info!(app = %app, "process-control surface accepted close request");
                TerminateAttempt::Closed(TerminationReport::assumed())
            }
            Err(e) => TerminateAttempt::NoneClosed(e.into()),
        }
    }
}

/// Signal every process in a fresh snapshot that matches `pred`.
///
/// Vanished processes are skipped; a refusal on one process does not stop
/// the others from being tried. The running voxctl process never matches.
fn terminate_matching(
    processes: &dyn ProcessDirectory,
    pred: impl Fn(&ProcessDescriptor) -> bool,
) -> TerminateAttempt {
    let snapshot = match processes.list_processes() {
        Ok(snapshot) => snapshot,
        Err(e) => return TerminateAttempt::NoneClosed(e.into()),
    };

    let own_pid = std::process::id();
    let mut terminated = Vec::new();
    let mut denied = Vec::new();
    let mut errors = Vec::new();

    for process in snapshot.into_iter().filter(|p| pred(p)) {
        if process.pid == own_pid {
            debug!(pid = process.pid, name = %process.name, "not closing own process");
            continue;
        }
        match processes.terminate(process.pid) {
            Ok(()) => {
                info!(pid = process.pid, name = %process.name, "closed process");
                terminated.push(process);
            }
            Err(TerminateError::NotFound) => {
                debug!(pid = process.pid, name = %process.name, "process exited before it was signalled");
            }
            Err(TerminateError::PermissionDenied) => {
                warn!(pid = process.pid, name = %process.name, "access denied closing process");
                denied.push(process);
            }
            Err(TerminateError::Other(detail)) => {
                warn!(pid = process.pid, name = %process.name, "failed to close process: {}", detail);
                errors.push(format!("{}: {}", process, detail));
            }
        }
    }

    if !terminated.is_empty() {
        TerminateAttempt::Closed(TerminationReport::confirmed(terminated, denied))
    } else if !denied.is_empty() {
        TerminateAttempt::NoneClosed(AttemptFailure::AccessDenied(denied))
    } else if !errors.is_empty() {
        TerminateAttempt::NoneClosed(AttemptFailure::Rejected(errors.join("; ")))
    } else {
        TerminateAttempt::NoneClosed(AttemptFailure::NoMatch)
    }
}
