//! User-facing text for commands and outcomes.

use std::io::{self, Write};

use crate::domain::{
    Action, AppName, AttemptFailure, AttemptRecord, Certainty, LaunchTarget, ResolutionOutcome,
    SuccessDescriptor,
};

pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Voice App Controller Started ===")?;
    writeln!(out, "Say commands like:")?;
    writeln!(out, "  - 'open notepad'")?;
    writeln!(out, "  - 'close chrome'")?;
    writeln!(out, "  - 'stop listening' to exit")?;
    writeln!(out, "=====================================")?;
    writeln!(out)
}

pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Available commands:")?;
    writeln!(out, "  - 'open [app name]' - Opens an application")?;
    writeln!(out, "  - 'close [app name]' - Closes an application")?;
    writeln!(out, "  - 'stop listening' - Stops the voice controller")
}

pub fn write_outcome(
    out: &mut impl Write,
    action: Action,
    app: &AppName,
    outcome: &ResolutionOutcome,
) -> io::Result<()> {
    match outcome {
        ResolutionOutcome::Success {
            descriptor,
            failed_attempts,
        } => {
            write_denied(out, failed_attempts)?;
            match descriptor {
                SuccessDescriptor::Launched { target, .. } => match target {
                    LaunchTarget::Catalog { display_name, .. } => {
                        writeln!(out, "Opened {} (installed app)", display_name)
                    }
                    LaunchTarget::Program { name } => writeln!(out, "Opened {}", name),
                },
                SuccessDescriptor::Terminated { report, .. } => {
                    for process in &report.terminated {
                        writeln!(out, "Closed {}", process)?;
                    }
                    for process in &report.denied {
                        writeln!(out, "Access denied to close {}", process.name)?;
                    }
                    match report.certainty {
                        Certainty::Confirmed => writeln!(out, "Successfully closed {}", app),
                        Certainty::Assumed => {
                            writeln!(out, "Attempted to close {} (not verified)", app)
                        }
                    }
                }
            }
        }
        ResolutionOutcome::Failure(report) => {
            write_denied(out, &report.attempts)?;
            match action {
                Action::Launch => writeln!(out, "Could not start application: {}", app)?,
                Action::Terminate => writeln!(out, "No running instances of '{}' found", app)?,
            }
            writeln!(out, "Possible reasons:")?;
            for reason in report.candidate_reasons() {
                writeln!(out, "  - {}", reason)?;
            }
            writeln!(out, "Attempts:")?;
            for attempt in &report.attempts {
                writeln!(out, "  - {}: {}", attempt.strategy, attempt.reason)?;
            }
            Ok(())
        }
    }
}

fn write_denied(out: &mut impl Write, attempts: &[AttemptRecord]) -> io::Result<()> {
    for attempt in attempts {
        if let AttemptFailure::AccessDenied(denied) = &attempt.reason {
            for process in denied {
                writeln!(out, "Access denied to close {}", process.name)?;
            }
        }
    }
    Ok(())
}
