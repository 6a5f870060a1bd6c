//! Resolution engine: turn an app name into a launch or a termination.
//!
//! Both paths walk an ordered list of strategies, but they stop for
//! different reasons:
//!
//! - **Launch** stops at the first strategy that reports success
//!   ([`ResolutionEngine::launch`]).
//! - **Terminate** stops at the first strategy that closed at least one
//!   process ([`ResolutionEngine::terminate`]); a strategy that ran without
//!   error but closed nothing lets the next one run.
//!
//! Strategies are stateless but side-effecting, so neither loop ever runs a
//! strategy again after a success.

mod launch;
mod terminate;


pub use launch::{CatalogMatch, DirectName, ExecutableSuffix, LaunchStrategy};
pub use terminate::{ExactExecutable, NameOrTitle, SubstringName, TerminateAttempt, TerminateStrategy};

use tracing::{debug, info, warn};

use crate::domain::{
    Action, AppName, AttemptRecord, FailureReport, ResolutionOutcome, SuccessDescriptor,
};
use crate::platform::{ApplicationCatalog, ProcessDirectory};

/// Default executable suffix for the current platform
pub fn default_executable_suffix() -> &'static str {
    if cfg!(windows) { ".exe" } else { "" }
}

/// Runs launch and terminate strategies against a catalog and a process table
pub struct ResolutionEngine<C, P> {
    catalog: C,
    processes: P,
    launch_strategies: Vec<Box<dyn LaunchStrategy + Send>>,
    terminate_strategies: Vec<Box<dyn TerminateStrategy + Send>>,
}

impl<C, P> ResolutionEngine<C, P>
where
    C: ApplicationCatalog,
    P: ProcessDirectory,
{
    /// Engine with the standard strategy order for both paths
    pub fn new(catalog: C, processes: P, executable_suffix: &str) -> Self {
        Self {
            catalog,
            processes,
            launch_strategies: vec![
                Box::new(CatalogMatch),
                Box::new(DirectName),
                Box::new(ExecutableSuffix::new(executable_suffix)),
            ],
            terminate_strategies: vec![
                Box::new(ExactExecutable::new(executable_suffix)),
                Box::new(SubstringName),
                Box::new(NameOrTitle),
            ],
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn processes(&self) -> &P {
        &self.processes
    }

    /// Start the application. First success wins; nothing is retried.
    pub fn launch(&self, app: &AppName) -> ResolutionOutcome {
        let mut failed = Vec::new();

        for strategy in &self.launch_strategies {
            let name = strategy.name();
            debug!(app = %app, strategy = name, "trying launch strategy");

            match strategy.attempt(app, &self.catalog) {
                Ok(target) => {
                    info!(app = %app, strategy = name, launched = target.label(), "launch request accepted");
                    return ResolutionOutcome::Success {
                        descriptor: SuccessDescriptor::Launched {
                            strategy: name,
                            target,
                        },
                        failed_attempts: failed,
                    };
                }
                Err(reason) => {
                    debug!(app = %app, strategy = name, %reason, "launch strategy failed");
                    failed.push(AttemptRecord::new(name, reason));
                }
            }
        }

        warn!(app = %app, attempts = failed.len(), "could not launch application");
        ResolutionOutcome::Failure(FailureReport::new(Action::Launch, app.clone(), failed))
    }

    /// Terminate the application's processes. A strategy only runs if every
    /// earlier one closed zero processes.
    pub fn terminate(&self, app: &AppName) -> ResolutionOutcome {
        let mut failed = Vec::new();

        for strategy in &self.terminate_strategies {
            let name = strategy.name();
            debug!(app = %app, strategy = name, "trying terminate strategy");

            match strategy.attempt(app, &self.processes) {
                TerminateAttempt::Closed(report) => {
                    info!(
                        app = %app,
                        strategy = name,
                        closed = report.closed_count(),
                        certainty = ?report.certainty,
                        "terminate strategy closed processes"
                    );
                    return ResolutionOutcome::Success {
                        descriptor: SuccessDescriptor::Terminated {
                            strategy: name,
                            report,
                        },
                        failed_attempts: failed,
                    };
                }
                TerminateAttempt::NoneClosed(reason) => {
                    debug!(app = %app, strategy = name, %reason, "terminate strategy closed nothing");
                    failed.push(AttemptRecord::new(name, reason));
                }
            }
        }

        warn!(app = %app, "no running instances closed");
        ResolutionOutcome::Failure(FailureReport::new(Action::Terminate, app.clone(), failed))
    }

    /// Dispatch on the action
    pub fn resolve(&self, action: Action, app: &AppName) -> ResolutionOutcome {
        match action {
            Action::Launch => self.launch(app),
            Action::Terminate => self.terminate(app),
        }
    }
}
