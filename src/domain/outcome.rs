//! Results of resolving an app name against the OS.

use serde::Serialize;

use super::{Action, AppIdentifier, AppName, ProcessDescriptor};

/// Why a single strategy did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AttemptFailure {
    /// Nothing in the catalog or process table matched the name
    NoMatch,
    /// The shell could not find a program by that name
    NotFound(String),
    /// The OS refused to start the program
    PermissionDenied(String),
    /// Matching processes were found but the OS refused to terminate them
    AccessDenied(Vec<ProcessDescriptor>),
    /// The name cannot be a program name on this system
    MalformedName(String),
    /// The OS surface behind the adapter could not be invoked at all
    Unavailable(String),
    /// Any other refusal reported by the OS
    Rejected(String),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::NoMatch => write!(f, "no match"),
            AttemptFailure::NotFound(detail) => write!(f, "not found: {}", detail),
            AttemptFailure::PermissionDenied(detail) => write!(f, "permission denied: {}", detail),
            AttemptFailure::AccessDenied(denied) => {
                write!(f, "access denied to {} matching process(es)", denied.len())
            }
            AttemptFailure::MalformedName(detail) => write!(f, "malformed name: {}", detail),
            AttemptFailure::Unavailable(detail) => write!(f, "unavailable: {}", detail),
            AttemptFailure::Rejected(detail) => write!(f, "rejected: {}", detail),
        }
    }
}

/// One strategy that ran and failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub strategy: &'static str,
    pub reason: AttemptFailure,
}

impl AttemptRecord {
    pub fn new(strategy: &'static str, reason: AttemptFailure) -> Self {
        Self { strategy, reason }
    }
}

/// What a successful launch started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchTarget {
    /// An installed application found in the catalog
    Catalog { id: AppIdentifier, display_name: String },
    /// A program started by its literal name
    Program { name: String },
}

impl LaunchTarget {
    pub fn label(&self) -> &str {
        match self {
            LaunchTarget::Catalog { display_name, .. } => display_name,
            LaunchTarget::Program { name } => name,
        }
    }
}

/// Whether a termination was observed or only presumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Certainty {
    /// Specific processes were signalled and accepted the signal
    Confirmed,
    /// The OS surface reported no error but gave no count
    Assumed,
}

/// Processes a terminate strategy dealt with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminationReport {
    pub certainty: Certainty,
    /// Empty when `certainty` is `Assumed`
    pub terminated: Vec<ProcessDescriptor>,
    /// Matches the OS refused to terminate in the same strategy
    pub denied: Vec<ProcessDescriptor>,
}

impl TerminationReport {
    pub fn confirmed(terminated: Vec<ProcessDescriptor>, denied: Vec<ProcessDescriptor>) -> Self {
        Self {
            certainty: Certainty::Confirmed,
            terminated,
            denied,
        }
    }

    pub fn assumed() -> Self {
        Self {
            certainty: Certainty::Assumed,
            terminated: Vec::new(),
            denied: Vec::new(),
        }
    }

    pub fn closed_count(&self) -> usize {
        self.terminated.len()
    }
}

/// The adapter-specific half of a success
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuccessDescriptor {
    Launched {
        strategy: &'static str,
        target: LaunchTarget,
    },
    Terminated {
        strategy: &'static str,
        report: TerminationReport,
    },
}

impl SuccessDescriptor {
    pub fn strategy(&self) -> &'static str {
        match self {
            SuccessDescriptor::Launched { strategy, .. }
            | SuccessDescriptor::Terminated { strategy, .. } => strategy,
        }
    }
}

/// All strategies ran and none succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub action: Action,
    pub app: AppName,
    pub attempts: Vec<AttemptRecord>,
}

impl FailureReport {
    pub fn new(action: Action, app: AppName, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            action,
            app,
            attempts,
        }
    }

    /// Reasons the user might try to fix, not a verified cause.
    pub fn candidate_reasons(&self) -> Vec<String> {
        match self.action {
            Action::Launch => {
                let mut reasons = vec![
                    format!("App '{}' is not installed", self.app),
                    "Try saying the exact app name as it appears in the Start Menu".to_string(),
                    "For store apps, try the exact name from the store".to_string(),
                    "Some apps may have different executable names".to_string(),
                ];
                if self.has_reason(|r| matches!(r, AttemptFailure::PermissionDenied(_))) {
                    reasons.push("The system may have refused permission to start it".to_string());
                }
                if self.has_reason(|r| matches!(r, AttemptFailure::MalformedName(_))) {
                    reasons.push(
                        "The name may contain characters that are not valid in a program name"
                            .to_string(),
                    );
                }
                if self.has_reason(|r| matches!(r, AttemptFailure::Unavailable(_))) {
                    reasons.push("The application catalog could not be queried".to_string());
                }
                reasons
            }
            Action::Terminate => {
                let mut reasons = vec![
                    format!("App '{}' is not currently running", self.app),
                    "App may have a different process name".to_string(),
                    "Try saying the exact process name".to_string(),
                ];
                if self.has_reason(|r| matches!(r, AttemptFailure::AccessDenied(_))) {
                    reasons.push("Matching processes may need elevated rights to close".to_string());
                }
                reasons
            }
        }
    }

    fn has_reason(&self, pred: impl Fn(&AttemptFailure) -> bool) -> bool {
        self.attempts.iter().any(|a| pred(&a.reason))
    }
}

/// Result of one resolution run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Success {
        descriptor: SuccessDescriptor,
        /// Strategies that ran and failed before the winning one
        failed_attempts: Vec<AttemptRecord>,
    },
    Failure(FailureReport),
}

impl ResolutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionOutcome::Success { .. })
    }

    /// Names of every strategy that actually ran, in order
    pub fn strategies_run(&self) -> Vec<&'static str> {
        match self {
            ResolutionOutcome::Success {
                descriptor,
                failed_attempts,
            } => failed_attempts
                .iter()
                .map(|a| a.strategy)
                .chain(std::iter::once(descriptor.strategy()))
                .collect(),
            ResolutionOutcome::Failure(report) => {
                report.attempts.iter().map(|a| a.strategy).collect()
            }
        }
    }
}
