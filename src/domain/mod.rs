//! Core domain types for voxctl

mod app_name;
mod intent;
mod outcome;
mod process;

pub use app_name::{AppIdentifier, AppName};
pub use intent::{Action, Intent};
pub use outcome::{
    AttemptFailure, AttemptRecord, Certainty, FailureReport, LaunchTarget, ResolutionOutcome,
    SuccessDescriptor, TerminationReport,
};
pub use process::ProcessDescriptor;
