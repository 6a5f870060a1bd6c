//! Command interpreter: split a transcript into an intent and an app name.
//!
//! Rules, first match wins:
//! 1. contains `stop listening` or `exit` -> stop
//! 2. contains `open`  -> open the remainder
//! 3. contains `close` -> close the remainder
//! 4. anything else    -> unknown

use crate::domain::{Action, AppName, Intent};

/// The command named an action but no application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    #[error("Please specify which application to {action}")]
    MissingAppName { action: Action },
}

/// Parse one command. Input is lowercased and trimmed first.
pub fn interpret(command: &str) -> Result<Intent, InterpretError> {
    let command = command.trim().to_lowercase();

    if command.contains("stop listening") || command.contains("exit") {
        return Ok(Intent::StopListening);
    }

    if command.contains("open") {
        return app_after(&command, Action::Launch).map(Intent::Open);
    }

    if command.contains("close") {
        return app_after(&command, Action::Terminate).map(Intent::Close);
    }

    Ok(Intent::Unknown(command))
}

/// Remove every occurrence of the keyword; what is left names the app.
fn app_after(command: &str, action: Action) -> Result<AppName, InterpretError> {
    let remainder = command.replace(action.verb(), "");
    AppName::new(remainder).ok_or(InterpretError::MissingAppName { action })
}
