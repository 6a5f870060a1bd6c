use serde::{Deserialize, Serialize};

use super::AppName;

/// What the user wants done to an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Start the application
    Launch,
    /// Terminate its running processes
    Terminate,
}

impl Action {
    /// The spoken verb for this action
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Launch => "open",
            Action::Terminate => "close",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verb())
    }
}

/// A parsed command, consumed once by the session loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `open <app>`
    Open(AppName),
    /// `close <app>`
    Close(AppName),
    /// `stop listening` / `exit`
    StopListening,
    /// Anything else; carries the raw text
    Unknown(String),
}

impl Intent {
    /// The action and target, for intents that reach the resolver
    pub fn target(&self) -> Option<(Action, &AppName)> {
        match self {
            Intent::Open(app) => Some((Action::Launch, app)),
            Intent::Close(app) => Some((Action::Terminate, app)),
            Intent::StopListening | Intent::Unknown(_) => None,
        }
    }
}
