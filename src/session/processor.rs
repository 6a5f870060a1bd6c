//! One command in, one report out.

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use super::report;
use crate::domain::{Action, AppName, Intent, ResolutionOutcome};
use crate::interpreter::{InterpretError, interpret};
use crate::platform::{ApplicationCatalog, ProcessDirectory};
use crate::resolver::ResolutionEngine;

/// What a single command led to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandResult {
    /// The resolver ran
    Resolved {
        action: Action,
        app: AppName,
        outcome: ResolutionOutcome,
    },
    /// `open`/`close` without an app name; nothing was resolved
    MissingAppName { action: Action },
    /// Unrecognized command; the help text was shown
    Help { text: String },
    /// The user asked to stop
    Stop,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        match self {
            CommandResult::Resolved { outcome, .. } => outcome.is_success(),
            CommandResult::Stop => true,
            CommandResult::MissingAppName { .. } | CommandResult::Help { .. } => false,
        }
    }
}

/// Interprets commands, runs the resolver and writes the report
pub struct CommandProcessor<C, P, W> {
    engine: ResolutionEngine<C, P>,
    out: W,
}

impl<C, P, W> CommandProcessor<C, P, W>
where
    C: ApplicationCatalog,
    P: ProcessDirectory,
    W: Write,
{
    pub fn new(engine: ResolutionEngine<C, P>, out: W) -> Self {
        Self { engine, out }
    }

    pub fn engine(&self) -> &ResolutionEngine<C, P> {
        &self.engine
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (ResolutionEngine<C, P>, W) {
        (self.engine, self.out)
    }

    /// Handle one command. Only writing the report can fail.
    pub fn process(&mut self, command: &str) -> io::Result<CommandResult> {
        let intent = match interpret(command) {
            Ok(intent) => intent,
            Err(err @ InterpretError::MissingAppName { action }) => {
                debug!(command, "command is missing an app name");
                writeln!(self.out, "{}", err)?;
                return Ok(CommandResult::MissingAppName { action });
            }
        };
        debug!(?intent, "interpreted command");

        match intent {
            Intent::StopListening => {
                writeln!(self.out, "Stopping voice control...")?;
                Ok(CommandResult::Stop)
            }
            Intent::Unknown(text) => {
                report::write_help(&mut self.out)?;
                Ok(CommandResult::Help { text })
            }
            Intent::Open(app) => self.resolve(Action::Launch, app),
            Intent::Close(app) => self.resolve(Action::Terminate, app),
        }
    }

    fn resolve(&mut self, action: Action, app: AppName) -> io::Result<CommandResult> {
        if action == Action::Launch {
            writeln!(self.out, "Searching for '{}' in installed apps...", app)?;
        }
        let outcome = self.engine.resolve(action, &app);
        report::write_outcome(&mut self.out, action, &app, &outcome)?;
        Ok(CommandResult::Resolved {
            action,
            app,
            outcome,
        })
    }
}
