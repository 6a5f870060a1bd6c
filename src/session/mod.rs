//! Session loop: listen, interpret, resolve, report, repeat.
//!
//! States move `Idle -> Listening <-> Processing -> Stopped`. A stopped
//! session never listens again.

mod processor;
mod report;

pub use processor::{CommandProcessor, CommandResult};
pub use report::{write_banner, write_help, write_outcome};

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SessionSettings;
use crate::platform::{ApplicationCatalog, ProcessDirectory};
use crate::voice::{Heard, InputError, InputSource, ListenWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listening,
    Processing,
    Stopped,
}

/// Errors that end a session early
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// What a single listen cycle produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    Command(CommandResult),
    /// Nothing usable was heard; the session keeps listening
    Nothing,
    /// The input source is exhausted
    InputClosed,
}

/// Drives one input source through the command processor
pub struct Session<S, C, P, W> {
    input: S,
    processor: CommandProcessor<C, P, W>,
    settings: SessionSettings,
    window: ListenWindow,
    state: SessionState,
    interrupt: Arc<AtomicBool>,
}

impl<S, C, P, W> Session<S, C, P, W>
where
    S: InputSource,
    C: ApplicationCatalog,
    P: ProcessDirectory,
    W: Write,
{
    pub fn new(
        input: S,
        processor: CommandProcessor<C, P, W>,
        settings: SessionSettings,
        window: ListenWindow,
    ) -> Self {
        Self {
            input,
            processor,
            settings,
            window,
            state: SessionState::Idle,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop before its next listen once set
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, SessionState::Listening | SessionState::Processing)
    }

    pub fn processor(&self) -> &CommandProcessor<C, P, W> {
        &self.processor
    }

    pub fn into_processor(self) -> CommandProcessor<C, P, W> {
        self.processor
    }

    /// Run until the user says stop, the input closes or the interrupt flag
    /// is raised. Fails only if the input device is unusable or output
    /// cannot be written.
    pub fn start_listening(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            debug!(state = ?self.state, "session already started");
            return Ok(());
        }

        if let Some(notice) = self.input.preparing_notice() {
            let notice = notice.to_string();
            writeln!(self.processor.out(), "{}", notice)?;
            self.processor.out().flush()?;
        }
        if let Err(err) = self.input.prepare() {
            warn!(error = %err, "input source unavailable");
            self.state = SessionState::Stopped;
            return Err(err.into());
        }
        if let Some(notice) = self.input.ready_notice() {
            let notice = notice.to_string();
            writeln!(self.processor.out(), "{}", notice)?;
        }

        if self.settings.show_banner {
            write_banner(self.processor.out())?;
        }
        self.state = SessionState::Listening;
        info!("session started");

        let pause = Duration::from_millis(self.settings.pause_between_commands_ms);
        while self.state == SessionState::Listening {
            if self.interrupted() {
                writeln!(self.processor.out(), "\nStopping voice control...")?;
                break;
            }
            self.run_cycle()?;
            if self.state == SessionState::Listening && !pause.is_zero() {
                thread::sleep(pause);
            }
        }

        self.state = SessionState::Stopped;
        writeln!(self.processor.out(), "Voice controller stopped.")?;
        self.processor.out().flush()?;
        info!("session stopped");
        Ok(())
    }

    /// One listen and, if something was heard, one command.
    pub fn run_cycle(&mut self) -> io::Result<Cycle> {
        if let Some(prompt) = self.input.prompt() {
            let prompt = prompt.to_string();
            writeln!(self.processor.out(), "{}", prompt)?;
        }
        self.processor.out().flush()?;

        match self.input.listen(self.window) {
            Heard::Closed => {
                debug!("input source closed");
                self.state = SessionState::Stopped;
                Ok(Cycle::InputClosed)
            }
            Heard::Nothing(reason) => {
                if let Some(reason) = reason {
                    writeln!(self.processor.out(), "{}", reason)?;
                }
                Ok(Cycle::Nothing)
            }
            Heard::Text(text) => {
                if self.input.echoes_transcript() {
                    writeln!(self.processor.out(), "Recognized: {}", text)?;
                }
                self.state = SessionState::Processing;
                let result = self.processor.process(&text)?;
                self.state = if result == CommandResult::Stop {
                    SessionState::Stopped
                } else {
                    SessionState::Listening
                };
                Ok(Cycle::Command(result))
            }
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }
}
