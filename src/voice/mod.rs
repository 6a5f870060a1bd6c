//! Command input: microphone (sox + whisper-cpp) or plain text lines.
//!
//! Implementation:
//! - Uses `sox` (rec command) for audio recording, starting on speech and
//!   stopping on silence or at the phrase limit
//! - Samples room noise once at startup to raise the silence threshold
//! - Uses `whisper-cli` (from whisper-cpp) for transcription
//! - Falls back to reading one command per line from any `BufRead`
//!
//! A source never fails the session: every problem in a single cycle comes
//! back as [`Heard::Nothing`] with the reason attached.

mod availability;
mod calibration;
mod microphone;
mod recording;
mod text;
mod transcription;

pub use availability::{Availability, check_availability};
pub use microphone::MicrophoneSource;
pub use text::TextSource;
pub use transcription::clean_transcript;

use std::time::Duration;

/// How long to wait for speech and how long a phrase may run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenWindow {
    pub timeout: Duration,
    pub phrase_limit: Duration,
}

impl Default for ListenWindow {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(3),
        }
    }
}

/// Why a listen produced no command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Could not understand the command")]
    Unrecognized,

    #[error("Error with speech recognition service: {0}")]
    ServiceUnavailable(String),

    #[error("Listening timeout")]
    TimedOut,

    /// Fatal: the input device cannot be used at all
    #[error("Input device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Result of one listen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    /// A lowercase, trimmed command
    Text(String),
    /// No command this cycle; `None` means nothing worth reporting
    Nothing(Option<InputError>),
    /// The source is exhausted and will never produce another command
    Closed,
}

/// Something that can be asked for the next command
pub trait InputSource {
    /// Check the source can work at all. Called once before the first listen.
    fn prepare(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    /// Shown before `prepare`, which may take a moment
    fn preparing_notice(&self) -> Option<&str> {
        None
    }

    /// Shown once `prepare` succeeded
    fn ready_notice(&self) -> Option<&str> {
        None
    }

    /// Block until one command is heard or the attempt gives up.
    fn listen(&mut self, window: ListenWindow) -> Heard;

    /// Line shown to the user before each listen
    fn prompt(&self) -> Option<&str> {
        None
    }

    /// Whether the session should echo what was heard back to the user
    fn echoes_transcript(&self) -> bool {
        false
    }
}
