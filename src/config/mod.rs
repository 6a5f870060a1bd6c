//! Configuration loading and management

mod io;
mod settings;

pub use io::write_atomic;
pub use settings::{ResolverSettings, SessionSettings, VoiceSettings};

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Microphone and transcription settings
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Session loop settings
    #[serde(default)]
    pub session: SessionSettings,

    /// Resolution engine settings
    #[serde(default)]
    pub resolver: ResolverSettings,
}
