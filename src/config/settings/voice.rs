//! Voice input settings

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::voice::ListenWindow;

/// Voice input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Seconds to wait for speech to begin before giving up on a cycle
    #[serde(default = "default_listen_timeout")]
    pub listen_timeout_secs: f32,

    /// Maximum length of one spoken command (in seconds)
    #[serde(default = "default_phrase_limit")]
    pub phrase_limit_secs: f32,

    /// Whisper model for transcription (tiny, base, small, medium, large)
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Directory holding `ggml-<model>.bin` (defaults to ~/.voxctl/whisper-models)
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Language for transcription (auto, en, de, fr, etc.)
    #[serde(default = "default_voice_language")]
    pub language: String,

    /// Sound level that counts as speech (0.0-1.0)
    #[serde(default = "default_silence_threshold")]
    pub silence_threshold: f32,

    /// Silence duration that ends a phrase (in seconds)
    #[serde(default = "default_silence_duration")]
    pub silence_duration: f32,

    /// Seconds of room noise sampled at startup to raise `silence_threshold`.
    /// 0 skips calibration.
    #[serde(default = "default_ambient_calibration")]
    pub ambient_calibration_secs: f32,

    /// sox recorder binary
    #[serde(default = "default_recorder")]
    pub recorder: String,

    /// whisper-cpp binary
    #[serde(default = "default_transcriber")]
    pub transcriber: String,
}

fn default_listen_timeout() -> f32 {
    5.0
}

fn default_phrase_limit() -> f32 {
    3.0
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_voice_language() -> String {
    "en".to_string()
}

fn default_silence_threshold() -> f32 {
    0.01 // 1% - quiet rooms; raise for noisy ones
}

fn default_silence_duration() -> f32 {
    1.0
}

fn default_ambient_calibration() -> f32 {
    1.0
}

fn default_recorder() -> String {
    "rec".to_string()
}

fn default_transcriber() -> String {
    "whisper-cli".to_string()
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            listen_timeout_secs: default_listen_timeout(),
            phrase_limit_secs: default_phrase_limit(),
            whisper_model: default_whisper_model(),
            model_dir: None,
            language: default_voice_language(),
            silence_threshold: default_silence_threshold(),
            silence_duration: default_silence_duration(),
            ambient_calibration_secs: default_ambient_calibration(),
            recorder: default_recorder(),
            transcriber: default_transcriber(),
        }
    }
}

impl VoiceSettings {
    /// Full path of the whisper model file
    pub fn model_path(&self) -> PathBuf {
        let dir = self
            .model_dir
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("whisper-models"));
        dir.join(format!("ggml-{}.bin", self.whisper_model))
    }

    /// How long to sample ambient noise, `None` when calibration is off
    pub fn calibration_duration(&self) -> Option<Duration> {
        Some(secs(self.ambient_calibration_secs)).filter(|d| !d.is_zero())
    }

    pub fn listen_window(&self) -> ListenWindow {
        ListenWindow {
            timeout: secs(self.listen_timeout_secs),
            phrase_limit: secs(self.phrase_limit_secs),
        }
    }
}

/// Negative or NaN values count as zero
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or(Duration::ZERO)
}
