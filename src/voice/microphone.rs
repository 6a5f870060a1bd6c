//! Microphone source: one sox recording and one whisper run per listen.

use std::io;
use std::path::PathBuf;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::availability::check_availability;
use super::calibration::{derive_threshold, sample_ambient_level};
use super::recording::{RecordingEnd, speech_started, start_recording_process, wait_for_phrase};
use super::transcription::run_whisper;
use super::{Heard, InputError, InputSource, ListenWindow};
use crate::config::VoiceSettings;

/// Listens on the default microphone
pub struct MicrophoneSource {
    settings: VoiceSettings,
    model_path: PathBuf,
    /// Raised above the configured value by ambient calibration
    silence_threshold: f32,
    /// Private directory for recordings, removed on drop
    workdir: TempDir,
    recording_path: PathBuf,
}

impl MicrophoneSource {
    pub fn new(settings: VoiceSettings) -> io::Result<Self> {
        let workdir = tempfile::Builder::new().prefix("voxctl-").tempdir()?;
        let recording_path = workdir.path().join("command.wav");
        Ok(Self {
            model_path: settings.model_path(),
            silence_threshold: settings.silence_threshold,
            settings,
            workdir,
            recording_path,
        })
    }

    /// Silence threshold in use for recordings
    pub fn silence_threshold(&self) -> f32 {
        self.silence_threshold
    }

    fn calibrate(&mut self) {
        let Some(duration) = self.settings.calibration_duration() else {
            return;
        };
        match sample_ambient_level(&self.settings.recorder, duration) {
            Ok(ambient) => {
                self.silence_threshold = derive_threshold(ambient, self.settings.silence_threshold);
                info!(ambient, threshold = self.silence_threshold, "calibrated for ambient noise");
            }
            Err(e) => warn!("ambient calibration failed, keeping configured threshold: {}", e),
        }
    }

    fn record_and_transcribe(&mut self, window: ListenWindow) -> Result<String, InputError> {
        let _ = std::fs::remove_file(&self.recording_path);

        let mut process = start_recording_process(
            &self.settings.recorder,
            &self.recording_path,
            window,
            self.silence_threshold,
            self.settings.silence_duration,
        )
        .map_err(|e| InputError::ServiceUnavailable(format!("Failed to start recording: {}", e)))?;

        let end = wait_for_phrase(&mut process, &self.recording_path, window)
            .map_err(|e| InputError::ServiceUnavailable(format!("Recording error: {}", e)))?;

        let has_audio = speech_started(&self.recording_path);
        match end {
            RecordingEnd::NoSpeech => return Err(InputError::TimedOut),
            RecordingEnd::Finished(status) if !has_audio => {
                return Err(if status.success() {
                    InputError::TimedOut
                } else {
                    InputError::ServiceUnavailable(format!("recorder exited with {}", status))
                });
            }
            RecordingEnd::Finished(_) => {}
        }

        debug!(dir = %self.workdir.path().display(), "transcribing recording");
        let result = run_whisper(
            &self.settings.transcriber,
            &self.recording_path,
            &self.model_path,
            &self.settings.language,
        );
        let _ = std::fs::remove_file(&self.recording_path);
        result
    }
}

impl InputSource for MicrophoneSource {
    fn prepare(&mut self) -> Result<(), InputError> {
        let availability = check_availability(
            &self.settings.recorder,
            &self.settings.transcriber,
            &self.model_path,
        );
        if !availability.available {
            return Err(InputError::DeviceUnavailable(availability.message));
        }
        info!("{}", availability.message);
        self.calibrate();
        Ok(())
    }

    fn listen(&mut self, window: ListenWindow) -> Heard {
        match self.record_and_transcribe(window) {
            Ok(text) => {
                info!(%text, "recognized command");
                Heard::Text(text)
            }
            Err(e) => {
                warn!("{}", e);
                Heard::Nothing(Some(e))
            }
        }
    }

    fn preparing_notice(&self) -> Option<&str> {
        self.settings
            .calibration_duration()
            .map(|_| "Adjusting for ambient noise... Please wait.")
    }

    fn ready_notice(&self) -> Option<&str> {
        Some("Ready for voice commands!")
    }

    fn prompt(&self) -> Option<&str> {
        Some("Listening for command...")
    }

    fn echoes_transcript(&self) -> bool {
        true
    }
}
