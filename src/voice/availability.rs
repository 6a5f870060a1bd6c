//! Voice feature availability checking.

use std::path::Path;
use std::process::Command;

/// Result of probing the voice toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    fn missing(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
        }
    }
}

fn on_path(binary: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(binary)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check the recorder, the transcriber and the whisper model
pub fn check_availability(recorder: &str, transcriber: &str, model_path: &Path) -> Availability {
    if !on_path(recorder) {
        return Availability::missing(format!(
            "{} not found. Install sox (e.g. `brew install sox` or `apt install sox`)",
            recorder
        ));
    }

    if !on_path(transcriber) {
        return Availability::missing(format!(
            "{} not found. Install whisper-cpp (e.g. `brew install whisper-cpp`)",
            transcriber
        ));
    }

    if !model_path.exists() {
        return Availability::missing(format!(
            "Whisper model not found at {}. Download a ggml model into that path.",
            model_path.display()
        ));
    }

    Availability {
        available: true,
        message: "Voice input ready".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_recorder_is_reported_first() {
        let result = check_availability(
            "voxctl-missing-recorder",
            "voxctl-missing-transcriber",
            Path::new("/nonexistent/model.bin"),
        );
        assert!(!result.available);
        assert!(result.message.contains("voxctl-missing-recorder"));
    }
}
