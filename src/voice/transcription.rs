//! Whisper transcription functionality.

use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use super::InputError;

/// Whisper's non-speech annotations: `[BLANK_AUDIO]`, `(music)`, `*cough*`
static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\]|\([^)]*\)|\*[^*]*\*").expect("annotation pattern is valid")
});

/// Run whisper-cpp on an audio file and return the cleaned transcript
pub fn run_whisper(
    transcriber: &str,
    audio_path: &Path,
    model_path: &Path,
    language: &str,
) -> Result<String, InputError> {
    let output = Command::new(transcriber)
        .arg("-m")
        .arg(model_path)
        .arg("-f")
        .arg(audio_path)
        .arg("--no-timestamps")
        .args(["-l", language])
        .output()
        .map_err(|e| InputError::ServiceUnavailable(format!("Failed to run whisper: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InputError::ServiceUnavailable(format!(
            "Whisper failed: {}",
            stderr.trim()
        )));
    }

    let text = clean_transcript(&String::from_utf8_lossy(&output.stdout));
    if text.is_empty() {
        return Err(InputError::Unrecognized);
    }
    Ok(text)
}

/// Lowercase, drop annotations and trailing punctuation, collapse whitespace.
///
/// "Open Notepad." -> "open notepad"
pub fn clean_transcript(raw: &str) -> String {
    let without_annotations = ANNOTATION.replace_all(raw, " ");
    without_annotations
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"')))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_transcript_strips_punctuation() {
        assert_eq!(clean_transcript(" Open Notepad.\n"), "open notepad");
        assert_eq!(clean_transcript("Close, Chrome!"), "close chrome");
    }

    #[test]
    fn test_clean_transcript_drops_annotations() {
        assert_eq!(clean_transcript("[BLANK_AUDIO]"), "");
        assert_eq!(clean_transcript("(music) open spotify"), "open spotify");
        assert_eq!(clean_transcript("*cough* stop listening"), "stop listening");
    }

    #[test]
    fn test_missing_transcriber_is_service_error() {
        let err = run_whisper(
            "voxctl-missing-whisper",
            Path::new("a.wav"),
            Path::new("m.bin"),
            "en",
        )
        .unwrap_err();
        assert!(matches!(err, InputError::ServiceUnavailable(_)));
    }
}
