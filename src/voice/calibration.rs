//! Ambient noise calibration before the first listen.
//!
//! Samples the room with sox's `stat` effect and raises the silence
//! threshold so background noise alone does not start a recording.

use std::process::{Command, Stdio};
use std::time::Duration;

use super::InputError;

/// Speech has to be this much louder than the room
const ENERGY_RATIO: f32 = 1.5;

/// Above this the recorder would ignore normal speech
const MAX_THRESHOLD: f32 = 0.5;

/// Record `duration` of room noise and return its RMS amplitude (0.0-1.0)
pub fn sample_ambient_level(recorder: &str, duration: Duration) -> Result<f32, InputError> {
    let output = Command::new(recorder)
        .args(["-q", "-r", "16000", "-c", "1", "-b", "16", "-n", "trim", "0"])
        .arg(format!("{:.1}", duration.as_secs_f32()))
        .arg("stat")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| InputError::ServiceUnavailable(format!("Failed to sample ambient noise: {}", e)))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    parse_rms_amplitude(&stderr).ok_or_else(|| {
        InputError::ServiceUnavailable(format!(
            "recorder exited with {} without a noise level",
            output.status
        ))
    })
}

/// Pull `RMS amplitude` out of sox `stat` output
pub fn parse_rms_amplitude(stat: &str) -> Option<f32> {
    stat.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("RMS"), Some("amplitude:"), Some(value)) => value.parse().ok(),
            _ => None,
        }
    })
}

/// Threshold for a room at `ambient` RMS; never below the configured `floor`.
pub fn derive_threshold(ambient: f32, floor: f32) -> f32 {
    if !ambient.is_finite() || ambient < 0.0 {
        return floor;
    }
    let ceiling = MAX_THRESHOLD.max(floor);
    (ambient * ENERGY_RATIO).clamp(floor, ceiling)
}
