//! Recording control for one spoken command.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use super::ListenWindow;

/// Size of the WAV header sox writes before any audio
const WAV_HEADER_BYTES: u64 = 44;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Extra time allowed after speech starts before the recorder is killed
const PHRASE_GRACE: Duration = Duration::from_secs(2);

/// How a recording ended
#[derive(Debug)]
pub enum RecordingEnd {
    /// The recorder exited on its own (silence or phrase limit)
    Finished(ExitStatus),
    /// No speech began within the listen timeout
    NoSpeech,
}

/// Start sox/rec: wait for sound above the threshold, stop after the given
/// silence, never record longer than the phrase limit.
pub fn start_recording_process(
    recorder: &str,
    recording_path: &Path,
    window: ListenWindow,
    silence_threshold: f32,
    silence_duration: f32,
) -> std::io::Result<Child> {
    let threshold = format!("{:.1}%", silence_threshold * 100.0);
    Command::new(recorder)
        .arg("-q")
        .args([
            "-r", "16000", // 16kHz sample rate (whisper requirement)
            "-c", "1", // Mono
            "-b", "16", // 16-bit
        ])
        .arg(recording_path)
        .args(["silence", "1", "0.1", threshold.as_str(), "1"])
        .arg(format!("{:.1}", silence_duration))
        .arg(threshold.as_str())
        .args(["trim", "0"])
        .arg(format!("{:.1}", window.phrase_limit.as_secs_f32()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

/// Wait for the recorder. Kills it if no audio arrived before the timeout,
/// or if it overruns the phrase limit.
pub fn wait_for_phrase(
    process: &mut Child,
    recording_path: &Path,
    window: ListenWindow,
) -> std::io::Result<RecordingEnd> {
    let started = Instant::now();
    let hard_limit = window.timeout + window.phrase_limit + PHRASE_GRACE;

    loop {
        if let Some(status) = process.try_wait()? {
            return Ok(RecordingEnd::Finished(status));
        }

        let elapsed = started.elapsed();
        if elapsed >= window.timeout && !speech_started(recording_path) {
            cancel_recording_process(process);
            return Ok(RecordingEnd::NoSpeech);
        }
        if elapsed >= hard_limit {
            stop_recording_process(process);
            return Ok(RecordingEnd::Finished(process.wait()?));
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

pub fn speech_started(recording_path: &Path) -> bool {
    std::fs::metadata(recording_path)
        .map(|m| m.len() > WAV_HEADER_BYTES)
        .unwrap_or(false)
}

/// Stop a recording process gracefully
///
/// First tries SIGTERM so sox can finalize the WAV file, then falls back to kill.
pub fn stop_recording_process(process: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(process.id()) {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
            std::thread::sleep(Duration::from_millis(100));
        }
    }
    if matches!(process.try_wait(), Ok(None)) {
        let _ = process.kill();
    }
}

/// Cancel a recording process (immediate kill)
pub fn cancel_recording_process(process: &mut Child) {
    let _ = process.kill();
    let _ = process.wait();
}
