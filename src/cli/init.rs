//! Init command implementation

use std::path::PathBuf;

use anyhow::{Result, bail};

use voxctl::config::{Config, write_atomic};

/// Default configuration content for voxctl init
pub const DEFAULT_CONFIG: &str = r#"# voxctl configuration
# ====================
#
# Every key is optional; the values below are the built-in defaults.

# ============================================================================
# VOICE - Microphone capture (sox) and transcription (whisper-cpp)
# ============================================================================
#
# Available options:
#   listen_timeout_secs - How long to wait for speech to start (default: 5)
#   phrase_limit_secs   - Longest phrase recorded once speech starts (default: 3)
#   whisper_model       - ggml model name: tiny, base, small, medium (default: base)
#   model_dir           - Directory holding ggml-<model>.bin (default: ~/.voxctl/whisper-models)
#   language            - Transcription language code (default: en)
#   silence_threshold   - Level below which audio counts as silence, 0.0-1.0 (default: 0.01)
#   silence_duration    - Seconds of silence that end a phrase (default: 1.0)
#   ambient_calibration_secs - Room noise sampled at startup to raise
#                         silence_threshold; 0 disables (default: 1.0)
#   recorder            - Recording program (default: rec)
#   transcriber         - whisper-cpp binary (default: whisper-cli)

[voice]
listen_timeout_secs = 5.0
phrase_limit_secs = 3.0
whisper_model = "base"
language = "en"
silence_threshold = 0.01
silence_duration = 1.0
ambient_calibration_secs = 1.0
recorder = "rec"
transcriber = "whisper-cli"

# ============================================================================
# SESSION - The listen loop
# ============================================================================

[session]
# Pause between two listen cycles
pause_between_commands_ms = 500
# Print the command overview when listening starts
show_banner = true

# ============================================================================
# RESOLVER - Finding and controlling applications
# ============================================================================

[resolver]
# Appended to the app name by the last launch strategy and used for exact
# process-name matches. Defaults to ".exe" on Windows and "" elsewhere.
# executable_suffix = ".exe"

# Seconds to wait for a helper command (PowerShell, open, gtk-launch, pgrep)
# before giving up. 0 waits indefinitely.
command_timeout_secs = 0
"#;

/// Write the default config file
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    // Default to global config path
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_atomic(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.voice, Config::default().voice);
        assert_eq!(config.session, Config::default().session);
        assert_eq!(config.resolver.command_timeout_secs, 0);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(init_command(Some(path.clone()), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        init_command(Some(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
