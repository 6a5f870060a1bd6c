//! Listen command implementation

use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result, bail};

use voxctl::config::Config;
use voxctl::session::{CommandProcessor, Session, SessionError};
use voxctl::voice::{InputSource, MicrophoneSource, TextSource};

/// Run the session loop until stopped
pub fn listen_command(config: &Config, text: bool, interrupt: Arc<AtomicBool>) -> Result<()> {
    if text {
        let stdin = io::stdin();
        run_session(config, TextSource::new(stdin.lock()), interrupt)
    } else {
        let microphone = MicrophoneSource::new(config.voice.clone())
            .context("Failed to create a directory for recordings")?;
        run_session(config, microphone, interrupt)
    }
}

fn run_session<S: InputSource>(
    config: &Config,
    input: S,
    interrupt: Arc<AtomicBool>,
) -> Result<()> {
    let processor = CommandProcessor::new(super::native_engine(config), io::stdout());
    let mut session = Session::new(
        input,
        processor,
        config.session.clone(),
        config.voice.listen_window(),
    )
    .with_interrupt(interrupt);

    match session.start_listening() {
        Ok(()) => Ok(()),
        Err(SessionError::Input(err)) => {
            bail!("{}\nRun `voxctl check` for details, or use `voxctl listen --text`.", err)
        }
        Err(err) => Err(err.into()),
    }
}
