//! Run command implementation

use std::io;

use anyhow::{Context, Result};

use voxctl::config::Config;
use voxctl::session::CommandProcessor;

/// Run one command. Returns whether it succeeded.
pub fn run_command(config: &Config, words: &[String], json: bool) -> Result<bool> {
    let command = words.join(" ");
    let engine = super::native_engine(config);

    let result = if json {
        let result = CommandProcessor::new(engine, io::sink()).process(&command)?;
        let rendered =
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", rendered);
        result
    } else {
        CommandProcessor::new(engine, io::stdout()).process(&command)?
    };

    Ok(result.is_success())
}
