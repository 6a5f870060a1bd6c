//! Check command implementation

use std::path::Path;

use anyhow::Result;

use voxctl::config::Config;
use voxctl::platform::{ApplicationCatalog, ProcessDirectory};
use voxctl::voice::check_availability;

/// Report what works on this machine
pub fn check_command(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);
    if path.exists() {
        println!("Config: {}", path.display());
    } else {
        println!("Config: {} (not found, using defaults)", path.display());
    }

    let voice = &config.voice;
    let availability = check_availability(&voice.recorder, &voice.transcriber, &voice.model_path());
    let mark = if availability.available { "ok" } else { "missing" };
    println!("Voice input: {} - {}", mark, availability.message);

    let engine = super::native_engine(config);
    match engine.catalog().installed_applications() {
        Ok(entries) => println!("Application catalog: ok - {} installed apps", entries.len()),
        Err(e) => println!("Application catalog: unavailable - {}", e),
    }
    match engine.processes().list_processes() {
        Ok(processes) => println!("Process table: ok - {} running processes", processes.len()),
        Err(e) => println!("Process table: unavailable - {}", e),
    }

    Ok(())
}
