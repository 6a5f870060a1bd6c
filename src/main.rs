use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use voxctl::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "voxctl")]
#[command(about = "Open and close applications by voice")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.voxctl/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for commands until told to stop
    ///
    /// Ctrl+C stops the session before its next listen. A second Ctrl+C
    /// quits at once with exit code 130.
    Listen {
        /// Read commands from stdin, one per line, instead of the microphone.
        /// Ctrl+C is noticed only after the next line arrives; press it
        /// twice to quit immediately.
        #[arg(long)]
        text: bool,
    },

    /// Run a single command, e.g. `voxctl run open notepad`
    Run {
        /// The command words
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,

        /// Print the result as JSON instead of the spoken-style report
        #[arg(long)]
        json: bool,
    },

    /// Check the voice toolchain and the OS adapters
    Check,

    /// Write a default ~/.voxctl/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config, force);
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run { words, json }) => {
            let succeeded = cli::run::run_command(&config, &words, json)?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            cli::check::check_command(&config, cli.config.as_deref())?;
        }
        Some(Commands::Listen { text }) => listen(config, text).await?,
        Some(Commands::Init { .. }) => unreachable!("handled before loading config"),
        None => {
            // Default: listen on the microphone
            listen(config, false).await?;
        }
    }

    Ok(())
}

/// Run the blocking session loop while Ctrl+C raises the interrupt flag.
async fn listen(config: Config, text: bool) -> Result<()> {
    let interrupt = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&interrupt);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if flag.swap(true, Ordering::SeqCst) {
                // Second Ctrl+C while a listen is still blocking
                std::process::exit(130);
            }
            info!("interrupt received, stopping after the current command");
        }
    });

    tokio::task::spawn_blocking(move || cli::listen::listen_command(&config, text, interrupt))
        .await
        .context("Session thread panicked")?
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_text_flag_help_explains_interrupt() {
        let mut cmd = Cli::command();
        let listen = cmd.find_subcommand_mut("listen").unwrap();
        let help = listen.render_long_help().to_string();
        assert!(help.contains("after the next line arrives"));
        assert!(help.contains("twice to quit immediately"));
        assert!(help.contains("exit code 130"));
    }
}
