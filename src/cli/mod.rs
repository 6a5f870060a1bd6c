//! CLI command implementations

pub mod check;
pub mod init;
pub mod listen;
pub mod run;

use voxctl::config::Config;
use voxctl::platform::{CommandRunner, NativeCatalog, SystemProcesses};
use voxctl::resolver::ResolutionEngine;

/// Resolution engine over the native catalog and the live process table
pub fn native_engine(config: &Config) -> ResolutionEngine<NativeCatalog, SystemProcesses> {
    let runner = CommandRunner::new(config.resolver.command_timeout());
    ResolutionEngine::new(
        NativeCatalog::new(runner),
        SystemProcesses::new(runner),
        &config.resolver.executable_suffix,
    )
}
