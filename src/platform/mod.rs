//! OS adapters: the installed-application catalog and the process table.
//!
//! The resolver only talks to the two traits defined here. Native
//! implementations live in the platform submodules; every one of them passes
//! the user's app name to the OS as a discrete argument (or environment
//! value), never spliced into a shell command line.

mod command;
mod error;
mod processes;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

pub use command::CommandRunner;
pub use error::{AdapterError, TerminateError};
pub use processes::SystemProcesses;

#[cfg(target_os = "linux")]
pub use linux::DesktopEntryCatalog as NativeCatalog;
#[cfg(target_os = "macos")]
pub use macos::BundleCatalog as NativeCatalog;
#[cfg(target_os = "windows")]
pub use windows::StartAppsCatalog as NativeCatalog;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub use unsupported::UnsupportedCatalog as NativeCatalog;

use crate::domain::{AppIdentifier, AppName, ProcessDescriptor};

/// One installed application as listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: AppIdentifier,
    pub display_name: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: AppIdentifier::new(id),
            display_name: display_name.into(),
        }
    }
}

/// The installed-application catalog and the shell's launch surface
pub trait ApplicationCatalog {
    /// Every installed application, in catalog order
    fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError>;

    /// Ask the OS to launch a catalog entry. `Ok` means the request was
    /// accepted, not that the application finished starting.
    fn launch_by_identifier(&self, id: &AppIdentifier) -> Result<(), AdapterError>;

    /// Ask the shell to start a program by its literal name.
    fn launch_literal(&self, program: &str) -> Result<(), AdapterError>;

    /// First application whose display name contains `app`, ignoring case.
    fn find_by_name_substring(&self, app: &AppName) -> Result<Option<CatalogEntry>, AdapterError> {
        Ok(first_match(self.installed_applications()?, app))
    }
}

/// The OS process table and its signalling surface
pub trait ProcessDirectory {
    /// Unordered snapshot of running processes
    fn list_processes(&self) -> Result<Vec<ProcessDescriptor>, AdapterError>;

    /// Ask a single process to terminate
    fn terminate(&self, pid: u32) -> Result<(), TerminateError>;

    /// Best-effort kill of anything whose name or window title contains
    /// `app`. `Ok` carries no count of what was actually terminated.
    fn terminate_by_name_or_title(&self, app: &AppName) -> Result<(), AdapterError>;
}

/// Catalog order wins; there is no ranking by closeness.
pub fn first_match(
    entries: impl IntoIterator<Item = CatalogEntry>,
    app: &AppName,
) -> Option<CatalogEntry> {
    entries
        .into_iter()
        .find(|entry| app.is_contained_in(&entry.display_name))
}

/// Characters no platform accepts in a program name.
pub(crate) fn check_program_name(program: &str) -> Result<(), AdapterError> {
    if program.chars().any(|c| c.is_control()) {
        return Err(AdapterError::MalformedName(format!(
            "'{}' contains control characters",
            program.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported {
    use super::{AdapterError, ApplicationCatalog, CatalogEntry, CommandRunner};
    use crate::domain::AppIdentifier;

    #[derive(Debug, Default)]
    pub struct UnsupportedCatalog;

    impl UnsupportedCatalog {
        pub fn new(_runner: CommandRunner) -> Self {
            Self
        }
    }

    impl ApplicationCatalog for UnsupportedCatalog {
        fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError> {
            Err(AdapterError::Unavailable(
                "no application catalog on this platform".to_string(),
            ))
        }

        fn launch_by_identifier(&self, _id: &AppIdentifier) -> Result<(), AdapterError> {
            Err(AdapterError::Unavailable(
                "no application catalog on this platform".to_string(),
            ))
        }

        fn launch_literal(&self, program: &str) -> Result<(), AdapterError> {
            super::check_program_name(program)?;
            Err(AdapterError::Unavailable(
                "launching is not supported on this platform".to_string(),
            ))
        }
    }
}
