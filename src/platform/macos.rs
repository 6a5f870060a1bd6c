//! macOS catalog: `.app` bundles, launched with `open -a`.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::{AdapterError, ApplicationCatalog, CatalogEntry, CommandRunner};
use crate::domain::AppIdentifier;

#[derive(Debug, Clone)]
pub struct BundleCatalog {
    runner: CommandRunner,
    dirs: Vec<PathBuf>,
}

impl BundleCatalog {
    pub fn new(runner: CommandRunner) -> Self {
        let mut dirs = vec![
            PathBuf::from("/Applications"),
            PathBuf::from("/System/Applications"),
            PathBuf::from("/System/Applications/Utilities"),
        ];
        if let Some(home) = dirs::home_dir() {
            dirs.push(home.join("Applications"));
        }
        Self { runner, dirs }
    }

    fn open_application(&self, target: &str) -> Result<(), AdapterError> {
        self.runner
            .run_checked(Command::new("open").arg("-a").arg(target), "open -a")
            .map(|_| ())
    }
}

impl ApplicationCatalog for BundleCatalog {
    fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError> {
        let mut entries = Vec::new();
        for dir in &self.dirs {
            let Ok(read_dir) = std::fs::read_dir(dir) else {
                continue;
            };
            let mut bundles: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "app"))
                .collect();
            bundles.sort();

            entries.extend(bundles.into_iter().filter_map(|path| {
                let name = path.file_stem()?.to_str()?.to_string();
                Some(CatalogEntry::new(path.to_str()?.to_string(), name))
            }));
        }
        debug!(count = entries.len(), "read application bundles");
        Ok(entries)
    }

    fn launch_by_identifier(&self, id: &AppIdentifier) -> Result<(), AdapterError> {
        self.open_application(id.as_str())
    }

    fn launch_literal(&self, program: &str) -> Result<(), AdapterError> {
        super::check_program_name(program)?;
        self.open_application(program)
    }
}
