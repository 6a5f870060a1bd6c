//! Linux catalog: freedesktop `.desktop` entries, launched with `gtk-launch`.

use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::{AdapterError, ApplicationCatalog, CatalogEntry, CommandRunner};
use crate::domain::AppIdentifier;

/// Desktop entries from the XDG data directories, user entries first
#[derive(Debug, Clone)]
pub struct DesktopEntryCatalog {
    runner: CommandRunner,
    dirs: Vec<PathBuf>,
}

impl DesktopEntryCatalog {
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            dirs: application_dirs(),
        }
    }

    /// Catalog over explicit directories instead of the XDG search path
    pub fn with_dirs(runner: CommandRunner, dirs: Vec<PathBuf>) -> Self {
        Self { runner, dirs }
    }
}

fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(data) = dirs::data_dir() {
        dirs.push(data.join("applications"));
    }
    let system = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    dirs.extend(
        system
            .split(':')
            .filter(|s| !s.is_empty())
            .map(|s| Path::new(s).join("applications")),
    );
    dirs
}

impl ApplicationCatalog for DesktopEntryCatalog {
    fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError> {
        let mut entries = Vec::new();
        for dir in &self.dirs {
            let Ok(read_dir) = std::fs::read_dir(dir) else {
                continue;
            };
            let mut files: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "desktop"))
                .collect();
            files.sort();

            for path in files {
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                // Earlier directories shadow later ones with the same id
                if entries.iter().any(|e: &CatalogEntry| e.id.as_str() == id) {
                    continue;
                }
                match std::fs::read_to_string(&path) {
                    Ok(content) => {
                        if let Some(name) = parse_desktop_entry(&content) {
                            entries.push(CatalogEntry::new(id, name));
                        }
                    }
                    Err(e) => warn!(path = %path.display(), "skipping unreadable desktop entry: {}", e),
                }
            }
        }
        debug!(count = entries.len(), "read desktop entry catalog");
        Ok(entries)
    }

    fn launch_by_identifier(&self, id: &AppIdentifier) -> Result<(), AdapterError> {
        self.runner
            .run_checked(Command::new("gtk-launch").arg(id.as_str()), "gtk-launch")
            .map(|_| ())
    }

    fn launch_literal(&self, program: &str) -> Result<(), AdapterError> {
        super::check_program_name(program)?;
        spawn_detached(program).map(|pid| debug!(program, pid, "started program"))
    }
}

/// Display name of a visible `[Desktop Entry]`, or `None` for hidden entries.
fn parse_desktop_entry(content: &str) -> Option<String> {
    let mut in_main_group = false;
    let mut name = None;
    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_main_group = line == "[Desktop Entry]";
            continue;
        }
        if !in_main_group {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match (key.trim(), value.trim()) {
            ("Name", v) if name.is_none() => name = Some(v.to_string()),
            ("NoDisplay" | "Hidden", "true") => return None,
            ("Type", v) if v != "Application" => return None,
            _ => {}
        }
    }
    name.filter(|n| !n.is_empty())
}

/// Start a program from `PATH` without a shell and reap it in the background.
///
/// The child gets its own process group, so a Ctrl+C aimed at voxctl's
/// terminal does not reach the applications it opened. Returns the child PID.
fn spawn_detached(program: &str) -> Result<u32, AdapterError> {
    let mut child = Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .map_err(|e| AdapterError::from_io(program, e))?;
    let pid = child.id();
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(pid)
}
