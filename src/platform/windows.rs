//! Windows adapters: Start-menu catalog, `Start-Process`, window titles.
//!
//! PowerShell scripts here are constant text. The user's app name reaches
//! them only through the `VOXCTL_TARGET` environment variable and is escaped
//! with `[WildcardPattern]::Escape` before any `-like` comparison.

use std::collections::HashMap;
use std::process::Command;

use tracing::debug;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextW, GetWindowThreadProcessId, IsWindowVisible,
};

use super::{AdapterError, ApplicationCatalog, CatalogEntry, CommandRunner};
use crate::domain::{AppIdentifier, AppName};

const TARGET_ENV: &str = "VOXCTL_TARGET";

const LIST_START_APPS: &str =
    "Get-StartApps | ForEach-Object { \"{0}`t{1}\" -f $_.Name, $_.AppID }";

const START_TARGET: &str = "$ErrorActionPreference = 'Stop'; Start-Process -FilePath $env:VOXCTL_TARGET";

const START_APPS_FOLDER: &str = "$ErrorActionPreference = 'Stop'; Start-Process -FilePath ('shell:AppsFolder\\' + $env:VOXCTL_TARGET)";

const SELF_ENV: &str = "VOXCTL_SELF";

const STOP_BY_NAME_OR_TITLE: &str = "$ErrorActionPreference = 'Stop'; \
     $p = '*' + [WildcardPattern]::Escape($env:VOXCTL_TARGET) + '*'; \
     $me = [int]$env:VOXCTL_SELF; \
     Get-Process | Where-Object { $_.Id -ne $me -and ($_.ProcessName -like $p -or $_.MainWindowTitle -like $p) } | Stop-Process -Force";

fn powershell(script: &str) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", script]);
    cmd
}

/// Applications listed by `Get-StartApps` (desktop and Store apps alike)
#[derive(Debug, Clone, Default)]
pub struct StartAppsCatalog {
    runner: CommandRunner,
}

impl StartAppsCatalog {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    fn start_process(&self, script: &str, target: &str) -> Result<(), AdapterError> {
        self.runner
            .run_checked(powershell(script).env(TARGET_ENV, target), "Start-Process")
            .map(|_| ())
    }
}

impl ApplicationCatalog for StartAppsCatalog {
    fn installed_applications(&self) -> Result<Vec<CatalogEntry>, AdapterError> {
        let output = self
            .runner
            .run_checked(&mut powershell(LIST_START_APPS), "Get-StartApps")
            .map_err(|e| match e {
                AdapterError::NotFound(detail) => AdapterError::Unavailable(detail),
                other => other,
            })?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries = parse_start_apps(&stdout);
        debug!(count = entries.len(), "read Start menu catalog");
        Ok(entries)
    }

    fn launch_by_identifier(&self, id: &AppIdentifier) -> Result<(), AdapterError> {
        self.start_process(START_APPS_FOLDER, id.as_str())
    }

    fn launch_literal(&self, program: &str) -> Result<(), AdapterError> {
        super::check_program_name(program)?;
        self.start_process(START_TARGET, program)
    }
}

fn parse_start_apps(stdout: &str) -> Vec<CatalogEntry> {
    stdout
        .lines()
        .filter_map(|line| {
            let (name, id) = line.trim_end_matches('\r').split_once('\t')?;
            let (name, id) = (name.trim(), id.trim());
            (!name.is_empty() && !id.is_empty()).then(|| CatalogEntry::new(id, name))
        })
        .collect()
}

pub(super) fn stop_process_by_name_or_title(
    runner: &CommandRunner,
    app: &AppName,
) -> Result<(), AdapterError> {
    runner
        .run_checked(
            powershell(STOP_BY_NAME_OR_TITLE)
                .env(TARGET_ENV, app.as_str())
                .env(SELF_ENV, std::process::id().to_string()),
            "Stop-Process",
        )
        .map(|_| ())
}

/// Title of the first visible top-level window of each process
pub(super) fn window_titles() -> HashMap<u32, String> {
    let mut titles: HashMap<u32, String> = HashMap::new();
    unsafe {
        let _ = EnumWindows(
            Some(collect_title),
            LPARAM(&mut titles as *mut HashMap<u32, String> as isize),
        );
    }
    titles
}

unsafe extern "system" fn collect_title(hwnd: HWND, lparam: LPARAM) -> BOOL {
    unsafe {
        let titles = &mut *(lparam.0 as *mut HashMap<u32, String>);
        if IsWindowVisible(hwnd).as_bool() {
            let mut buf = [0u16; 512];
            let len = GetWindowTextW(hwnd, &mut buf);
            if len > 0 {
                let mut pid = 0u32;
                GetWindowThreadProcessId(hwnd, Some(&mut pid));
                titles
                    .entry(pid)
                    .or_insert_with(|| String::from_utf16_lossy(&buf[..len as usize]));
            }
        }
    }
    BOOL(1)
}
