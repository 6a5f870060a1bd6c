//! Resolution engine settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Suffix appended for the executable-name strategies (".exe" on Windows)
    #[serde(default = "default_executable_suffix")]
    pub executable_suffix: String,

    /// Upper bound for each helper command the adapters run.
    /// 0 waits as long as the command takes.
    #[serde(default)]
    pub command_timeout_secs: u64,
}

fn default_executable_suffix() -> String {
    crate::resolver::default_executable_suffix().to_string()
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            executable_suffix: default_executable_suffix(),
            command_timeout_secs: 0,
        }
    }
}

impl ResolverSettings {
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }
}
