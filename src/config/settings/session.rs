//! Session loop settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Pause between two listen cycles (in milliseconds)
    #[serde(default = "default_pause")]
    pub pause_between_commands_ms: u64,

    /// Print the command overview when the loop starts
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

fn default_pause() -> u64 {
    500
}

fn default_show_banner() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            pause_between_commands_ms: default_pause(),
            show_banner: default_show_banner(),
        }
    }
}
