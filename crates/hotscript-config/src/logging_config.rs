use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Write logs to `<data dir>/logs/<component>.log`
    #[serde(default = "default_file")]
    pub file: bool,

    /// Also write logs to stderr. Off by default since the terminal is the window.
    #[serde(default)]
    pub console: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_file(),
            console: false,
        }
    }
}
