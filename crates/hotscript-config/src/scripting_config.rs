use hotscript_events::{KeyCode, ParseKeyError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptingConfig {
    /// Script file executed on every reload (read fresh each time)
    #[serde(default = "default_script_path")]
    pub script_path: PathBuf,

    /// Key that triggers a reload (default: F5)
    #[serde(default = "default_reload_key")]
    pub reload_key: String,

    /// Radius of the shape drawn by `DrawCircle`
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f32,
}

fn default_script_path() -> PathBuf {
    PathBuf::from("game.lua")
}

fn default_reload_key() -> String {
    "F5".to_string()
}

fn default_circle_radius() -> f32 {
    50.0
}

impl Default for ScriptingConfig {
    fn default() -> Self {
        Self {
            script_path: default_script_path(),
            reload_key: default_reload_key(),
            circle_radius: default_circle_radius(),
        }
    }
}

impl ScriptingConfig {
    /// Parse the configured reload key
    pub fn reload_key(&self) -> Result<KeyCode, ParseKeyError> {
        self.reload_key.parse()
    }
}
