pub mod hotscript_config;
pub mod logging_config;
pub mod paths;
pub mod scripting_config;
pub mod window_config;

pub use hotscript_config::{ConfigLoadError, HotscriptConfig};
pub use logging_config::LoggingConfig;
pub use paths::ProjectPaths;
pub use scripting_config::ScriptingConfig;
pub use window_config::WindowConfig;
