use directories::ProjectDirs;
use std::path::PathBuf;

/// Platform-specific locations for hotscript's config and data files
///
/// Follows the XDG Base Directory spec on Linux, `~/Library/Application Support`
/// on macOS and `%APPDATA%` on Windows, as resolved by the `directories` crate.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    dirs: ProjectDirs,
}

impl ProjectPaths {
    /// Resolve the paths for the given application name.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn new(name: &str) -> Option<Self> {
        ProjectDirs::from("", "", name).map(|dirs| Self { dirs })
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.dirs.config_dir().to_path_buf()
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        self.dirs.data_dir().to_path_buf()
    }

    /// Directory that log files are written to.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}
