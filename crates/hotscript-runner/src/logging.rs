use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use hotscript_config::{LoggingConfig, ProjectPaths};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::RunnerError;

const MAX_LOG_SIZE: u64 = 1024 * 1024; // 1MB

/// Initialize logging for a component.
///
/// - `component_name`: Name of the log file, without extension (e.g. "hotscript")
/// - `config`: Level used when `RUST_LOG` is unset, and which outputs are enabled
///
/// The console layer writes to stderr and is off by default, since stdout is
/// the rendering surface. Returns a guard that must be kept alive for the
/// duration of the program when file logging is enabled.
pub fn init_logging(
    component_name: &str,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, RunnerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
    });

    let (file_layer, guard, log_path) = if config.file {
        let log_path = open_log_path(component_name).map_err(RunnerError::Logging)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(RunnerError::Logging)?;

        let (non_blocking_file, guard) = tracing_appender::non_blocking(BufWriter::new(file));
        let layer = fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false)
            .with_target(true);

        (Some(layer), Some(guard), Some(log_path))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RunnerError::Logging(io::Error::other(e)))?;

    if let Some(path) = log_path {
        tracing::info!("Logging to file: {}", path.display());
    }

    Ok(guard)
}

/// Send panic messages to the log instead of stderr.
///
/// Panics inside script hooks are caught and reported, but the default hook
/// would still print over the rendered frame. Call after [`init_logging`].
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Box<dyn Any>");
        match info.location() {
            Some(location) => tracing::error!(
                target: "panic",
                "panicked at {}:{}: {}",
                location.file(),
                location.line(),
                message
            ),
            None => tracing::error!(target: "panic", "panicked: {}", message),
        }
    }));
}

/// Create the log directory and return the (possibly truncated) log file path.
fn open_log_path(component_name: &str) -> io::Result<PathBuf> {
    let log_dir = get_log_directory()?;
    fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("{}.log", component_name));
    truncate_if_needed(&log_path)?;
    Ok(log_path)
}

/// Get the log directory path.
fn get_log_directory() -> io::Result<PathBuf> {
    let proj_paths = ProjectPaths::new("hotscript")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Failed to find home directory"))?;

    Ok(proj_paths.log_dir())
}

/// Truncate log file if it exceeds MAX_LOG_SIZE.
fn truncate_if_needed(log_path: &Path) -> io::Result<()> {
    if log_path.exists() && fs::metadata(log_path)?.len() > MAX_LOG_SIZE {
        File::create(log_path)?.set_len(0)?;
    }
    Ok(())
}
