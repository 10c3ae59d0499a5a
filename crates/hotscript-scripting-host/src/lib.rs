//! Host runtime for the hot-reloadable game script
//!
//! This crate owns the single Lua environment of the process and everything
//! that crosses between it and native code:
//!
//! - [`registry`] installs the fixed capability surface (`SetWindowTitle`,
//!   `DrawCircle`, `IsKeyPressed`, `Window`) exactly once
//! - [`host`] executes the script file into the environment
//! - [`reload`] re-runs the script and calls its `Init` hook
//! - [`dispatch`] calls the `OnFrame(deltaTime)` hook once per frame
//! - [`shims`] forward capability calls to a [`NativeWindow`]
//!
//! Script failures never escape as panics or `Err` out of the frame loop;
//! they come back as [`ReloadOutcome`] and [`DispatchOutcome`] values.
use std::fmt;
use std::path::PathBuf;

pub mod context;
pub mod dispatch;
pub mod host;
pub mod native;
pub mod registry;
pub mod reload;
pub mod script_runner;
pub mod shims;
pub mod timer;
pub mod vector;

pub use mlua;

pub use context::NativeContext;
pub use dispatch::{DispatchOutcome, DispatchStats, FrameDispatcher};
pub use host::ScriptHost;
pub use native::{ArrowKey, CircleShape, NativeWindow};
pub use registry::{Capability, CapabilityRegistry, InstalledCapabilities};
pub use reload::{ReloadController, ReloadOutcome, ReloadStage, ReloadStats};
pub use script_runner::{ScriptRunner, create_runner_from_config};
pub use timer::FrameClock;
pub use vector::Vector2;

/// Script-defined functions the host calls back into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `Init()`, called after every successful load
    Init,
    /// `OnFrame(deltaTime)`, called once per rendered frame
    OnFrame,
}

impl Hook {
    /// Global name the hook is looked up under
    pub fn name(self) -> &'static str {
        match self {
            Hook::Init => "Init",
            Hook::OnFrame => "OnFrame",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of a load failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// The source didn't compile
    Parse,
    /// Top-level statements raised an error
    Execute,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStage::Parse => f.write_str("parse error"),
            LoadStage::Execute => f.write_str("runtime error"),
        }
    }
}

/// Errors crossing the script/native boundary
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load {}: {stage}: {message}", path.display())]
    Load {
        path: PathBuf,
        stage: LoadStage,
        message: String,
    },

    #[error("{hook} failed: {message}")]
    Hook { hook: Hook, message: String },

    #[error("{hook} is not callable (found {found})")]
    MissingHook { hook: Hook, found: &'static str },

    #[error("{hook} panicked: {message}")]
    Panicked { hook: Hook, message: String },

    #[error("failed to install capability {name}: {source}")]
    Registration {
        name: &'static str,
        #[source]
        source: mlua::Error,
    },
}

impl ScriptError {
    /// True for errors that mean "the hook isn't there" rather than "it broke"
    pub fn is_missing_hook(&self) -> bool {
        matches!(self, ScriptError::MissingHook { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_registration_error_crosses_threads() {
        let err = ScriptError::Registration {
            name: "DrawCircle",
            source: mlua::Error::runtime("no memory"),
        };

        let boxed: Box<dyn Error + Send + Sync + 'static> = err.into();

        assert!(boxed.to_string().contains("DrawCircle"));
        assert!(boxed.source().unwrap().to_string().contains("no memory"));
    }

    #[test]
    fn test_display_names_hook() {
        let err = ScriptError::MissingHook {
            hook: Hook::OnFrame,
            found: "nil",
        };
        assert_eq!(err.to_string(), "OnFrame is not callable (found nil)");
        assert!(err.is_missing_hook());
    }
}
