//! Builder pattern for FrameLoop

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use hotscript_config::{HotscriptConfig, ScriptingConfig, WindowConfig};
use hotscript_scripting_host::create_runner_from_config;

use crate::frame_loop::{FrameLoop, RunnerError};
use crate::render_window::RenderWindow;

/// Builder for FrameLoop
pub struct FrameLoopBuilder<W> {
    window: W,
    scripting: ScriptingConfig,
    frame_interval: Option<Duration>,
}

impl<W: RenderWindow + 'static> FrameLoopBuilder<W> {
    /// Create a new builder with default scripting settings and frame rate
    pub fn new(window: W) -> Self {
        Self {
            window,
            scripting: ScriptingConfig::default(),
            frame_interval: WindowConfig::default().frame_interval(),
        }
    }

    /// Take scripting settings and the frame rate from application config
    pub fn with_config(mut self, config: &HotscriptConfig) -> Self {
        self.scripting = config.scripting.clone();
        self.frame_interval = config.window.frame_interval();
        self
    }

    pub fn scripting(mut self, scripting: ScriptingConfig) -> Self {
        self.scripting = scripting;
        self
    }

    /// Override the script file
    pub fn script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scripting.script_path = path.into();
        self
    }

    /// Set the frame period, or `None` to run frames back to back
    pub fn frame_interval(mut self, interval: Option<Duration>) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Build the FrameLoop
    ///
    /// Installs the script capabilities over the window. The script itself is
    /// not loaded until [`FrameLoop::start`] (or the first frame of `run`).
    pub fn build(self) -> Result<FrameLoop<W>, RunnerError> {
        let reload_key = self.scripting.reload_key()?;
        let window = Rc::new(RefCell::new(self.window));
        let runner = create_runner_from_config(&self.scripting, window.clone())?;

        Ok(FrameLoop::from_parts(
            window,
            runner,
            reload_key,
            self.frame_interval,
        ))
    }
}
