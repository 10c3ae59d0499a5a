use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use hotscript_config::ScriptingConfig;
use tracing::debug;

use crate::context::NativeContext;
use crate::dispatch::{DispatchOutcome, FrameDispatcher};
use crate::host::ScriptHost;
use crate::native::NativeWindow;
use crate::registry::CapabilityRegistry;
use crate::reload::{ReloadController, ReloadOutcome};
use crate::ScriptError;

/// Ties the host, reload controller and frame dispatcher together
///
/// This is the only type the frame loop talks to. Construction installs the
/// capabilities; nothing is loaded until the first [`ScriptRunner::reload`].
#[derive(Debug)]
pub struct ScriptRunner {
    host: ScriptHost,
    reloader: ReloadController,
    dispatcher: FrameDispatcher,
}

impl ScriptRunner {
    /// Create a runner for `script_path`, installing capabilities over `context`
    pub fn new(script_path: impl Into<PathBuf>, context: NativeContext) -> Result<Self, ScriptError> {
        let host = ScriptHost::new(script_path, CapabilityRegistry::new(context))?;
        debug!(
            target: "scripting",
            "Script runner ready for {}",
            host.script_path().display()
        );

        Ok(Self {
            host,
            reloader: ReloadController::new(),
            dispatcher: FrameDispatcher::new(),
        })
    }

    /// Re-execute the script and call `Init`
    pub fn reload(&mut self) -> ReloadOutcome {
        let outcome = self.reloader.reload(&self.host);
        if outcome.is_loaded() {
            self.dispatcher.rearm_missing_notice();
        }
        outcome
    }

    /// Call `OnFrame` for the current frame
    pub fn dispatch_frame(&mut self) -> DispatchOutcome {
        self.dispatcher.dispatch(&self.host)
    }

    pub fn host(&self) -> &ScriptHost {
        &self.host
    }

    pub fn reloader(&self) -> &ReloadController {
        &self.reloader
    }

    pub fn dispatcher(&self) -> &FrameDispatcher {
        &self.dispatcher
    }

    /// Call `OnFrame` with a caller-supplied `deltaTime`
    pub fn dispatch_frame_with_delta(&mut self, delta: Duration) -> DispatchOutcome {
        self.dispatcher.dispatch_with_delta(&self.host, delta)
    }
}

/// Create a script runner from config, drawing into `window`
pub fn create_runner_from_config(
    config: &ScriptingConfig,
    window: Rc<RefCell<dyn NativeWindow>>,
) -> Result<ScriptRunner, ScriptError> {
    debug!(target: "scripting", "Creating script runner");
    let context = NativeContext::new(window, config.circle_radius);
    ScriptRunner::new(config.script_path.clone(), context)
}
