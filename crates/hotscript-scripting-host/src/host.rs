//! The script host owns the process's single Lua environment.

use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use mlua::{Function, IntoLuaMulti, Lua, Value};
use tracing::debug;

use crate::registry::{CapabilityRegistry, InstalledCapabilities};
use crate::{Hook, LoadStage, ScriptError};

/// Owns the Lua environment and executes the script file into it
///
/// Capabilities are installed by the constructor, so they always exist before
/// the first load. Loads mutate the same environment in place and are not
/// transactional: globals assigned before a runtime error stay assigned.
pub struct ScriptHost {
    lua: Lua,
    script_path: PathBuf,
    capabilities: InstalledCapabilities,
}

impl ScriptHost {
    /// Create the environment (standard libraries opened) and install capabilities
    pub fn new(
        script_path: impl Into<PathBuf>,
        registry: CapabilityRegistry,
    ) -> Result<Self, ScriptError> {
        let lua = Lua::new();
        let capabilities = registry.install(&lua)?;

        Ok(Self {
            lua,
            script_path: script_path.into(),
            capabilities,
        })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub fn capabilities(&self) -> &InstalledCapabilities {
        &self.capabilities
    }

    /// Read the script file from disk and execute it into the environment
    ///
    /// The file is read fresh on every call.
    pub fn load(&self) -> Result<(), ScriptError> {
        let path = &self.script_path;
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.clone(),
            source,
        })?;

        debug!(
            target: "scripting",
            "Executing {} ({} bytes)",
            path.display(),
            source.len()
        );

        self.lua
            .load(source.as_str())
            .set_name(format!("@{}", path.display()))
            .exec()
            .map_err(|e| {
                let (stage, message) = match e {
                    mlua::Error::SyntaxError { message, .. } => (LoadStage::Parse, message),
                    other => (LoadStage::Execute, other.to_string()),
                };
                ScriptError::Load {
                    path: path.clone(),
                    stage,
                    message,
                }
            })
    }

    /// Look up a hook by name; anything other than a function is missing
    pub fn hook(&self, hook: Hook) -> Result<Function, ScriptError> {
        match self.lua.globals().get::<Value>(hook.name()) {
            Ok(Value::Function(function)) => Ok(function),
            Ok(other) => Err(ScriptError::MissingHook {
                hook,
                found: other.type_name(),
            }),
            Err(e) => Err(ScriptError::Hook {
                hook,
                message: e.to_string(),
            }),
        }
    }

    /// Look up and call a hook, containing both Lua errors and native panics
    pub fn call_hook(&self, hook: Hook, args: impl IntoLuaMulti) -> Result<(), ScriptError> {
        let function = self.hook(hook)?;

        match catch_unwind(AssertUnwindSafe(|| function.call::<()>(args))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ScriptError::Hook {
                hook,
                message: e.to_string(),
            }),
            Err(panic) => Err(ScriptError::Panicked {
                hook,
                message: panic_message(panic.as_ref()),
            }),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptHost")
            .field("script_path", &self.script_path)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
