//! Capability registry
//!
//! Declares the fixed set of globals scripts may call and installs them into
//! the environment. Installing consumes the registry, so a given environment
//! is populated exactly once; reloads re-run script source and never come
//! back here.

use mlua::{Function, Lua, MultiValue, UserData, UserDataMethods, Value};
use tracing::{debug, info};

use crate::context::NativeContext;
use crate::shims;
use crate::vector::Vector2;
use crate::ScriptError;

/// A global exposed to scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `SetWindowTitle(title)`
    SetWindowTitle,
    /// `DrawCircle(x, y)`
    DrawCircle,
    /// `IsKeyPressed(name) -> boolean`
    IsKeyPressed,
    /// `Window`, the native window handle
    Window,
    /// `window`, lowercase alias of the same handle
    WindowAlias,
    /// `print(...)`, routed to the log instead of stdout
    Print,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::SetWindowTitle,
        Capability::DrawCircle,
        Capability::IsKeyPressed,
        Capability::Window,
        Capability::WindowAlias,
        Capability::Print,
    ];

    /// Name of the global this capability is bound to
    pub fn global_name(self) -> &'static str {
        match self {
            Capability::SetWindowTitle => "SetWindowTitle",
            Capability::DrawCircle => "DrawCircle",
            Capability::IsKeyPressed => "IsKeyPressed",
            Capability::Window => "Window",
            Capability::WindowAlias => "window",
            Capability::Print => "print",
        }
    }
}

/// Script-visible handle to the native window
///
/// Has no constructor on the Lua side; the only instance is the one installed
/// under `Window`/`window`.
struct WindowHandle {
    context: NativeContext,
}

impl UserData for WindowHandle {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("GetSize", |_, this, ()| shims::window_size(&this.context));

        methods.add_method("SetSize", |_, this, size: Vector2<u32>| {
            shims::set_window_size(&this.context, size)
        });

        methods.add_method("SetTitle", |_, this, title: String| {
            shims::set_window_title(&this.context, &title)
        });

        methods.add_meta_method("__tostring", |_, this, ()| {
            let size = shims::window_size(&this.context)?;
            Ok(format!("Window({}x{})", size.x, size.y))
        });
    }
}

/// The set of globals an environment was populated with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledCapabilities {
    capabilities: Vec<Capability>,
}

impl InstalledCapabilities {
    pub fn contains(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

/// Builds the capability globals around a [`NativeContext`]
#[derive(Debug)]
pub struct CapabilityRegistry {
    context: NativeContext,
}

impl CapabilityRegistry {
    pub fn new(context: NativeContext) -> Self {
        Self { context }
    }

    /// Install every capability into `lua`'s globals
    pub fn install(self, lua: &Lua) -> Result<InstalledCapabilities, ScriptError> {
        let mut installed = Vec::with_capacity(Capability::ALL.len());

        for capability in Capability::ALL {
            let value = self
                .create(lua, capability)
                .and_then(|value| {
                    lua.globals().set(capability.global_name(), value.clone())?;
                    Ok(value)
                })
                .map_err(|source| ScriptError::Registration {
                    name: capability.global_name(),
                    source,
                })?;

            debug!(
                target: "scripting",
                "Installed capability {} ({})",
                capability.global_name(),
                value.type_name()
            );
            installed.push(capability);
        }

        info!(target: "scripting", "Installed {} capabilities", installed.len());
        Ok(InstalledCapabilities {
            capabilities: installed,
        })
    }

    fn create(&self, lua: &Lua, capability: Capability) -> mlua::Result<Value> {
        let value = match capability {
            Capability::SetWindowTitle => {
                let ctx = self.context.clone();
                Value::Function(lua.create_function(move |_, title: String| {
                    shims::set_window_title(&ctx, &title)
                })?)
            }
            Capability::DrawCircle => {
                let ctx = self.context.clone();
                Value::Function(lua.create_function(move |_, (x, y): (f32, f32)| {
                    shims::draw_circle(&ctx, x, y)
                })?)
            }
            Capability::IsKeyPressed => {
                let ctx = self.context.clone();
                Value::Function(
                    lua.create_function(move |_, name: Value| shims::is_key_pressed(&ctx, &name))?,
                )
            }
            Capability::Window => Value::UserData(lua.create_userdata(WindowHandle {
                context: self.context.clone(),
            })?),
            // Same userdata as `Window` so identity checks hold in scripts
            Capability::WindowAlias => lua.globals().get::<Value>(Capability::Window.global_name())?,
            Capability::Print => {
                let tostring: Function = lua.globals().get("tostring")?;
                Value::Function(lua.create_function(move |_, args: MultiValue| {
                    let parts = args
                        .into_iter()
                        .map(|value| tostring.call::<String>(value))
                        .collect::<mlua::Result<Vec<_>>>()?;
                    info!(target: "script", "{}", parts.join("\t"));
                    Ok(())
                })?)
            }
        };

        Ok(value)
    }
}
