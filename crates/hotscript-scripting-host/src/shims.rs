//! Native shims behind the script capabilities
//!
//! Each shim converts nothing itself (arguments arrive already marshalled by
//! the registry), touches exactly one native primitive and returns. A window
//! that is already borrowed surfaces as a Lua runtime error in the calling
//! script, never as a panic.

use std::cell::{Ref, RefMut};

use mlua::Value;

use crate::context::NativeContext;
use crate::native::{ArrowKey, NativeWindow};
use crate::vector::Vector2;

fn window(ctx: &NativeContext) -> mlua::Result<Ref<'_, dyn NativeWindow + 'static>> {
    ctx.window
        .try_borrow()
        .map_err(|_| mlua::Error::runtime("window is busy"))
}

fn window_mut(ctx: &NativeContext) -> mlua::Result<RefMut<'_, dyn NativeWindow + 'static>> {
    ctx.window
        .try_borrow_mut()
        .map_err(|_| mlua::Error::runtime("window is busy"))
}

/// `SetWindowTitle(title)`
pub fn set_window_title(ctx: &NativeContext, title: &str) -> mlua::Result<()> {
    window_mut(ctx)?.set_title(title);
    Ok(())
}

/// `DrawCircle(x, y)`: move the shared circle and queue it for this frame
pub fn draw_circle(ctx: &NativeContext, x: f32, y: f32) -> mlua::Result<()> {
    let circle = {
        let mut circle = ctx
            .circle
            .try_borrow_mut()
            .map_err(|_| mlua::Error::runtime("circle is busy"))?;
        circle.set_position(Vector2::new(x, y));
        *circle
    };

    window_mut(ctx)?.draw_circle(&circle);
    Ok(())
}

/// `IsKeyPressed(name)`: unknown names and non-strings are `false`
pub fn is_key_pressed(ctx: &NativeContext, name: &Value) -> mlua::Result<bool> {
    let key = match name {
        Value::String(s) => s.to_str().ok().and_then(|s| ArrowKey::from_name(&s)),
        _ => None,
    };

    match key {
        Some(key) => Ok(window(ctx)?.is_key_pressed(key)),
        None => Ok(false),
    }
}

/// `Window:GetSize()`
pub fn window_size(ctx: &NativeContext) -> mlua::Result<Vector2<u32>> {
    Ok(window(ctx)?.size())
}

/// `Window:SetSize({ x, y })`
pub fn set_window_size(ctx: &NativeContext, size: Vector2<u32>) -> mlua::Result<()> {
    window_mut(ctx)?.set_size(size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::test_support::RecordingWindow;
    use mlua::Lua;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn context() -> (Rc<RefCell<RecordingWindow>>, NativeContext) {
        let window = Rc::new(RefCell::new(RecordingWindow::new(640, 480)));
        let ctx = NativeContext::new(window.clone(), 5.0);
        (window, ctx)
    }

    #[test]
    fn test_draw_circle_positions_shared_shape() {
        let (window, ctx) = context();

        draw_circle(&ctx, 10.0, 20.0).unwrap();

        let window = window.borrow();
        assert_eq!(window.drawn.len(), 1);
        assert_eq!(window.drawn[0].position(), Vector2::new(10.0, 20.0));
        assert_eq!(window.drawn[0].radius(), 5.0);
        assert_eq!(ctx.circle.borrow().position(), Vector2::new(10.0, 20.0));
    }

    #[test]
    fn test_is_key_pressed_follows_native_state() {
        let (window, ctx) = context();
        let lua = Lua::new();
        window.borrow_mut().held.insert(ArrowKey::Left);

        let name = |s: &str| Value::String(lua.create_string(s).unwrap());
        assert!(is_key_pressed(&ctx, &name("left")).unwrap());
        assert!(!is_key_pressed(&ctx, &name("right")).unwrap());
        assert!(!is_key_pressed(&ctx, &name("LEFT")).unwrap());
        assert!(!is_key_pressed(&ctx, &name("space")).unwrap());
        assert!(!is_key_pressed(&ctx, &Value::Nil).unwrap());
        assert!(!is_key_pressed(&ctx, &Value::Integer(1)).unwrap());
    }

    #[test]
    fn test_busy_window_is_a_lua_error() {
        let (window, ctx) = context();
        let _held = window.borrow_mut();

        assert!(set_window_title(&ctx, "nope").is_err());
        assert!(window_size(&ctx).is_err());
    }

    #[test]
    fn test_title_and_size_forward() {
        let (window, ctx) = context();

        set_window_title(&ctx, "Hello").unwrap();
        set_window_size(&ctx, Vector2::new(800, 600)).unwrap();

        assert_eq!(window.borrow().title, "Hello");
        assert_eq!(window_size(&ctx).unwrap(), Vector2::new(800, 600));
    }
}
