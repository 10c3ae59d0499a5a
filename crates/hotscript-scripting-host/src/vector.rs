//! Two-component vectors and their Lua representation
//!
//! A [`Vector2`] crosses into Lua as a plain table `{ x = .., y = .. }` and
//! comes back from any table. Missing or unconvertible fields become zero
//! instead of failing the call; only a non-table value is an error.

use mlua::{FromLua, IntoLua, Lua, Value};

/// A 2D vector with `x` and `y` components
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: FromLua + Default> FromLua for Vector2<T> {
    fn from_lua(value: Value, _lua: &Lua) -> mlua::Result<Self> {
        let table = match value {
            Value::Table(table) => table,
            other => {
                return Err(mlua::Error::runtime(format!(
                    "expected a table with x and y fields, got {}",
                    other.type_name()
                )));
            }
        };

        Ok(Self {
            x: table.get::<Option<T>>("x").ok().flatten().unwrap_or_default(),
            y: table.get::<Option<T>>("y").ok().flatten().unwrap_or_default(),
        })
    }
}

impl<T: IntoLua> IntoLua for Vector2<T> {
    fn into_lua(self, lua: &Lua) -> mlua::Result<Value> {
        let table = lua.create_table_with_capacity(0, 2)?;
        table.set("x", self.x)?;
        table.set("y", self.y)?;
        Ok(Value::Table(table))
    }
}
