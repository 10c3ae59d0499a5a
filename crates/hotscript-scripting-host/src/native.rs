//! The native side that capabilities forward to
//!
//! A window implementation (the terminal window in production, recording
//! doubles in tests) implements [`NativeWindow`]. Every method is infallible
//! and non-blocking: implementations buffer their output until the frame loop
//! presents the frame.

use crate::vector::Vector2;

/// Window operations reachable from script code
pub trait NativeWindow {
    /// Current drawable size in script coordinates
    fn size(&self) -> Vector2<u32>;

    /// Change the drawable size in script coordinates
    fn set_size(&mut self, size: Vector2<u32>);

    /// Replace the window title
    fn set_title(&mut self, title: &str);

    /// Queue a circle for the frame being built
    fn draw_circle(&mut self, circle: &CircleShape);

    /// Whether an arrow key is currently held
    fn is_key_pressed(&self, key: ArrowKey) -> bool;
}

/// A filled circle positioned by the top-left corner of its bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    radius: f32,
    position: Vector2<f32>,
}

impl CircleShape {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            position: Vector2::default(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2<f32>) {
        self.position = position;
    }

    /// Centre of the circle (`position + radius` on both axes)
    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(self.position.x + self.radius, self.position.y + self.radius)
    }
}

/// Keys scripts can poll through `IsKeyPressed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    pub const ALL: [ArrowKey; 4] = [ArrowKey::Up, ArrowKey::Down, ArrowKey::Left, ArrowKey::Right];

    /// Map a script-facing key name; anything else is `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(ArrowKey::Up),
            "down" => Some(ArrowKey::Down),
            "left" => Some(ArrowKey::Left),
            "right" => Some(ArrowKey::Right),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArrowKey::Up => "up",
            ArrowKey::Down => "down",
            ArrowKey::Left => "left",
            ArrowKey::Right => "right",
        }
    }
}
