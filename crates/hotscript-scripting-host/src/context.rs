use std::cell::RefCell;
use std::rc::Rc;

use crate::native::{CircleShape, NativeWindow};

/// Native state the capability shims are allowed to touch
///
/// Built once by the process and moved into the [`CapabilityRegistry`]; each
/// installed Lua function keeps a clone of exactly the handles it needs. The
/// frame loop keeps its own handle to the same window and must not hold a
/// borrow of it while script code runs.
///
/// [`CapabilityRegistry`]: crate::registry::CapabilityRegistry
#[derive(Clone)]
pub struct NativeContext {
    /// The window scripts draw into and query
    pub window: Rc<RefCell<dyn NativeWindow>>,
    /// The single preallocated shape repositioned by every `DrawCircle`
    pub circle: Rc<RefCell<CircleShape>>,
}

impl NativeContext {
    /// Create a context around a window, preallocating a circle of `radius`
    pub fn new(window: Rc<RefCell<dyn NativeWindow>>, radius: f32) -> Self {
        Self {
            window,
            circle: Rc::new(RefCell::new(CircleShape::new(radius))),
        }
    }
}

impl std::fmt::Debug for NativeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeContext")
            .field("circle", &self.circle)
            .finish_non_exhaustive()
    }
}
