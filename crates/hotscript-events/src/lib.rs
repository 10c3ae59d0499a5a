/// Core event types for hotscript
///
/// This crate holds the platform-agnostic events that flow from a window
/// implementation into the frame loop, so the scripting host and the terminal
/// window can share them without depending on each other.
mod keyboard_events;
mod window_events;

pub use keyboard_events::{KeyCode, KeyEventKind, KeyModifiers, KeyboardEvent, ParseKeyError};
pub use window_events::WindowEvent;
