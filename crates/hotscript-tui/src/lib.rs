//! Terminal window for hotscript
//!
//! Renders the script's shapes onto a ratatui canvas and turns crossterm input
//! into [`hotscript_events::WindowEvent`]s for the frame loop.

pub mod held_keys;
pub mod keyboard;
mod terminal_window;
pub mod view;

pub use held_keys::HeldKeys;
pub use terminal_window::TerminalWindow;
