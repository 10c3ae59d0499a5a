//! Keyboard event conversion utilities
//!
//! Converts crossterm keyboard events to our platform-agnostic KeyboardEvent type.

use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind as CrosstermKeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use hotscript_events::{KeyCode, KeyEventKind, KeyModifiers, KeyboardEvent};
use hotscript_scripting_host::ArrowKey;

/// Convert a crossterm KeyEvent to our KeyboardEvent type
pub fn crossterm_to_keyboard_event(event: &CrosstermKeyEvent) -> KeyboardEvent {
    KeyboardEvent::new(
        convert_key_code(&event.code),
        convert_modifiers(&event.modifiers),
        convert_kind(&event.kind),
    )
}

/// True for the keys that close the window: Esc, and Ctrl+C since raw mode
/// swallows the signal
pub fn is_close_request(event: &KeyboardEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return false;
    }
    match event.key {
        KeyCode::Escape => true,
        KeyCode::Char('c') | KeyCode::Char('C') => event.modifiers.ctrl,
        _ => false,
    }
}

/// The arrow key a key code stands for, if any
pub fn arrow_key(key: KeyCode) -> Option<ArrowKey> {
    match key {
        KeyCode::Up => Some(ArrowKey::Up),
        KeyCode::Down => Some(ArrowKey::Down),
        KeyCode::Left => Some(ArrowKey::Left),
        KeyCode::Right => Some(ArrowKey::Right),
        _ => None,
    }
}

fn convert_key_code(code: &CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(c) => KeyCode::Char(*c),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab | CrosstermKeyCode::BackTab => KeyCode::Tab,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Esc => KeyCode::Escape,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Insert => KeyCode::Insert,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::F(n) => KeyCode::F(*n),
        _ => KeyCode::Null,
    }
}

fn convert_modifiers(modifiers: &CrosstermKeyModifiers) -> KeyModifiers {
    KeyModifiers {
        ctrl: modifiers.contains(CrosstermKeyModifiers::CONTROL),
        alt: modifiers.contains(CrosstermKeyModifiers::ALT),
        shift: modifiers.contains(CrosstermKeyModifiers::SHIFT),
    }
}

fn convert_kind(kind: &CrosstermKeyEventKind) -> KeyEventKind {
    match kind {
        CrosstermKeyEventKind::Press => KeyEventKind::Press,
        CrosstermKeyEventKind::Release => KeyEventKind::Release,
        CrosstermKeyEventKind::Repeat => KeyEventKind::Repeat,
    }
}
