//! Keyboard event types for input handling
//!
//! These types abstract over terminal-specific implementations like crossterm
//! so the frame loop can match a configured reload key without knowing which
//! window produced the event.

use std::fmt;
use std::str::FromStr;

/// A keyboard event representing a key press, release, or repeat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed
    pub key: KeyCode,
    /// Modifier keys that were held during the event
    pub modifiers: KeyModifiers,
    /// The kind of keyboard event (press, release, or repeat)
    pub kind: KeyEventKind,
}

/// Represents a key on the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (a-z, 0-9, symbols, etc.)
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function keys F1-F12
    F(u8),
    /// Null/Unknown key
    Null,
}

/// Modifier keys that can be held during a keyboard event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    /// Control key is held
    pub ctrl: bool,
    /// Alt/Option key is held
    pub alt: bool,
    /// Shift key is held
    pub shift: bool,
}

/// The kind of keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    /// Key was pressed
    Press,
    /// Key was released
    Release,
    /// Key is being held (repeat event)
    Repeat,
}

impl KeyboardEvent {
    /// Create a new keyboard event
    pub fn new(key: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Self {
        Self {
            key,
            modifiers,
            kind,
        }
    }

    /// Create a keyboard event for a key press with no modifiers
    pub fn key_press(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::default(), KeyEventKind::Press)
    }

    /// Create a keyboard event for a key release with no modifiers
    pub fn key_release(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::default(), KeyEventKind::Release)
    }

    /// True for the initial press only; repeats and releases don't count
    pub fn is_press_of(&self, key: KeyCode) -> bool {
        self.kind == KeyEventKind::Press && self.key == key
    }
}

impl KeyModifiers {
    /// Create modifiers with ctrl set
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }
}

/// Error returned when a key name from configuration can't be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name `{0}`")]
pub struct ParseKeyError(pub String);

impl FromStr for KeyCode {
    type Err = ParseKeyError;

    /// Parse a key name as written in config files (`"F5"`, `"Escape"`, `"r"`)
    ///
    /// Named keys are matched case-insensitively; a single character maps to
    /// [`KeyCode::Char`] as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::Char(c));
        }

        let lower = s.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "escape" | "esc" => KeyCode::Escape,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            _ => {
                let number = lower
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=12).contains(n));
                match number {
                    Some(n) => KeyCode::F(n),
                    None => return Err(ParseKeyError(s.to_string())),
                }
            }
        };

        Ok(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}
