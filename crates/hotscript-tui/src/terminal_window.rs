use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle,
};
use hotscript_config::WindowConfig;
use hotscript_events::WindowEvent;
use hotscript_runner::RenderWindow;
use hotscript_scripting_host::{ArrowKey, CircleShape, NativeWindow, Vector2};
use ratatui::backend::CrosstermBackend;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tracing::{debug, info};

use crate::held_keys::HeldKeys;
use crate::keyboard::{crossterm_to_keyboard_event, is_close_request};
use crate::view::{Scene, render_scene};

/// A window drawn into the terminal
///
/// Takes over the terminal (raw mode, alternate screen) until dropped. Shapes
/// and title changes are buffered and written out by `display`.
pub struct TerminalWindow {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    title: String,
    title_dirty: bool,
    size: Vector2<u32>,
    shapes: Vec<CircleShape>,
    status: String,
    keys: HeldKeys,
    enhanced: bool,
    open: bool,
}

impl TerminalWindow {
    pub fn new(config: &WindowConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        match Self::setup(config) {
            Ok(window) => Ok(window),
            Err(e) => {
                execute!(io::stdout(), LeaveAlternateScreen).ok();
                disable_raw_mode().ok();
                Err(e)
            }
        }
    }

    fn setup(config: &WindowConfig) -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        info!(
            "Terminal window opened ({}x{}, key releases {})",
            config.width,
            config.height,
            if enhanced { "reported" } else { "emulated" }
        );

        let options = TerminalOptions {
            viewport: Viewport::Fullscreen,
        };
        let mut terminal = Terminal::with_options(CrosstermBackend::new(stdout), options)?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            title: config.title.clone(),
            title_dirty: true,
            size: Vector2::new(config.width, config.height),
            shapes: Vec::new(),
            status: String::new(),
            keys: HeldKeys::new(enhanced),
            enhanced,
            open: true,
        })
    }

    fn translate(&mut self, event: Event) -> Option<WindowEvent> {
        match event {
            Event::Key(key) => {
                let key = crossterm_to_keyboard_event(&key);
                if is_close_request(&key) {
                    return Some(WindowEvent::Closed);
                }
                self.keys.apply(&key, Instant::now());
                Some(WindowEvent::Key(key))
            }
            Event::Resize(columns, rows) => Some(WindowEvent::Resized { columns, rows }),
            Event::FocusGained => Some(WindowEvent::Focus(true)),
            Event::FocusLost => {
                self.keys.clear();
                Some(WindowEvent::Focus(false))
            }
            _ => None,
        }
    }
}

impl NativeWindow for TerminalWindow {
    fn size(&self) -> Vector2<u32> {
        self.size
    }

    fn set_size(&mut self, size: Vector2<u32>) {
        self.size = size;
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.title_dirty = true;
        }
    }

    fn draw_circle(&mut self, circle: &CircleShape) {
        self.shapes.push(*circle);
    }

    fn is_key_pressed(&self, key: ArrowKey) -> bool {
        self.keys.is_held(key, Instant::now())
    }
}

impl RenderWindow for TerminalWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self) -> io::Result<Option<WindowEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Some(event) = self.translate(event::read()?) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn display(&mut self) -> io::Result<()> {
        if self.title_dirty {
            execute!(self.terminal.backend_mut(), SetTitle(&self.title))?;
            self.title_dirty = false;
        }

        let scene = Scene {
            title: &self.title,
            size: self.size,
            shapes: &self.shapes,
            status: &self.status,
        };
        self.terminal.draw(|frame| render_scene(frame, &scene))?;
        Ok(())
    }

    fn close(&mut self) {
        debug!("Closing terminal window");
        self.open = false;
    }

    fn report(&mut self, message: &str) {
        self.status = message.lines().next().unwrap_or_default().to_string();
    }
}

impl Drop for TerminalWindow {
    fn drop(&mut self) {
        if self.enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
        }
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        )
        .ok();
        self.terminal.show_cursor().ok();
        disable_raw_mode().ok();
    }
}
