//! The frame loop
//!
//! Each frame drains window events (which may trigger a reload), then clears
//! the window, dispatches `OnFrame` and presents. Script failures never leave
//! this loop as errors; only the window and startup can fail it.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use hotscript_events::{KeyCode, ParseKeyError, WindowEvent};
use hotscript_scripting_host::{DispatchOutcome, ReloadOutcome, ScriptError, ScriptRunner};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::frame_loop_builder::FrameLoopBuilder;
use crate::render_window::RenderWindow;

/// Errors that stop the frame loop or prevent it from starting
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Window error: {0}")]
    Window(#[source] io::Error),
    #[error("Failed to create script runner: {0}")]
    Script(#[from] ScriptError),
    #[error("Invalid reload key: {0}")]
    ReloadKey(#[from] ParseKeyError),
    #[error("Failed to initialize logging: {0}")]
    Logging(#[source] io::Error),
}

/// What happened during one [`FrameLoop::step`]
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Events drained from the window
    pub events: usize,
    /// One outcome per reload key press seen this frame
    pub reloads: Vec<ReloadOutcome>,
    /// `None` when the window closed before the frame was drawn
    pub dispatch: Option<DispatchOutcome>,
}

/// Drives a [`RenderWindow`] and a [`ScriptRunner`] one frame at a time
pub struct FrameLoop<W: RenderWindow + 'static> {
    window: Rc<RefCell<W>>,
    runner: ScriptRunner,
    reload_key: KeyCode,
    frame_interval: Option<Duration>,
    frames: u64,
    started: bool,
}

impl<W: RenderWindow + 'static> FrameLoop<W> {
    pub fn builder(window: W) -> FrameLoopBuilder<W> {
        FrameLoopBuilder::new(window)
    }

    pub(crate) fn from_parts(
        window: Rc<RefCell<W>>,
        runner: ScriptRunner,
        reload_key: KeyCode,
        frame_interval: Option<Duration>,
    ) -> Self {
        Self {
            window,
            runner,
            reload_key,
            frame_interval,
            frames: 0,
            started: false,
        }
    }

    pub fn window(&self) -> &Rc<RefCell<W>> {
        &self.window
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }

    pub fn reload_key(&self) -> KeyCode {
        self.reload_key
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_open(&self) -> bool {
        self.window.borrow().is_open()
    }

    /// Load the script and call `Init` before the first frame
    pub fn start(&mut self) -> ReloadOutcome {
        self.started = true;
        info!(
            target: "scripting",
            "Starting frame loop (reload key: {})",
            self.reload_key
        );
        self.reload()
    }

    /// Run a single frame
    pub fn step(&mut self) -> Result<FrameReport, RunnerError> {
        let mut report = FrameReport::default();

        loop {
            // The borrow ends with this statement; a reload below runs Lua,
            // which may borrow the window through the shims.
            let event = self
                .window
                .borrow_mut()
                .poll_event()
                .map_err(RunnerError::Window)?;
            let Some(event) = event else {
                break;
            };
            report.events += 1;

            match event {
                WindowEvent::Closed => {
                    debug!(target: "scripting", "Window close requested");
                    self.window.borrow_mut().close();
                    break;
                }
                WindowEvent::Key(key) if key.is_press_of(self.reload_key) => {
                    report.reloads.push(self.reload());
                }
                _ => {}
            }
        }

        if !self.is_open() {
            return Ok(report);
        }

        self.window.borrow_mut().clear();
        let outcome = self.runner.dispatch_frame();
        if let Some(diagnostic) = outcome.diagnostic() {
            self.window.borrow_mut().report(&diagnostic);
        }
        self.window
            .borrow_mut()
            .display()
            .map_err(RunnerError::Window)?;

        self.frames += 1;
        report.dispatch = Some(outcome);
        Ok(report)
    }

    /// Run frames until the window closes, paced by the configured frame rate
    pub async fn run(mut self) -> Result<(), RunnerError> {
        if !self.started {
            self.start();
        }

        // tokio::time::interval panics on a zero period
        let mut ticker = self
            .frame_interval
            .filter(|period| !period.is_zero())
            .map(|period| {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker
            });

        while self.is_open() {
            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => tokio::task::yield_now().await,
            }
            self.step()?;
        }

        let reloads = self.runner.reloader().stats();
        let dispatch = self.runner.dispatcher().stats();
        info!(
            target: "scripting",
            "Frame loop stopped after {} frames ({} reloads, {} failed frames)",
            self.frames,
            reloads.attempts,
            dispatch.failed
        );
        Ok(())
    }

    fn reload(&mut self) -> ReloadOutcome {
        let outcome = self.runner.reload();
        let message = outcome.diagnostic().unwrap_or_else(|| {
            format!("Reloaded {}", self.runner.host().script_path().display())
        });
        self.window.borrow_mut().report(&message);
        outcome
    }
}

impl<W: RenderWindow + 'static> std::fmt::Debug for FrameLoop<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("runner", &self.runner)
            .field("reload_key", &self.reload_key)
            .field("frame_interval", &self.frame_interval)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
