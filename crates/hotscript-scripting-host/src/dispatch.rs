//! Frame dispatcher
//!
//! Calls `OnFrame(deltaTime)` exactly once per rendered frame. A hook that
//! errors is reported for that frame only; a missing hook is skipped and
//! reported once until the next successful reload re-arms the notice.

use std::time::Duration;

use tracing::{error, trace, warn};

use crate::host::ScriptHost;
use crate::timer::FrameClock;
use crate::{Hook, ScriptError};

/// Result of dispatching one frame
#[derive(Debug)]
pub enum DispatchOutcome {
    /// `OnFrame` ran to completion
    Called,
    /// No callable `OnFrame`; nothing ran
    Skipped,
    /// `OnFrame` raised an error (or a native callback panicked)
    Failed(ScriptError),
}

impl DispatchOutcome {
    /// Operator-facing description of a failure, if any
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            DispatchOutcome::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Frames dispatched, whatever the outcome
    pub frames: u64,
    pub called: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Drives `OnFrame` with wall-clock frame deltas
#[derive(Debug, Default)]
pub struct FrameDispatcher {
    clock: FrameClock,
    stats: DispatchStats,
    missing_reported: bool,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Dispatch one frame, measuring `deltaTime` since the end of the last call
    pub fn dispatch(&mut self, host: &ScriptHost) -> DispatchOutcome {
        let delta = self.clock.elapsed();
        let outcome = self.dispatch_with_delta(host, delta);
        self.clock.restart();
        outcome
    }

    /// Dispatch one frame with an explicit `deltaTime`
    pub fn dispatch_with_delta(&mut self, host: &ScriptHost, delta: Duration) -> DispatchOutcome {
        self.stats.frames += 1;
        trace!(target: "scripting", "OnFrame({:.4})", delta.as_secs_f64());

        match host.call_hook(Hook::OnFrame, delta.as_secs_f64()) {
            Ok(()) => {
                self.stats.called += 1;
                DispatchOutcome::Called
            }
            Err(e) if e.is_missing_hook() => {
                self.stats.skipped += 1;
                if !self.missing_reported {
                    self.missing_reported = true;
                    warn!(target: "scripting", "Skipping frames: {}", e);
                }
                DispatchOutcome::Skipped
            }
            Err(e) => {
                self.stats.failed += 1;
                error!(target: "scripting", "Frame {}: {}", self.stats.frames, e);
                DispatchOutcome::Failed(e)
            }
        }
    }

    /// Report a missing `OnFrame` again on the next frame that lacks one
    pub fn rearm_missing_notice(&mut self) {
        self.missing_reported = false;
    }

    /// Whether a missing `OnFrame` has been reported since the last re-arm
    pub fn missing_reported(&self) -> bool {
        self.missing_reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NativeContext;
    use crate::native::test_support::RecordingWindow;
    use crate::registry::CapabilityRegistry;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn loaded_host(dir: &TempDir, source: &str) -> ScriptHost {
        let path = dir.path().join("game.lua");
        fs::write(&path, source).unwrap();
        let window = Rc::new(RefCell::new(RecordingWindow::new(100, 100)));
        let host =
            ScriptHost::new(path, CapabilityRegistry::new(NativeContext::new(window, 10.0)))
                .unwrap();
        host.load().unwrap();
        host
    }

    #[test]
    fn test_passes_delta_in_seconds() {
        let dir = TempDir::new().unwrap();
        let host = loaded_host(&dir, "function OnFrame(dt) seen = dt end");
        let mut dispatcher = FrameDispatcher::new();

        let outcome = dispatcher.dispatch_with_delta(&host, Duration::from_millis(250));

        assert!(matches!(outcome, DispatchOutcome::Called));
        assert_eq!(host.lua().globals().get::<f64>("seen").unwrap(), 0.25);
    }

    #[test]
    fn test_error_on_third_frame_only_fails_that_frame() {
        let dir = TempDir::new().unwrap();
        let host = loaded_host(
            &dir,
            r#"
            calls = 0
            function OnFrame(dt)
                calls = calls + 1
                if calls == 3 then error("third frame") end
            end
            "#,
        );
        let mut dispatcher = FrameDispatcher::new();

        let outcomes: Vec<_> = (0..5)
            .map(|_| dispatcher.dispatch_with_delta(&host, Duration::from_millis(16)))
            .collect();

        for (i, outcome) in outcomes.iter().enumerate() {
            if i == 2 {
                assert!(outcome.diagnostic().unwrap().contains("third frame"));
            } else {
                assert!(matches!(outcome, DispatchOutcome::Called), "frame {}", i + 1);
            }
        }
        assert_eq!(host.lua().globals().get::<i64>("calls").unwrap(), 5);
        assert_eq!(
            dispatcher.stats(),
            DispatchStats {
                frames: 5,
                called: 4,
                skipped: 0,
                failed: 1
            }
        );
    }

    #[test]
    fn test_missing_hook_is_skipped_and_reported_once() {
        let dir = TempDir::new().unwrap();
        let host = loaded_host(&dir, "x = 1");
        let mut dispatcher = FrameDispatcher::new();

        for _ in 0..3 {
            assert!(matches!(dispatcher.dispatch(&host), DispatchOutcome::Skipped));
        }
        assert!(dispatcher.missing_reported());
        assert_eq!(dispatcher.stats().skipped, 3);

        dispatcher.rearm_missing_notice();
        assert!(!dispatcher.missing_reported());
    }

    #[test]
    fn test_clock_delta_is_non_negative_and_small() {
        let dir = TempDir::new().unwrap();
        let host = loaded_host(&dir, "function OnFrame(dt) seen = dt end");
        let mut dispatcher = FrameDispatcher::new();

        dispatcher.dispatch(&host);
        std::thread::sleep(Duration::from_millis(10));
        dispatcher.dispatch(&host);

        let seen = host.lua().globals().get::<f64>("seen").unwrap();
        assert!(seen >= 0.010, "delta covers the sleep: {seen}");
        assert!(seen < 5.0);
    }
}
