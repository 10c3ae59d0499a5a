//! Frame loop tests
//!
//! A scripted window feeds queued events to the loop and records every
//! presented frame, so these tests observe the loop the way a user would:
//! what is on screen, what the title says, and what the status line reports.

use hotscript_events::{KeyCode, KeyboardEvent, WindowEvent};
use hotscript_runner::{FrameLoop, RenderWindow, RunnerError};
use hotscript_scripting_host::{
    ArrowKey, CircleShape, DispatchOutcome, NativeWindow, ReloadOutcome, Vector2,
};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Default)]
struct ScriptedWindow {
    open: bool,
    title: String,
    size: Vector2<u32>,
    events: VecDeque<io::Result<WindowEvent>>,
    pending: Vec<CircleShape>,
    presented: Vec<Vec<CircleShape>>,
    reports: Vec<String>,
    close_after: Option<usize>,
}

impl ScriptedWindow {
    fn new() -> Self {
        Self {
            open: true,
            size: Vector2::new(640, 480),
            ..Default::default()
        }
    }

    fn closing_after(frames: usize) -> Self {
        Self {
            close_after: Some(frames),
            ..Self::new()
        }
    }

    fn push(&mut self, event: WindowEvent) {
        self.events.push_back(Ok(event));
    }
}

impl NativeWindow for ScriptedWindow {
    fn size(&self) -> Vector2<u32> {
        self.size
    }

    fn set_size(&mut self, size: Vector2<u32>) {
        self.size = size;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn draw_circle(&mut self, circle: &CircleShape) {
        self.pending.push(*circle);
    }

    fn is_key_pressed(&self, _key: ArrowKey) -> bool {
        false
    }
}

impl RenderWindow for ScriptedWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self) -> io::Result<Option<WindowEvent>> {
        self.events.pop_front().transpose()
    }

    fn clear(&mut self) {
        self.pending.clear();
    }

    fn display(&mut self) -> io::Result<()> {
        self.presented.push(std::mem::take(&mut self.pending));
        if self.close_after == Some(self.presented.len()) {
            self.open = false;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn report(&mut self, message: &str) {
        self.reports.push(message.to_string());
    }
}

struct Fixture {
    _dir: TempDir,
    script: PathBuf,
}

impl Fixture {
    fn new(source: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let script = dir.path().join("game.lua");
        fs::write(&script, source).expect("Failed to write script");
        Self { _dir: dir, script }
    }

    fn rewrite(&self, source: &str) {
        fs::write(&self.script, source).expect("Failed to rewrite script");
    }

    fn frame_loop(&self, window: ScriptedWindow) -> FrameLoop<ScriptedWindow> {
        FrameLoop::builder(window)
            .script_path(&self.script)
            .frame_interval(None)
            .build()
            .expect("Failed to build frame loop")
    }
}

const DEMO: &str = r#"
function Init()
    SetWindowTitle("demo v1")
end

function OnFrame(dt)
    DrawCircle(10, 20)
end
"#;

#[test]
fn test_start_runs_init_before_first_frame() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());

    assert!(matches!(frame_loop.start(), ReloadOutcome::Ready));
    assert_eq!(frame_loop.window().borrow().title, "demo v1");

    let report = frame_loop.step().unwrap();
    assert!(matches!(report.dispatch, Some(DispatchOutcome::Called)));

    let window = frame_loop.window().borrow();
    assert_eq!(window.presented.len(), 1);
    assert_eq!(window.presented[0].len(), 1);
    assert_eq!(window.presented[0][0].position(), Vector2::new(10.0, 20.0));
}

#[test]
fn test_each_frame_is_cleared_before_dispatch() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();

    for _ in 0..3 {
        frame_loop.step().unwrap();
    }

    let window = frame_loop.window().borrow();
    assert!(window.presented.iter().all(|frame| frame.len() == 1));
    assert_eq!(frame_loop.frames(), 3);
}

#[test]
fn test_reload_key_press_reloads_before_dispatch() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();
    frame_loop.step().unwrap();

    fixture.rewrite(
        r#"
        function Init() SetWindowTitle("demo v2") end
        function OnFrame(dt) DrawCircle(30, 40) end
        "#,
    );
    frame_loop
        .window()
        .borrow_mut()
        .push(WindowEvent::Key(KeyboardEvent::key_press(KeyCode::F(5))));

    let report = frame_loop.step().unwrap();

    assert_eq!(report.events, 1);
    assert_eq!(report.reloads.len(), 1);
    assert!(matches!(report.reloads[0], ReloadOutcome::Ready));

    let window = frame_loop.window().borrow();
    assert_eq!(window.title, "demo v2");
    assert_eq!(window.presented[1][0].position(), Vector2::new(30.0, 40.0));
    assert!(window.reports.last().unwrap().starts_with("Reloaded"));
}

#[test]
fn test_other_keys_and_releases_do_not_reload() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();

    {
        let mut window = frame_loop.window().borrow_mut();
        window.push(WindowEvent::Key(KeyboardEvent::key_release(KeyCode::F(5))));
        window.push(WindowEvent::Key(KeyboardEvent::key_press(KeyCode::F(6))));
        window.push(WindowEvent::Key(KeyboardEvent::key_press(KeyCode::Up)));
        window.push(WindowEvent::Focus(true));
    }

    let report = frame_loop.step().unwrap();

    assert_eq!(report.events, 4);
    assert!(report.reloads.is_empty());
    assert_eq!(frame_loop.runner().reloader().stats().attempts, 1);
}

#[test]
fn test_failed_reload_is_reported_and_old_hooks_keep_running() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();

    fixture.rewrite("function OnFrame(dt) DrawCircle(99, 99)");
    frame_loop
        .window()
        .borrow_mut()
        .push(WindowEvent::Key(KeyboardEvent::key_press(KeyCode::F(5))));

    let report = frame_loop.step().unwrap();

    assert!(matches!(report.reloads[0], ReloadOutcome::LoadFailed(_)));
    assert!(matches!(report.dispatch, Some(DispatchOutcome::Called)));

    let window = frame_loop.window().borrow();
    assert_eq!(window.presented[0][0].position(), Vector2::new(10.0, 20.0));
    assert!(window.reports.last().unwrap().contains("game.lua"));
}

#[test]
fn test_frame_error_is_reported_without_stopping() {
    let fixture = Fixture::new("function OnFrame(dt) error('bad frame') end");
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();

    let first = frame_loop.step().unwrap();
    let second = frame_loop.step().unwrap();

    assert!(matches!(first.dispatch, Some(DispatchOutcome::Failed(_))));
    assert!(matches!(second.dispatch, Some(DispatchOutcome::Failed(_))));
    assert!(frame_loop.is_open());

    let window = frame_loop.window().borrow();
    assert_eq!(window.presented.len(), 2);
    assert!(window.reports.last().unwrap().contains("bad frame"));
}

#[test]
fn test_close_event_stops_without_dispatch() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop.start();
    frame_loop.window().borrow_mut().push(WindowEvent::Closed);

    let report = frame_loop.step().unwrap();

    assert!(report.dispatch.is_none());
    assert!(!frame_loop.is_open());
    assert!(frame_loop.window().borrow().presented.is_empty());
}

#[test]
fn test_poll_error_is_a_window_error() {
    let fixture = Fixture::new(DEMO);
    let mut frame_loop = fixture.frame_loop(ScriptedWindow::new());
    frame_loop
        .window()
        .borrow_mut()
        .events
        .push_back(Err(io::Error::other("terminal went away")));

    let err = frame_loop.step().unwrap_err();

    assert!(matches!(err, RunnerError::Window(_)));
}

#[test]
fn test_invalid_reload_key_fails_build() {
    let fixture = Fixture::new(DEMO);
    let scripting = hotscript_config::ScriptingConfig {
        script_path: fixture.script.clone(),
        reload_key: "NotAKey".to_string(),
        ..Default::default()
    };

    let result = FrameLoop::builder(ScriptedWindow::new())
        .scripting(scripting)
        .build();

    assert!(matches!(result, Err(RunnerError::ReloadKey(_))));
}

#[test]
fn test_custom_reload_key_from_config() {
    let fixture = Fixture::new(DEMO);
    let scripting = hotscript_config::ScriptingConfig {
        script_path: fixture.script.clone(),
        reload_key: "r".to_string(),
        ..Default::default()
    };
    let mut frame_loop = FrameLoop::builder(ScriptedWindow::new())
        .scripting(scripting)
        .frame_interval(None)
        .build()
        .unwrap();
    frame_loop.start();

    frame_loop
        .window()
        .borrow_mut()
        .push(WindowEvent::Key(KeyboardEvent::key_press(KeyCode::Char('r'))));
    let report = frame_loop.step().unwrap();

    assert_eq!(frame_loop.reload_key(), KeyCode::Char('r'));
    assert_eq!(report.reloads.len(), 1);
}

#[tokio::test]
async fn test_run_starts_and_stops_when_window_closes() {
    let fixture = Fixture::new(DEMO);
    let frame_loop = FrameLoop::builder(ScriptedWindow::closing_after(3))
        .script_path(&fixture.script)
        .frame_interval(Some(Duration::from_millis(1)))
        .build()
        .unwrap();
    let window = frame_loop.window().clone();

    frame_loop.run().await.unwrap();

    let window = window.borrow();
    assert_eq!(window.title, "demo v1");
    assert_eq!(window.presented.len(), 3);
    assert!(!window.open);
}

#[tokio::test]
async fn test_run_with_zero_interval_runs_unpaced() {
    let fixture = Fixture::new(DEMO);
    let frame_loop = FrameLoop::builder(ScriptedWindow::closing_after(2))
        .script_path(&fixture.script)
        .frame_interval(Some(Duration::ZERO))
        .build()
        .unwrap();
    let window = frame_loop.window().clone();

    frame_loop.run().await.unwrap();

    assert_eq!(window.borrow().presented.len(), 2);
}

#[tokio::test]
async fn test_run_with_max_frame_rate_config() {
    let fixture = Fixture::new(DEMO);
    let mut config = hotscript_config::HotscriptConfig::default();
    config.scripting.script_path = fixture.script.clone();
    config.window.frame_rate = u32::MAX;
    let frame_loop = FrameLoop::builder(ScriptedWindow::closing_after(2))
        .with_config(&config)
        .build()
        .unwrap();
    let window = frame_loop.window().clone();

    frame_loop.run().await.unwrap();

    assert_eq!(window.borrow().presented.len(), 2);
}
