use serde::{Deserialize, Serialize};
use std::time::Duration;

const MIN_FRAME_INTERVAL: Duration = Duration::from_nanos(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window title (scripts may change it with `SetWindowTitle`)
    #[serde(default = "default_title")]
    pub title: String,

    /// Virtual window width in script coordinates
    #[serde(default = "default_width")]
    pub width: u32,

    /// Virtual window height in script coordinates
    #[serde(default = "default_height")]
    pub height: u32,

    /// Target frames per second; 0 renders as fast as possible
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_title() -> String {
    "hotscript".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_frame_rate() -> u32 {
    60
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl WindowConfig {
    /// Time budget for one frame, or `None` when pacing is disabled
    ///
    /// Never `Some(Duration::ZERO)`; rates above one frame per nanosecond
    /// round up to a 1ns budget.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.frame_rate > 0).then(|| {
            Duration::from_secs_f64(1.0 / self.frame_rate as f64).max(MIN_FRAME_INTERVAL)
        })
    }
}
