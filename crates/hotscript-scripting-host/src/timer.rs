use std::time::{Duration, Instant};

/// Monotonic stopwatch that yields the time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
}

impl FrameClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since creation or the last restart
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Return the elapsed time and start counting from zero again
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.started);
        self.started = now;
        elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
