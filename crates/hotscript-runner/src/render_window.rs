use std::io;

use hotscript_events::WindowEvent;
use hotscript_scripting_host::NativeWindow;

/// The loop-facing half of a window
///
/// [`NativeWindow`] is what scripts reach through the shims; this adds what
/// the frame loop needs to drive a frame: input, clearing and presenting.
pub trait RenderWindow: NativeWindow {
    /// False once the window has been closed
    fn is_open(&self) -> bool;

    /// Next pending event, or `None` when the queue is drained
    fn poll_event(&mut self) -> io::Result<Option<WindowEvent>>;

    /// Start a new frame with nothing drawn
    fn clear(&mut self);

    /// Present everything drawn since the last `clear`
    fn display(&mut self) -> io::Result<()>;

    fn close(&mut self);

    /// Show an operator-facing diagnostic line. An empty message clears it.
    fn report(&mut self, _message: &str) {}
}
