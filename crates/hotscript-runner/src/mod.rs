mod frame_loop;
mod frame_loop_builder;
pub mod logging;
mod render_window;

pub use frame_loop::{FrameLoop, FrameReport, RunnerError};
pub use frame_loop_builder::FrameLoopBuilder;
pub use logging::{init_logging, install_panic_hook};
pub use render_window::RenderWindow;
