use anyhow::Context;
use hotscript_config::HotscriptConfig;
use hotscript_runner::{FrameLoop, init_logging, install_panic_hook};
use hotscript_tui::TerminalWindow;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = HotscriptConfig::load_or_default().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging("hotscript", &config.logging)?;
    install_panic_hook();
    info!("hotscript {}", env!("VERSION_STRING"));
    info!(
        "Script: {} (reload with {})",
        config.scripting.script_path.display(),
        config.scripting.reload_key
    );

    let window = TerminalWindow::new(&config.window).context("Failed to open terminal window")?;
    let frame_loop = FrameLoop::builder(window).with_config(&config).build()?;

    // The window is dropped, and the terminal restored, before any error is printed
    frame_loop.run().await?;

    info!("Exiting");
    Ok(())
}
