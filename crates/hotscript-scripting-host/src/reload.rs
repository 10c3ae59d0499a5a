//! Reload controller
//!
//! A reload is two steps run synchronously by whoever saw the trigger key:
//! execute the script file into the existing environment, then call `Init`.
//! A failed load skips `Init`. Neither failure is propagated; the caller gets
//! a [`ReloadOutcome`] and the frame loop carries on with whatever hooks the
//! environment currently holds.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::host::ScriptHost;
use crate::{Hook, ScriptError};

/// The step of a reload that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStage {
    /// Executing the script file
    Loading,
    /// Calling `Init`
    Initializing,
}

impl fmt::Display for ReloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadStage::Loading => f.write_str("load"),
            ReloadStage::Initializing => f.write_str("init"),
        }
    }
}

/// Result of one reload attempt
#[derive(Debug)]
pub enum ReloadOutcome {
    /// Script loaded and `Init` returned
    Ready,
    /// Script loaded but defines no callable `Init`
    ReadyWithoutInit,
    /// The script failed to read, parse, or run; `Init` was not called
    LoadFailed(ScriptError),
    /// The script loaded but `Init` raised an error
    InitFailed(ScriptError),
}

impl ReloadOutcome {
    /// True when the new source was executed successfully
    pub fn is_loaded(&self) -> bool {
        !matches!(self, ReloadOutcome::LoadFailed(_))
    }

    /// Step the reload stopped at, `None` on success
    pub fn failed_stage(&self) -> Option<ReloadStage> {
        match self {
            ReloadOutcome::Ready | ReloadOutcome::ReadyWithoutInit => None,
            ReloadOutcome::LoadFailed(_) => Some(ReloadStage::Loading),
            ReloadOutcome::InitFailed(_) => Some(ReloadStage::Initializing),
        }
    }

    /// Operator-facing description of a failure, if any
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            ReloadOutcome::Ready | ReloadOutcome::ReadyWithoutInit => None,
            ReloadOutcome::LoadFailed(e) | ReloadOutcome::InitFailed(e) => Some(e.to_string()),
        }
    }
}

/// Counters kept across the lifetime of the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadStats {
    /// Reloads requested
    pub attempts: u64,
    /// Loads that executed successfully
    pub loaded: u64,
    /// `Init` calls that returned without error
    pub initialized: u64,
    /// Reloads that ended in a reported error
    pub failed: u64,
}

/// Runs the load-then-`Init` protocol against a [`ScriptHost`]
#[derive(Debug, Default)]
pub struct ReloadController {
    stats: ReloadStats,
}

impl ReloadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ReloadStats {
        self.stats
    }

    /// Reload the script and initialise it
    pub fn reload(&mut self, host: &ScriptHost) -> ReloadOutcome {
        self.stats.attempts += 1;
        debug!(target: "scripting", "Reloading {}", host.script_path().display());

        if let Err(e) = host.load() {
            return self.failed(ReloadOutcome::LoadFailed(e));
        }
        self.stats.loaded += 1;

        match host.call_hook(Hook::Init, ()) {
            Ok(()) => {
                self.stats.initialized += 1;
                info!(target: "scripting", "Reloaded {}", host.script_path().display());
                ReloadOutcome::Ready
            }
            Err(e) if e.is_missing_hook() => {
                warn!(
                    target: "scripting",
                    "Reloaded {} but {}",
                    host.script_path().display(),
                    e
                );
                ReloadOutcome::ReadyWithoutInit
            }
            Err(e) => self.failed(ReloadOutcome::InitFailed(e)),
        }
    }

    fn failed(&mut self, outcome: ReloadOutcome) -> ReloadOutcome {
        self.stats.failed += 1;
        if let (Some(stage), Some(message)) = (outcome.failed_stage(), outcome.diagnostic()) {
            error!(target: "scripting", "Reload failed at {}: {}", stage, message);
        }
        outcome
    }
}
