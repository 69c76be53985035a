// src/hook.rs
//! End-of-run entry point. The host calls [`StatsHook::on_run_complete`]
//! at most once per run with a fully-populated snapshot; everything else
//! in the crate hangs off that call.

use crate::config::Config;
use crate::flatten::flatten;
use crate::stats::RunStats;
use crate::store;
use anyhow::Result;

/// Descriptive identity of the hook. Purely informational — no
/// registration or discovery mechanism is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub version: &'static str,
}

pub struct StatsHook {
    config: Config,
}

impl StatsHook {
    /// Builds the hook from the process environment. With no output file
    /// configured the hook stays inert.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            config: Config::from_env(),
        }
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn info(&self) -> HookInfo {
        HookInfo {
            name: "run_ledger",
            kind: "notification",
            version: "2.0",
        }
    }

    /// Folds one finished run into the persisted ledger.
    ///
    /// A disabled hook returns immediately and performs zero filesystem
    /// operations.
    ///
    /// # Errors
    /// Propagates filesystem failures and type-incompatible merges.
    pub fn on_run_complete(&self, stats: &RunStats) -> Result<()> {
        let Some(path) = self.config.output_path.as_deref() else {
            return Ok(());
        };
        store::persist(path, flatten(stats))
    }
}

impl Default for StatsHook {
    fn default() -> Self {
        Self::from_env()
    }
}
