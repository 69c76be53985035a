// src/config.rs
//! Hook configuration. One knob: where the ledger lives.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the ledger file. Unset or empty disables
/// the hook entirely.
pub const OUTPUT_FILE_VAR: &str = "RUNLEDGER_OUTPUT_FILE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target ledger path. `None` disables all I/O.
    pub output_path: Option<PathBuf>,
}

impl Config {
    /// Reads [`OUTPUT_FILE_VAR`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(OUTPUT_FILE_VAR).ok().as_deref())
    }

    /// Core of [`Config::from_env`], split out so tests can exercise the
    /// unset and empty cases without touching process state. An empty
    /// string counts as unset.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        let output_path = value.filter(|v| !v.is_empty()).map(PathBuf::from);
        Self { output_path }
    }

    /// A config that records to `path`.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: Some(path.into()),
        }
    }

    /// A config with recording switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self { output_path: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.output_path.is_some()
    }
}
