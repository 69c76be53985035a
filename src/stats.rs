// src/stats.rs
//! End-of-run statistics as delivered by the host process.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Per-host counts for one outcome category.
pub type CategoryCounts = HashMap<String, u64>;

/// One host's flattened fields: category name (or `"custom"`) to value.
pub type HostRecord = serde_json::Map<String, Value>;

/// Host name to flattened record, as produced by one run.
pub type FlattenedStats = HashMap<String, HostRecord>;

/// Complete statistics payload for a single run.
///
/// Categories the host never touched deserialize as empty maps; a host with
/// no entry in a category is simply absent from that map. Counts are taken
/// as-is, no validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub processed: CategoryCounts,
    #[serde(default)]
    pub failures: CategoryCounts,
    #[serde(default)]
    pub ok: CategoryCounts,
    /// Hosts that could not be reached. `dark` is the wire name.
    #[serde(default)]
    pub dark: CategoryCounts,
    #[serde(default)]
    pub changed: CategoryCounts,
    #[serde(default)]
    pub skipped: CategoryCounts,
    #[serde(default)]
    pub rescued: CategoryCounts,
    #[serde(default)]
    pub ignored: CategoryCounts,
    /// Free-form per-host payload attached by the run. Not a counter.
    #[serde(default)]
    pub custom: HashMap<String, Value>,
}

impl RunStats {
    /// The fixed category set, paired with each category's counts.
    /// `custom` is deliberately not in this list.
    pub(crate) fn categories(&self) -> [(&'static str, &CategoryCounts); 8] {
        [
            ("processed", &self.processed),
            ("failures", &self.failures),
            ("ok", &self.ok),
            ("dark", &self.dark),
            ("changed", &self.changed),
            ("skipped", &self.skipped),
            ("rescued", &self.rescued),
            ("ignored", &self.ignored),
        ]
    }
}
