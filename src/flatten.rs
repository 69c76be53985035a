// src/flatten.rs
//! Normalizes a run snapshot from category-major to host-major form.

use crate::stats::{FlattenedStats, RunStats};
use serde_json::Value;

/// Reorganizes `stats` into one record per host.
///
/// Every host that appears in at least one category gets a record, and a
/// record carries only the fields the source actually set — a host with no
/// entry in a category omits that field rather than storing a zero.
#[must_use]
pub fn flatten(stats: &RunStats) -> FlattenedStats {
    let mut flat = FlattenedStats::new();

    for (category, counts) in stats.categories() {
        for (host, count) in counts {
            flat.entry(host.clone())
                .or_default()
                .insert(category.to_string(), Value::from(*count));
        }
    }

    // One write per host per run, so no intra-call conflict to resolve.
    for (host, value) in &stats.custom {
        flat.entry(host.clone())
            .or_default()
            .insert("custom".to_string(), value.clone());
    }

    flat
}
