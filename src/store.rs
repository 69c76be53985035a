// src/store.rs
//! Read-merge-write persistence for the cumulative ledger.
//!
//! The ledger is a single JSON object on disk, host name to record. Each
//! run is folded in additively: counters for a known host accumulate,
//! fields the ledger has not seen yet are set directly.

use crate::error::MergeError;
use crate::stats::{FlattenedStats, HostRecord};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::map::Entry;
use serde_json::ser::PrettyFormatter;
use serde_json::{Number, Serializer, Value};
use std::fs;
use std::path::Path;

/// The on-disk document: host name to whatever the file held for it.
pub type Ledger = serde_json::Map<String, Value>;

/// Loads prior state from `path`, folds `new` into it, and rewrites the
/// file in full.
///
/// A missing file is first created holding an empty object, so the ledger
/// exists on disk even when the run recorded nothing. There is no
/// temp-file/rename step: a crash mid-write can truncate the ledger, and
/// two concurrent runs against the same path race last-writer-wins.
///
/// # Errors
/// Returns an error on filesystem failure, or when an accumulating merge
/// hits a pair of values that cannot be added.
pub fn persist(path: &Path, new: FlattenedStats) -> Result<()> {
    let mut state = load_or_create(path)?;
    merge_into(&mut state, new)?;
    write_pretty(path, &state)
}

fn load_or_create(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        fs::write(path, "{}")
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(parse_or_empty(&content))
}

/// The corrupt-state fallback: anything that does not parse as a JSON
/// object is replaced by an empty ledger. Deliberately silent — prior
/// contents are discarded, not backed up or reported.
#[must_use]
pub fn parse_or_empty(content: &str) -> Ledger {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(state)) => state,
        Ok(_) | Err(_) => Ledger::new(),
    }
}

/// Folds `new` into `state`.
///
/// Hosts the ledger has never seen are inserted wholesale. For a known
/// host, each incoming field either accumulates onto the stored value
/// (integers add, floats add, strings and arrays concatenate) or, if the
/// field is new for that host, is set directly.
///
/// The `custom` field replaces instead of accumulating: it carries
/// free-form payloads for which addition has no meaning.
///
/// # Errors
/// Returns [`MergeError`] when a stored host entry is not an object, or
/// when an existing field and its incoming value cannot be added.
pub fn merge_into(state: &mut Ledger, new: FlattenedStats) -> Result<(), MergeError> {
    for (host, fields) in new {
        match state.entry(host) {
            Entry::Vacant(slot) => {
                slot.insert(Value::Object(fields));
            }
            Entry::Occupied(mut slot) => {
                let host = slot.key().clone();
                match slot.get_mut() {
                    Value::Object(existing) => merge_record(&host, existing, fields)?,
                    other => {
                        return Err(MergeError::MalformedHost {
                            host,
                            found: json_type(other),
                        })
                    }
                }
            }
        }
    }
    Ok(())
}

fn merge_record(
    host: &str,
    existing: &mut HostRecord,
    fields: HostRecord,
) -> Result<(), MergeError> {
    for (field, value) in fields {
        match existing.entry(field) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                if slot.key() == "custom" {
                    slot.insert(value);
                    continue;
                }
                let merged =
                    add_values(slot.get(), &value).ok_or_else(|| MergeError::Incompatible {
                        host: host.to_string(),
                        field: slot.key().clone(),
                        existing: json_type(slot.get()),
                        incoming: json_type(&value),
                    })?;
                slot.insert(merged);
            }
        }
    }
    Ok(())
}

// Addition in the ledger sense: numbers add, strings and arrays
// concatenate, everything else has no sum.
fn add_values(existing: &Value, incoming: &Value) -> Option<Value> {
    match (existing, incoming) {
        (Value::Number(a), Value::Number(b)) => add_numbers(a, b),
        (Value::String(a), Value::String(b)) => {
            let mut joined = a.clone();
            joined.push_str(b);
            Some(Value::String(joined))
        }
        (Value::Array(a), Value::Array(b)) => {
            let mut joined = a.clone();
            joined.extend(b.iter().cloned());
            Some(Value::Array(joined))
        }
        _ => None,
    }
}

// Counters saturate rather than wrap.
fn add_numbers(a: &Number, b: &Number) -> Option<Value> {
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(Value::from(x.saturating_add(y)));
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(Value::from(x.saturating_add(y)));
    }
    let sum = a.as_f64()? + b.as_f64()?;
    Some(Value::from(sum))
}

fn write_pretty(path: &Path, state: &Ledger) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    state
        .serialize(&mut ser)
        .context("Failed to serialize ledger")?;

    // One write call, replacing prior contents entirely.
    fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
