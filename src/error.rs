// src/error.rs
use thiserror::Error;

/// Merge failures are fatal for the run. Corrupt prior state is not an
/// error — see `store::parse_or_empty`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("cannot accumulate field {field:?} for host {host:?}: {existing} + {incoming}")]
    Incompatible {
        host: String,
        field: String,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("ledger entry for host {host:?} is {found}, expected an object")]
    MalformedHost { host: String, found: &'static str },
}
