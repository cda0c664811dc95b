//! The access layer: all domain reads and writes go through these modules.
//!
//! Each submodule owns one entity family and enforces its invariants
//! (version monotonicity, append-only history, terminal session state,
//! ownership checks). Handlers in `crate::api` stay thin on top of this.

pub mod chat;
pub mod documents;
mod error;
pub mod interviews;
pub mod users;

pub use error::{StoreError, StoreResult};

/// Timestamp format used for every created_at/updated_at column.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
