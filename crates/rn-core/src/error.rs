//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Note that the
//! simulation's data-consistency conditions (dangling vehicle references,
//! disconnected graphs, full connections) are *not* errors — they resolve by
//! silent self-repair inside the tick, by design.

use thiserror::Error;

/// The top-level error type for `rn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rn-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
