//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `FerryError` as one
//! variant via `From`, so configuration problems surface unchanged all the way
//! up to the binary.

use thiserror::Error;

/// Errors raised while validating a configuration or parsing a log line.
#[derive(Debug, Error)]
pub enum FerryError {
    #[error("{name} must be in {min}..={max}, got {got}")]
    OutOfRange {
        name: &'static str,
        got:  u64,
        min:  u64,
        max:  u64,
    },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `ferry-*` crates.
pub type FerryResult<T> = Result<T, FerryError>;
