//! Crate-wide error taxonomy.

use thiserror::Error;

/// Common result type for fiberplan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes with distinct propagation policies: parse and config
/// errors are collected per record/segment and reported alongside successful
/// results; only `NotFound` is terminal for a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or unclassifiable raw record. Batch normalization skips
    /// the record and reports it rather than aborting the file.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid optical/loss parameter or segment attribute. Rejects the
    /// single affected segment; the batch continues.
    #[error("config error: {0}")]
    Config(String),

    /// Comparison requested against a project or phase that was never stored.
    #[error("not found: {0}")]
    NotFound(String),
}
